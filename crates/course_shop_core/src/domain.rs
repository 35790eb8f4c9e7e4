//! crates/course_shop_core/src/domain.rs
//!
//! Defines the pure, core data structures for the course shop.
//! These structs are independent of any storage or serialization format.

use chrono::{DateTime, Utc};

/// The access level of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }
}

/// A registered account, including its credentials.
#[derive(Debug, Clone)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    /// `None` for accounts that were seeded rather than registered.
    pub registered_at: Option<DateTime<Utc>>,
}

// Input for the store when creating an account; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub registered_at: Option<DateTime<Utc>>,
}

/// A user with the password omitted. This is the only user shape that leaves
/// the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub registered_at: Option<DateTime<Utc>>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            registered_at: user.registered_at,
        }
    }
}

/// The result of a successful registration or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: PublicUser,
}

/// A course offered in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image_url: String,
    pub lessons: u32,
    pub hours: u32,
    pub students: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseStatus {
    Approved,
}

impl PurchaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseStatus::Approved => "approved",
        }
    }
}

/// A recorded purchase. Name and price are copied from the course at the
/// time of purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub id: u32,
    pub user_id: u32,
    pub course_id: u32,
    pub course_name: String,
    pub price: f64,
    pub purchased_at: DateTime<Utc>,
    pub status: PurchaseStatus,
}

/// A purchase joined with the current catalog entry for its course.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseWithCourse {
    pub purchase: Purchase,
    pub course: Option<Course>,
}

/// Aggregate figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_users: usize,
    pub total_courses: usize,
    pub total_purchases: usize,
    pub revenue: f64,
}
