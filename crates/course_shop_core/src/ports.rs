//! crates/course_shop_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the shop's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of how users, courses and purchases are stored, and of how
//! tokens and password hashes are produced.

use async_trait::async_trait;
use crate::domain::{Course, NewUser, Purchase, User};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external implementations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Holds the users, the course catalog and the purchases.
///
/// Implementations own id assignment. Methods that check a uniqueness
/// constraint and then insert must do both without interleaving with
/// another writer.
#[async_trait]
pub trait CourseStore: Send + Sync {
    // --- Users ---
    /// All users, in id order.
    async fn list_users(&self) -> PortResult<Vec<User>>;

    async fn find_user_by_email(&self, email: &str) -> PortResult<Option<User>>;

    /// Inserts a user with the next id. Fails with `Conflict` if the email is taken.
    async fn create_user(&self, new_user: NewUser) -> PortResult<User>;

    // --- Catalog ---
    async fn list_courses(&self) -> PortResult<Vec<Course>>;

    async fn get_course(&self, course_id: u32) -> PortResult<Option<Course>>;

    // --- Purchases ---
    /// Records a purchase of `course` by `user_id` with the next id.
    /// Fails with `Conflict` if that user already owns the course.
    async fn create_purchase(&self, user_id: u32, course: &Course) -> PortResult<Purchase>;

    async fn list_purchases(&self) -> PortResult<Vec<Purchase>>;

    async fn purchases_for_user(&self, user_id: u32) -> PortResult<Vec<Purchase>>;
}

pub trait TokenIssuer: Send + Sync {
    /// Produces a session token for `user`. The token must contain the user's email.
    fn issue(&self, user: &User) -> String;
}

pub trait PasswordService: Send + Sync {
    fn hash(&self, password: &str) -> PortResult<String>;

    /// Returns `false` for a wrong password or an unreadable hash.
    fn verify(&self, password: &str, password_hash: &str) -> bool;
}
