//! crates/course_shop_core/src/service.rs
//!
//! The shop's use cases: registration, login, token authentication, admin
//! gating, catalog queries, purchases and statistics. Everything here works
//! through the ports, so the same logic runs against any store.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    AuthSession, Course, NewUser, PublicUser, Purchase, PurchaseWithCourse, Role, Stats, User,
};
use crate::ports::{CourseStore, PasswordService, PortError, TokenIssuer};

/// Every way a shop operation can fail.
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Token not provided")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Access denied")]
    Forbidden,
    #[error("Course not found")]
    CourseNotFound,
    #[error("You have already purchased this course")]
    AlreadyPurchased,
    #[error(transparent)]
    Port(#[from] PortError),
}

pub type ShopResult<T> = Result<T, ShopError>;

#[derive(Clone)]
pub struct ShopService {
    store: Arc<dyn CourseStore>,
    tokens: Arc<dyn TokenIssuer>,
    passwords: Arc<dyn PasswordService>,
}

impl ShopService {
    pub fn new(
        store: Arc<dyn CourseStore>,
        tokens: Arc<dyn TokenIssuer>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            store,
            tokens,
            passwords,
        }
    }

    //=====================================================================================
    // Registration & Login
    //=====================================================================================

    /// Creates a customer account and signs it in.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ShopResult<AuthSession> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ShopError::MissingFields);
        }

        // Checked up front so a duplicate does not pay for hashing.
        if self.store.find_user_by_email(email).await?.is_some() {
            return Err(ShopError::DuplicateEmail);
        }

        let password_hash = self.passwords.hash(password)?;
        let new_user = NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            role: Role::Customer,
            registered_at: Some(Utc::now()),
        };

        let user = self
            .store
            .create_user(new_user)
            .await
            .map_err(|e| match e {
                PortError::Conflict(_) => ShopError::DuplicateEmail,
                other => ShopError::Port(other),
            })?;

        Ok(self.start_session(&user))
    }

    pub async fn login(&self, email: &str, password: &str) -> ShopResult<AuthSession> {
        if email.is_empty() || password.is_empty() {
            return Err(ShopError::MissingFields);
        }

        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or(ShopError::InvalidCredentials)?;

        if !self.passwords.verify(password, &user.password_hash) {
            return Err(ShopError::InvalidCredentials);
        }

        Ok(self.start_session(&user))
    }

    fn start_session(&self, user: &User) -> AuthSession {
        AuthSession {
            token: self.tokens.issue(user),
            user: PublicUser::from(user),
        }
    }

    //=====================================================================================
    // Authentication & Access
    //=====================================================================================

    /// Resolves a raw token to the user it was issued for.
    pub async fn authenticate(&self, token: Option<&str>) -> ShopResult<User> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ShopError::MissingToken),
        };

        let users = self.store.list_users().await?;
        match_token(&users, token)
            .cloned()
            .ok_or(ShopError::InvalidToken)
    }

    pub fn current_user(&self, user: &User) -> PublicUser {
        PublicUser::from(user)
    }

    pub async fn total_users(&self) -> ShopResult<usize> {
        Ok(self.store.list_users().await?.len())
    }

    //=====================================================================================
    // Catalog
    //=====================================================================================

    /// Lists the catalog, optionally keeping only one category (exact match).
    pub async fn list_courses(&self, category: Option<&str>) -> ShopResult<Vec<Course>> {
        let courses = self.store.list_courses().await?;
        Ok(match category {
            Some(category) if !category.is_empty() => courses
                .into_iter()
                .filter(|c| c.category == category)
                .collect(),
            _ => courses,
        })
    }

    pub async fn get_course(&self, course_id: u32) -> ShopResult<Course> {
        self.store
            .get_course(course_id)
            .await?
            .ok_or(ShopError::CourseNotFound)
    }

    //=====================================================================================
    // Purchases
    //=====================================================================================

    pub async fn purchase(&self, user: &User, course_id: u32) -> ShopResult<Purchase> {
        let course = self.get_course(course_id).await?;

        self.store
            .create_purchase(user.id, &course)
            .await
            .map_err(|e| match e {
                PortError::Conflict(_) => ShopError::AlreadyPurchased,
                other => ShopError::Port(other),
            })
    }

    /// The user's purchases, each joined with the course as it is in the catalog now.
    pub async fn list_purchases(&self, user: &User) -> ShopResult<Vec<PurchaseWithCourse>> {
        let purchases = self.store.purchases_for_user(user.id).await?;
        let courses = self.store.list_courses().await?;

        Ok(purchases
            .into_iter()
            .map(|purchase| {
                let course = courses.iter().find(|c| c.id == purchase.course_id).cloned();
                PurchaseWithCourse { purchase, course }
            })
            .collect())
    }

    //=====================================================================================
    // Admin
    //=====================================================================================

    pub async fn stats(&self, user: &User) -> ShopResult<Stats> {
        require_admin(user)?;

        let total_users = self.total_users().await?;
        let total_courses = self.store.list_courses().await?.len();
        let purchases = self.store.list_purchases().await?;

        Ok(Stats {
            total_users,
            total_courses,
            total_purchases: purchases.len(),
            revenue: revenue(&purchases),
        })
    }
}

/// Finds the first user whose email appears anywhere in `token`.
///
/// This mirrors how tokens have always been resolved by the shop. It is not
/// a secure scheme: any string containing a registered email passes.
pub fn match_token<'a>(users: &'a [User], token: &str) -> Option<&'a User> {
    users.iter().find(|u| token.contains(u.email.as_str()))
}

pub fn require_admin(user: &User) -> ShopResult<()> {
    if user.role == Role::Admin {
        Ok(())
    } else {
        Err(ShopError::Forbidden)
    }
}

pub fn revenue(purchases: &[Purchase]) -> f64 {
    purchases.iter().map(|p| p.price).sum()
}
