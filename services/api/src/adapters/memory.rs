//! services/api/src/adapters/memory.rs
//!
//! This module contains the in-memory store, the concrete implementation of the
//! `CourseStore` port from the `core` crate. All data lives in the process and is
//! lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use course_shop_core::domain::{Course, NewUser, Purchase, PurchaseStatus, User};
use course_shop_core::ports::{CourseStore, PasswordService, PortError, PortResult};
use tokio::sync::RwLock;

use super::seed;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A store that keeps everything in memory.
///
/// The catalog never changes after construction, so it sits outside the lock.
pub struct InMemoryStore {
    courses: Vec<Course>,
    tables: RwLock<Tables>,
}

struct Tables {
    users: Vec<User>,
    purchases: Vec<Purchase>,
    next_user_id: u32,
    next_purchase_id: u32,
}

impl InMemoryStore {
    /// Creates a store with the given catalog and users, and no purchases.
    pub fn new(courses: Vec<Course>, users: Vec<User>) -> Self {
        let next_user_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            courses,
            tables: RwLock::new(Tables {
                users,
                purchases: Vec::new(),
                next_user_id,
                next_purchase_id: 1,
            }),
        }
    }

    /// Creates a store holding the standard catalog and the admin account.
    pub fn with_seed_data(passwords: &dyn PasswordService) -> PortResult<Self> {
        let admin = seed::admin(passwords.hash(seed::ADMIN_PASSWORD)?);
        Ok(Self::new(seed::courses(), vec![admin]))
    }
}

//=========================================================================================
// Port Implementation
//=========================================================================================

#[async_trait]
impl CourseStore for InMemoryStore {
    async fn list_users(&self) -> PortResult<Vec<User>> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn find_user_by_email(&self, email: &str) -> PortResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> PortResult<User> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.email == new_user.email) {
            return Err(PortError::Conflict(format!(
                "user with email {} already exists",
                new_user.email
            )));
        }

        let user = User {
            id: tables.next_user_id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            registered_at: new_user.registered_at,
        };
        tables.next_user_id += 1;
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn list_courses(&self) -> PortResult<Vec<Course>> {
        Ok(self.courses.clone())
    }

    async fn get_course(&self, course_id: u32) -> PortResult<Option<Course>> {
        Ok(self.courses.iter().find(|c| c.id == course_id).cloned())
    }

    async fn create_purchase(&self, user_id: u32, course: &Course) -> PortResult<Purchase> {
        let mut tables = self.tables.write().await;

        if tables
            .purchases
            .iter()
            .any(|p| p.user_id == user_id && p.course_id == course.id)
        {
            return Err(PortError::Conflict(format!(
                "user {} already owns course {}",
                user_id, course.id
            )));
        }

        let purchase = Purchase {
            id: tables.next_purchase_id,
            user_id,
            course_id: course.id,
            course_name: course.name.clone(),
            price: course.price,
            purchased_at: Utc::now(),
            status: PurchaseStatus::Approved,
        };
        tables.next_purchase_id += 1;
        tables.purchases.push(purchase.clone());

        Ok(purchase)
    }

    async fn list_purchases(&self) -> PortResult<Vec<Purchase>> {
        Ok(self.tables.read().await.purchases.clone())
    }

    async fn purchases_for_user(&self, user_id: u32) -> PortResult<Vec<Purchase>> {
        let tables = self.tables.read().await;
        Ok(tables
            .purchases
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_shop_core::domain::Role;
    use std::sync::Arc;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Role::Customer,
            registered_at: Some(Utc::now()),
        }
    }

    fn seeded() -> InMemoryStore {
        InMemoryStore::new(seed::courses(), vec![seed::admin("hash".to_string())])
    }

    #[tokio::test]
    async fn seed_has_six_courses_and_one_admin() {
        let store = seeded();
        assert_eq!(store.list_courses().await.unwrap().len(), 6);

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, seed::ADMIN_EMAIL);
        assert_eq!(users[0].role, Role::Admin);
        assert!(users[0].registered_at.is_none());
    }

    #[tokio::test]
    async fn user_ids_continue_after_seeded_users() {
        let store = seeded();
        let a = store.create_user(new_user("a@x.com")).await.unwrap();
        let b = store.create_user(new_user("b@x.com")).await.unwrap();
        assert_eq!((a.id, b.id), (2, 3));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = seeded();
        store.create_user(new_user("a@x.com")).await.unwrap();

        let err = store.create_user(new_user("a@x.com")).await.unwrap_err();
        assert!(matches!(err, PortError::Conflict(_)));
        assert_eq!(store.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn email_comparison_is_case_sensitive() {
        let store = seeded();
        store.create_user(new_user("a@x.com")).await.unwrap();
        assert!(store.create_user(new_user("A@x.com")).await.is_ok());
        assert!(store.find_user_by_email("A@X.COM").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn purchase_snapshots_course_and_rejects_repeats() {
        let store = seeded();
        let course = store.get_course(3).await.unwrap().unwrap();

        let purchase = store.create_purchase(7, &course).await.unwrap();
        assert_eq!(purchase.id, 1);
        assert_eq!(purchase.course_name, "React do Zero");
        assert_eq!(purchase.price, 127.90);
        assert_eq!(purchase.status, PurchaseStatus::Approved);

        let err = store.create_purchase(7, &course).await.unwrap_err();
        assert!(matches!(err, PortError::Conflict(_)));

        // A different user may still buy it.
        let other = store.create_purchase(8, &course).await.unwrap();
        assert_eq!(other.id, 2);
        assert_eq!(store.purchases_for_user(7).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_registrations_of_one_email_admit_exactly_one() {
        let store = Arc::new(seeded());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create_user(new_user("race@x.com")).await.is_ok()
            }));
        }

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_course_is_none() {
        assert!(seeded().get_course(99).await.unwrap().is_none());
    }
}
