use std::sync::Arc;

use api_lib::adapters::{seed, Argon2PasswordService, InMemoryStore, UuidTokenIssuer};
use course_shop_core::{Role, ShopError, ShopService, User};

fn shop() -> ShopService {
    let passwords = Arc::new(Argon2PasswordService::default());
    let store = InMemoryStore::with_seed_data(passwords.as_ref()).expect("Failed to seed store");
    ShopService::new(Arc::new(store), Arc::new(UuidTokenIssuer), passwords)
}

async fn admin(shop: &ShopService) -> User {
    let session = shop
        .login(seed::ADMIN_EMAIL, seed::ADMIN_PASSWORD)
        .await
        .unwrap();
    shop.authenticate(Some(&session.token)).await.unwrap()
}

async fn customer(shop: &ShopService, email: &str) -> User {
    let session = shop.register("Customer", email, "secret").await.unwrap();
    shop.authenticate(Some(&session.token)).await.unwrap()
}

#[tokio::test]
async fn test_register_assigns_next_id_and_customer_role() {
    let shop = shop();

    let session = shop.register("Ana", "ana@x.com", "abcdef").await.unwrap();

    assert_eq!(session.user.id, 2);
    assert_eq!(session.user.name, "Ana");
    assert_eq!(session.user.email, "ana@x.com");
    assert_eq!(session.user.role, Role::Customer);
    assert!(session.user.registered_at.is_some());
    assert!(session.token.contains("ana@x.com"));
}

#[tokio::test]
async fn test_register_requires_every_field() {
    let shop = shop();

    for (name, email, password) in [("", "a@x.com", "p"), ("A", "", "p"), ("A", "a@x.com", "")] {
        let err = shop.register(name, email, password).await.unwrap_err();
        assert!(matches!(err, ShopError::MissingFields));
    }
    assert_eq!(shop.total_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_second_registration_with_same_email_fails() {
    let shop = shop();
    shop.register("Ana", "ana@x.com", "abcdef").await.unwrap();

    let err = shop
        .register("Someone Else", "ana@x.com", "different")
        .await
        .unwrap_err();
    assert!(matches!(err, ShopError::DuplicateEmail));

    let err = shop
        .register("Admin Again", seed::ADMIN_EMAIL, "x")
        .await
        .unwrap_err();
    assert!(matches!(err, ShopError::DuplicateEmail));
}

#[tokio::test]
async fn test_login_checks_password() {
    let shop = shop();
    shop.register("Ana", "ana@x.com", "abcdef").await.unwrap();

    let session = shop.login("ana@x.com", "abcdef").await.unwrap();
    assert_eq!(session.user.id, 2);

    let err = shop.login("ana@x.com", "wrong").await.unwrap_err();
    assert!(matches!(err, ShopError::InvalidCredentials));

    let err = shop.login("nobody@x.com", "abcdef").await.unwrap_err();
    assert!(matches!(err, ShopError::InvalidCredentials));

    let err = shop.login("", "abcdef").await.unwrap_err();
    assert!(matches!(err, ShopError::MissingFields));
}

#[tokio::test]
async fn test_authenticate_missing_and_invalid_tokens() {
    let shop = shop();

    assert!(matches!(
        shop.authenticate(None).await.unwrap_err(),
        ShopError::MissingToken
    ));
    assert!(matches!(
        shop.authenticate(Some("")).await.unwrap_err(),
        ShopError::MissingToken
    ));
    assert!(matches!(
        shop.authenticate(Some("abc123")).await.unwrap_err(),
        ShopError::InvalidToken
    ));
}

#[tokio::test]
async fn test_any_token_containing_an_email_authenticates() {
    let shop = shop();
    let user = shop
        .authenticate(Some("forged-admin@email.com-token"))
        .await
        .unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.role, Role::Admin);
}

#[tokio::test]
async fn test_get_course_matches_list_entry() {
    let shop = shop();
    let courses = shop.list_courses(None).await.unwrap();
    assert_eq!(courses.len(), 6);

    for course in &courses {
        assert_eq!(&shop.get_course(course.id).await.unwrap(), course);
    }

    assert!(matches!(
        shop.get_course(42).await.unwrap_err(),
        ShopError::CourseNotFound
    ));
}

#[tokio::test]
async fn test_category_filter_is_exact() {
    let shop = shop();

    let front = shop.list_courses(Some("Front-end")).await.unwrap();
    assert_eq!(front.len(), 1);
    assert_eq!(front[0].id, 2);

    assert!(shop.list_courses(Some("front-end")).await.unwrap().is_empty());
    assert_eq!(shop.list_courses(Some("")).await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_repeat_purchase_is_rejected() {
    let shop = shop();
    let ana = customer(&shop, "ana@x.com").await;

    let purchase = shop.purchase(&ana, 1).await.unwrap();
    assert_eq!(purchase.id, 1);
    assert_eq!(purchase.user_id, ana.id);
    assert_eq!(purchase.course_name, "JavaScript Completo");

    let err = shop.purchase(&ana, 1).await.unwrap_err();
    assert!(matches!(err, ShopError::AlreadyPurchased));

    let err = shop.purchase(&ana, 99).await.unwrap_err();
    assert!(matches!(err, ShopError::CourseNotFound));
}

#[tokio::test]
async fn test_list_purchases_only_returns_own_with_course() {
    let shop = shop();
    let ana = customer(&shop, "ana@x.com").await;
    let bia = customer(&shop, "bia@x.com").await;

    shop.purchase(&ana, 2).await.unwrap();
    shop.purchase(&ana, 5).await.unwrap();
    shop.purchase(&bia, 2).await.unwrap();

    let owned = shop.list_purchases(&ana).await.unwrap();
    assert_eq!(owned.len(), 2);
    assert!(owned.iter().all(|p| p.purchase.user_id == ana.id));

    let course_ids: Vec<u32> = owned
        .iter()
        .map(|p| p.course.as_ref().unwrap().id)
        .collect();
    assert_eq!(course_ids, vec![2, 5]);
    assert!(shop.list_purchases(&admin(&shop).await).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_stats_require_admin() {
    let shop = shop();
    let ana = customer(&shop, "ana@x.com").await;

    assert!(matches!(
        shop.stats(&ana).await.unwrap_err(),
        ShopError::Forbidden
    ));
}

#[tokio::test]
async fn test_revenue_tracks_purchases() {
    let shop = shop();
    let admin = admin(&shop).await;

    let stats = shop.stats(&admin).await.unwrap();
    assert_eq!(stats.total_purchases, 0);
    assert_eq!(stats.revenue, 0.0);

    let ana = customer(&shop, "ana@x.com").await;
    shop.purchase(&ana, 1).await.unwrap();
    let stats = shop.stats(&admin).await.unwrap();
    assert!((stats.revenue - 97.90).abs() < 1e-9);

    shop.purchase(&ana, 2).await.unwrap();
    shop.purchase(&ana, 3).await.unwrap();
    shop.purchase(&admin, 3).await.unwrap();
    let stats = shop.stats(&admin).await.unwrap();
    assert_eq!(stats.total_purchases, 4);
    assert!((stats.revenue - (97.90 + 79.90 + 127.90 + 127.90)).abs() < 1e-9);
}
