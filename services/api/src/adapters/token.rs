//! services/api/src/adapters/token.rs
//!
//! `TokenIssuer` implementation backed by random UUIDs.

use course_shop_core::domain::User;
use course_shop_core::ports::TokenIssuer;
use uuid::Uuid;

/// Issues tokens of the form `<random hex>.<email>`.
///
/// Nothing is recorded server side; the email suffix is what lets a later
/// request be tied back to the account.
#[derive(Clone, Default)]
pub struct UuidTokenIssuer;

impl TokenIssuer for UuidTokenIssuer {
    fn issue(&self, user: &User) -> String {
        format!("{}.{}", Uuid::new_v4().simple(), user.email)
    }
}
