//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::{Argon2PasswordService, InMemoryStore, UuidTokenIssuer};
use crate::config::Config;
use course_shop_core::ports::PortResult;
use course_shop_core::service::ShopService;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub shop: ShopService,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the shop service to a freshly seeded in-memory store.
    pub fn in_memory(config: Arc<Config>) -> PortResult<Self> {
        let passwords = Arc::new(Argon2PasswordService::default());
        let store = Arc::new(InMemoryStore::with_seed_data(passwords.as_ref())?);
        let shop = ShopService::new(store, Arc::new(UuidTokenIssuer), passwords);

        Ok(Self { shop, config })
    }
}
