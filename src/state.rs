use std::sync::Arc;

use crate::auth::{IdentityResolver, TokenIdentityResolver};
use crate::config::AppConfig;
use crate::database::Store;
use crate::pagination::PageLimits;
use crate::services::{AddressService, ContactService, UserService};

/// Shared handler state. Services are cheap views over the store and are
/// built per request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub identity: Arc<dyn IdentityResolver>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        let identity = Arc::new(TokenIdentityResolver::new(store.clone()));
        Self {
            store,
            identity,
            config: Arc::new(config),
        }
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.store.clone(), self.config.auth.bcrypt_cost)
    }

    pub fn contacts(&self) -> ContactService {
        ContactService::new(self.store.clone(), PageLimits::from(&self.config.api))
    }

    pub fn addresses(&self) -> AddressService {
        AddressService::new(self.store.clone())
    }
}
