use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::database::{DatabaseError, Store};
use crate::middleware::auth::AuthUser;

/// Maps a raw credential to the user it authenticates.
///
/// The auth middleware only talks to this trait, so the services never
/// depend on how credentials look or where they are stored.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// `Ok(None)` means the credential is unknown (401), `Err` is a store failure.
    async fn resolve_identity(&self, credential: &str) -> Result<Option<AuthUser>, DatabaseError>;
}

/// Static-token scheme: the credential must equal a user's stored token.
pub struct TokenIdentityResolver {
    store: Arc<dyn Store>,
}

impl TokenIdentityResolver {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl IdentityResolver for TokenIdentityResolver {
    async fn resolve_identity(&self, credential: &str) -> Result<Option<AuthUser>, DatabaseError> {
        let user = self.store.find_user_by_token(credential).await?;
        Ok(user.map(AuthUser::from))
    }
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    bcrypt::verify(password, hash)
}

/// Fresh opaque session token
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}
