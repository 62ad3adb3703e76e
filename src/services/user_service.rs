use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::{generate_token, hash_password, verify_password};
use crate::database::models::{NewUser, UserProfile};
use crate::database::Store;
use crate::middleware::auth::AuthUser;
use crate::services::ServiceError;
use crate::validation::{LoginUserRequest, RegisterUserRequest, UpdateUserRequest};

const LOGIN_FAILED: &str = "Username or password wrong";

/// Session token handed out by a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginToken {
    pub token: String,
}

/// Registration, login and profile management
pub struct UserService {
    store: Arc<dyn Store>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    pub async fn register(&self, request: RegisterUserRequest) -> Result<UserProfile, ServiceError> {
        let registration = request.into_registration()?;

        if self.store.count_users_by_username(&registration.username).await? != 0 {
            warn!("Registration rejected, username {} taken", registration.username);
            return Err(ServiceError::Duplicate("Username already exists".to_string()));
        }

        let password = hash_password(&registration.password, self.bcrypt_cost)?;
        let user = self
            .store
            .insert_user(NewUser {
                username: registration.username,
                password,
                name: registration.name,
            })
            .await?;

        info!("User {} registered", user.username);
        Ok(user.into())
    }

    /// Unknown username and wrong password fail identically.
    pub async fn login(&self, request: LoginUserRequest) -> Result<LoginToken, ServiceError> {
        let credentials = request.into_credentials()?;

        let Some(user) = self.store.find_user(&credentials.username).await? else {
            warn!("Login failed for unknown user {}", credentials.username);
            return Err(ServiceError::Unauthorized(LOGIN_FAILED.to_string()));
        };

        if !verify_password(&credentials.password, &user.password)? {
            warn!("Login failed for {}: wrong password", user.username);
            return Err(ServiceError::Unauthorized(LOGIN_FAILED.to_string()));
        }

        let token = generate_token();
        self.store.set_token(&user.username, Some(token.clone())).await?;

        info!("User {} logged in", user.username);
        Ok(LoginToken { token })
    }

    pub async fn get(&self, user: &AuthUser) -> Result<UserProfile, ServiceError> {
        Ok(UserProfile {
            username: user.username.clone(),
            name: user.name.clone(),
        })
    }

    pub async fn update(
        &self,
        user: &AuthUser,
        request: UpdateUserRequest,
    ) -> Result<UserProfile, ServiceError> {
        let mut update = request.into_update()?;
        if let Some(password) = update.password.take() {
            update.password = Some(hash_password(&password, self.bcrypt_cost)?);
        }

        let updated = self
            .store
            .update_user(&user.username, update)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Unauthorized".to_string()))?;

        info!("User {} updated profile", updated.username);
        Ok(updated.into())
    }

    /// Clears the stored token; the old credential stops resolving immediately.
    pub async fn logout(&self, user: &AuthUser) -> Result<(), ServiceError> {
        self.store.set_token(&user.username, None).await?;
        info!("User {} logged out", user.username);
        Ok(())
    }
}
