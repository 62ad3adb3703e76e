use std::sync::Arc;

use crate::auth::hash_password;
use crate::config::AppConfig;
use crate::database::models::{Contact, ContactFilter, ContactInput, NewUser};
use crate::database::{ContactRepository, MemoryStore, Store, UserRepository};
use crate::middleware::auth::AuthUser;
use crate::pagination::PageLimits;
use crate::services::{AddressService, ContactService, UserService};

pub const TEST_USERNAME: &str = "test";
pub const TEST_PASSWORD: &str = "rahasia";
pub const TEST_TOKEN: &str = "test";

/// In-memory store seeded with one logged-in user
pub struct TestContext {
    pub store: Arc<dyn Store>,
    pub config: AppConfig,
    pub user: AuthUser,
}

impl TestContext {
    pub async fn new() -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let config = AppConfig::testing();
        let mut ctx = Self {
            store,
            config,
            user: AuthUser {
                username: String::new(),
                name: String::new(),
            },
        };
        ctx.user = ctx.create_user(TEST_USERNAME, TEST_TOKEN).await;
        ctx
    }

    /// Insert a user with the shared test password and a fixed token
    pub async fn create_user(&self, username: &str, token: &str) -> AuthUser {
        let password = hash_password(TEST_PASSWORD, self.config.auth.bcrypt_cost)
            .expect("hash test password");
        let user = self
            .store
            .insert_user(NewUser {
                username: username.to_string(),
                password,
                name: username.to_string(),
            })
            .await
            .expect("insert test user");
        self.store
            .set_token(username, Some(token.to_string()))
            .await
            .expect("set test token");
        AuthUser::from(user)
    }

    pub async fn create_contact(&self) -> Contact {
        let input = ContactInput {
            first_name: "test".to_string(),
            last_name: Some("test".to_string()),
            email: Some("test@example.com".to_string()),
            phone: Some("090000000".to_string()),
        };
        self.store
            .insert_contact(&self.user.username, &input)
            .await
            .expect("insert test contact")
    }

    /// Contacts named "test 0".."test {n-1}"
    pub async fn create_many_contacts(&self, n: usize) {
        for i in 0..n {
            let input = ContactInput {
                first_name: format!("test {}", i),
                last_name: Some(format!("test {}", i)),
                email: Some(format!("test{}@example.com", i)),
                phone: Some(format!("09000000{}", i)),
            };
            self.store
                .insert_contact(&self.user.username, &input)
                .await
                .expect("insert test contact");
        }
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(self.store.clone(), self.config.auth.bcrypt_cost)
    }

    pub fn contact_service(&self) -> ContactService {
        ContactService::new(self.store.clone(), PageLimits::from(&self.config.api))
    }

    pub fn address_service(&self) -> AddressService {
        AddressService::new(self.store.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_logged_in_user() {
        let ctx = TestContext::new().await;
        assert_eq!(ctx.user.username, TEST_USERNAME);
        let user = ctx.store.find_user_by_token(TEST_TOKEN).await.unwrap().unwrap();
        assert_eq!(user.username, TEST_USERNAME);
    }

    #[tokio::test]
    async fn many_contacts_get_sequential_names() {
        let ctx = TestContext::new().await;
        ctx.create_many_contacts(3).await;
        let filter = ContactFilter::default();
        let contacts = ctx.store.search_contacts(TEST_USERNAME, &filter, 0, 10).await.unwrap();
        let names: Vec<&str> = contacts.iter().map(|c| c.first_name.as_str()).collect();
        assert_eq!(names, vec!["test 0", "test 1", "test 2"]);
    }
}
