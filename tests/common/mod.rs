#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Method, RequestBuilder};

use contact_api::auth::hash_password;
use contact_api::config::AppConfig;
use contact_api::database::models::{Address, AddressInput, Contact, ContactInput, NewUser};
use contact_api::database::{
    AddressRepository, ContactRepository, MemoryStore, Store, UserRepository,
};
use contact_api::{app, AppState};

pub const TEST_USERNAME: &str = "test";
pub const TEST_PASSWORD: &str = "rahasia";
pub const TEST_TOKEN: &str = "test";

/// One server per test: its own port, its own in-memory store, one seeded user.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub store: Arc<dyn Store>,
    config: AppConfig,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let config = AppConfig::testing();
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());

        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;

        let router = app(AppState::new(store.clone(), config.clone()));
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            store,
            config,
        };
        server.create_user(TEST_USERNAME, TEST_TOKEN).await?;
        Ok(server)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request without credentials
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Request carrying the seeded user's token
    pub fn authed(&self, method: Method, path: &str) -> RequestBuilder {
        self.request(method, path).header("Authorization", TEST_TOKEN)
    }

    pub async fn create_user(&self, username: &str, token: &str) -> Result<()> {
        let password = hash_password(TEST_PASSWORD, self.config.auth.bcrypt_cost)?;
        self.store
            .insert_user(NewUser {
                username: username.to_string(),
                password,
                name: username.to_string(),
            })
            .await?;
        self.store.set_token(username, Some(token.to_string())).await?;
        Ok(())
    }

    pub async fn create_contact(&self) -> Result<Contact> {
        let input = ContactInput {
            first_name: "test".to_string(),
            last_name: Some("test".to_string()),
            email: Some("test@example.com".to_string()),
            phone: Some("090000000".to_string()),
        };
        Ok(self.store.insert_contact(TEST_USERNAME, &input).await?)
    }

    /// Contacts "test 0".."test {n-1}" with matching emails and phones
    pub async fn create_many_contacts(&self, n: usize) -> Result<()> {
        for i in 0..n {
            let input = ContactInput {
                first_name: format!("test {}", i),
                last_name: Some(format!("test {}", i)),
                email: Some(format!("test{}@example.com", i)),
                phone: Some(format!("09000000{}", i)),
            };
            self.store.insert_contact(TEST_USERNAME, &input).await?;
        }
        Ok(())
    }

    pub async fn create_address(&self, contact_id: i32) -> Result<Address> {
        let input = AddressInput {
            street: Some("jalan test".to_string()),
            city: Some("kota test".to_string()),
            province: Some("provinsi test".to_string()),
            country: "indonesia".to_string(),
            postal_code: Some("234234".to_string()),
        };
        Ok(self.store.insert_address(contact_id, &input).await?)
    }
}
