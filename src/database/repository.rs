use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Address, AddressInput, Contact, ContactFilter, ContactInput, NewUser, User, UserUpdate,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn count_users_by_username(&self, username: &str) -> Result<i64, DatabaseError>;

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn find_user(&self, username: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_user_by_token(&self, token: &str) -> Result<Option<User>, DatabaseError>;

    /// Applies the present fields. `None` when the user no longer exists.
    async fn update_user(
        &self,
        username: &str,
        update: UserUpdate,
    ) -> Result<Option<User>, DatabaseError>;

    /// Replaces (or clears) the stored token. Returns false when the user is gone.
    async fn set_token(&self, username: &str, token: Option<String>) -> Result<bool, DatabaseError>;
}

/// Contact persistence. Every method is scoped to the owning `username`.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    async fn insert_contact(
        &self,
        username: &str,
        input: &ContactInput,
    ) -> Result<Contact, DatabaseError>;

    async fn find_contact(&self, username: &str, id: i32) -> Result<Option<Contact>, DatabaseError>;

    async fn count_contact(&self, username: &str, id: i32) -> Result<i64, DatabaseError>;

    async fn update_contact(
        &self,
        username: &str,
        id: i32,
        input: &ContactInput,
    ) -> Result<Option<Contact>, DatabaseError>;

    /// Removes the contact and its addresses. Returns false when nothing matched.
    async fn delete_contact(&self, username: &str, id: i32) -> Result<bool, DatabaseError>;

    /// One page of matching contacts in id order.
    async fn search_contacts(
        &self,
        username: &str,
        filter: &ContactFilter,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Contact>, DatabaseError>;

    async fn count_contacts(
        &self,
        username: &str,
        filter: &ContactFilter,
    ) -> Result<i64, DatabaseError>;
}

/// Address persistence. Callers check contact ownership first; these methods
/// only scope by `contact_id`.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    async fn insert_address(
        &self,
        contact_id: i32,
        input: &AddressInput,
    ) -> Result<Address, DatabaseError>;

    async fn find_address(
        &self,
        contact_id: i32,
        id: i32,
    ) -> Result<Option<Address>, DatabaseError>;

    async fn update_address(
        &self,
        contact_id: i32,
        id: i32,
        input: &AddressInput,
    ) -> Result<Option<Address>, DatabaseError>;

    async fn delete_address(&self, contact_id: i32, id: i32) -> Result<bool, DatabaseError>;

    async fn list_addresses(&self, contact_id: i32) -> Result<Vec<Address>, DatabaseError>;
}

/// The full store capability injected into services.
#[async_trait]
pub trait Store: UserRepository + ContactRepository + AddressRepository {
    /// Human-readable backend name for logs and health output
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> Result<(), DatabaseError>;
}
