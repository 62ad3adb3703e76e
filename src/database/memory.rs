use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Address, AddressInput, Contact, ContactFilter, ContactInput, NewUser, User, UserUpdate,
};
use crate::database::repository::{AddressRepository, ContactRepository, Store, UserRepository};

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    // BTreeMap keeps id (insertion) order for listings
    contacts: BTreeMap<i32, Contact>,
    addresses: BTreeMap<i32, Address>,
    next_contact_id: i32,
    next_address_id: i32,
}

/// Process-local store with the same semantics as the Postgres schema:
/// serial ids, owner-scoped contacts, cascading contact deletes.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn address_from(id: i32, contact_id: i32, input: &AddressInput) -> Address {
    Address {
        id,
        contact_id,
        street: input.street.clone(),
        city: input.city.clone(),
        province: input.province.clone(),
        country: input.country.clone(),
        postal_code: input.postal_code.clone(),
    }
}

fn contact_from(id: i32, username: &str, input: &ContactInput) -> Contact {
    Contact {
        id,
        username: username.to_string(),
        first_name: input.first_name.clone(),
        last_name: input.last_name.clone(),
        email: input.email.clone(),
        phone: input.phone.clone(),
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn count_users_by_username(&self, username: &str) -> Result<i64, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(i64::from(tables.users.contains_key(username)))
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.username) {
            return Err(DatabaseError::QueryError(format!(
                "duplicate key value violates unique constraint users_pkey ({})",
                user.username
            )));
        }
        let row = User {
            username: user.username,
            password: user.password,
            name: user.name,
            token: None,
        };
        tables.users.insert(row.username.clone(), row.clone());
        Ok(row)
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(username).cloned())
    }

    async fn find_user_by_token(&self, token: &str) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.token.as_deref() == Some(token))
            .cloned())
    }

    async fn update_user(
        &self,
        username: &str,
        update: UserUpdate,
    ) -> Result<Option<User>, DatabaseError> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.get_mut(username) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(password) = update.password {
            user.password = password;
        }
        Ok(Some(user.clone()))
    }

    async fn set_token(&self, username: &str, token: Option<String>) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(username) {
            Some(user) => {
                user.token = token;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ContactRepository for MemoryStore {
    async fn insert_contact(
        &self,
        username: &str,
        input: &ContactInput,
    ) -> Result<Contact, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(username) {
            return Err(DatabaseError::QueryError(format!(
                "foreign key violation: user {} does not exist",
                username
            )));
        }
        tables.next_contact_id += 1;
        let contact = contact_from(tables.next_contact_id, username, input);
        tables.contacts.insert(contact.id, contact.clone());
        Ok(contact)
    }

    async fn find_contact(&self, username: &str, id: i32) -> Result<Option<Contact>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .contacts
            .get(&id)
            .filter(|contact| contact.username == username)
            .cloned())
    }

    async fn count_contact(&self, username: &str, id: i32) -> Result<i64, DatabaseError> {
        Ok(i64::from(self.find_contact(username, id).await?.is_some()))
    }

    async fn update_contact(
        &self,
        username: &str,
        id: i32,
        input: &ContactInput,
    ) -> Result<Option<Contact>, DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.contacts.get_mut(&id) {
            Some(contact) if contact.username == username => {
                *contact = contact_from(id, username, input);
                Ok(Some(contact.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_contact(&self, username: &str, id: i32) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let owned = tables
            .contacts
            .get(&id)
            .map_or(false, |contact| contact.username == username);
        if !owned {
            return Ok(false);
        }
        tables.contacts.remove(&id);
        tables.addresses.retain(|_, address| address.contact_id != id);
        Ok(true)
    }

    async fn search_contacts(
        &self,
        username: &str,
        filter: &ContactFilter,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Contact>, DatabaseError> {
        let tables = self.tables.read().await;
        let skip = usize::try_from(skip).unwrap_or(0);
        let take = usize::try_from(take).unwrap_or(0);
        Ok(tables
            .contacts
            .values()
            .filter(|contact| contact.username == username && filter.matches(contact))
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn count_contacts(
        &self,
        username: &str,
        filter: &ContactFilter,
    ) -> Result<i64, DatabaseError> {
        let tables = self.tables.read().await;
        let count = tables
            .contacts
            .values()
            .filter(|contact| contact.username == username && filter.matches(contact))
            .count();
        i64::try_from(count).map_err(|e| DatabaseError::QueryError(e.to_string()))
    }
}

#[async_trait]
impl AddressRepository for MemoryStore {
    async fn insert_address(
        &self,
        contact_id: i32,
        input: &AddressInput,
    ) -> Result<Address, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.contacts.contains_key(&contact_id) {
            return Err(DatabaseError::QueryError(format!(
                "foreign key violation: contact {} does not exist",
                contact_id
            )));
        }
        tables.next_address_id += 1;
        let address = address_from(tables.next_address_id, contact_id, input);
        tables.addresses.insert(address.id, address.clone());
        Ok(address)
    }

    async fn find_address(
        &self,
        contact_id: i32,
        id: i32,
    ) -> Result<Option<Address>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .addresses
            .get(&id)
            .filter(|address| address.contact_id == contact_id)
            .cloned())
    }

    async fn update_address(
        &self,
        contact_id: i32,
        id: i32,
        input: &AddressInput,
    ) -> Result<Option<Address>, DatabaseError> {
        let mut tables = self.tables.write().await;
        match tables.addresses.get_mut(&id) {
            Some(address) if address.contact_id == contact_id => {
                *address = address_from(id, contact_id, input);
                Ok(Some(address.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_address(&self, contact_id: i32, id: i32) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        let linked = tables
            .addresses
            .get(&id)
            .map_or(false, |address| address.contact_id == contact_id);
        if linked {
            tables.addresses.remove(&id);
        }
        Ok(linked)
    }

    async fn list_addresses(&self, contact_id: i32) -> Result<Vec<Address>, DatabaseError> {
        let tables = self.tables.read().await;
        Ok(tables
            .addresses
            .values()
            .filter(|address| address.contact_id == contact_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
