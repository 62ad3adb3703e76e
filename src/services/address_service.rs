use std::sync::Arc;
use tracing::{debug, info};

use crate::database::models::Address;
use crate::database::Store;
use crate::middleware::auth::AuthUser;
use crate::services::contact_service::contact_not_found;
use crate::services::ServiceError;
use crate::validation::AddressRequest;

fn address_not_found() -> ServiceError {
    ServiceError::NotFound("Address is not found".to_string())
}

/// Address CRUD. Every call first resolves the parent contact through the
/// caller's ownership scope.
pub struct AddressService {
    store: Arc<dyn Store>,
}

impl AddressService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// NotFound unless `contact_id` exists and belongs to `user`
    pub async fn check_contact_exists(&self, user: &AuthUser, contact_id: i32) -> Result<i32, ServiceError> {
        if self.store.count_contact(&user.username, contact_id).await? != 1 {
            return Err(contact_not_found());
        }
        Ok(contact_id)
    }

    pub async fn create(
        &self,
        user: &AuthUser,
        contact_id: i32,
        request: AddressRequest,
    ) -> Result<Address, ServiceError> {
        let contact_id = self.check_contact_exists(user, contact_id).await?;
        let input = request.into_input()?;

        let address = self.store.insert_address(contact_id, &input).await?;
        info!("Address {} created for contact {}", address.id, contact_id);
        Ok(address)
    }

    pub async fn get(
        &self,
        user: &AuthUser,
        contact_id: i32,
        address_id: i32,
    ) -> Result<Address, ServiceError> {
        let contact_id = self.check_contact_exists(user, contact_id).await?;

        debug!("Loading address {} of contact {}", address_id, contact_id);
        self.store
            .find_address(contact_id, address_id)
            .await?
            .ok_or_else(address_not_found)
    }

    pub async fn update(
        &self,
        user: &AuthUser,
        contact_id: i32,
        address_id: i32,
        request: AddressRequest,
    ) -> Result<Address, ServiceError> {
        let contact_id = self.check_contact_exists(user, contact_id).await?;
        let input = request.into_input()?;

        if self.store.find_address(contact_id, address_id).await?.is_none() {
            return Err(address_not_found());
        }

        let address = self
            .store
            .update_address(contact_id, address_id, &input)
            .await?
            .ok_or_else(address_not_found)?;

        info!("Address {} updated for contact {}", address.id, contact_id);
        Ok(address)
    }

    pub async fn delete(
        &self,
        user: &AuthUser,
        contact_id: i32,
        address_id: i32,
    ) -> Result<(), ServiceError> {
        let contact_id = self.check_contact_exists(user, contact_id).await?;

        if !self.store.delete_address(contact_id, address_id).await? {
            return Err(address_not_found());
        }

        info!("Address {} deleted from contact {}", address_id, contact_id);
        Ok(())
    }

    pub async fn list(&self, user: &AuthUser, contact_id: i32) -> Result<Vec<Address>, ServiceError> {
        let contact_id = self.check_contact_exists(user, contact_id).await?;
        Ok(self.store.list_addresses(contact_id).await?)
    }
}
