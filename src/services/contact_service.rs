use std::sync::Arc;
use tracing::{debug, info};

use crate::database::models::Contact;
use crate::database::Store;
use crate::middleware::auth::AuthUser;
use crate::pagination::{Page, PageLimits, Paging};
use crate::services::ServiceError;
use crate::validation::{ContactRequest, SearchContactRequest};

const CONTACT_NOT_FOUND: &str = "Contact is not found";

pub(crate) fn contact_not_found() -> ServiceError {
    ServiceError::NotFound(CONTACT_NOT_FOUND.to_string())
}

/// Contact CRUD and search, always scoped to the calling user
pub struct ContactService {
    store: Arc<dyn Store>,
    limits: PageLimits,
}

impl ContactService {
    pub fn new(store: Arc<dyn Store>, limits: PageLimits) -> Self {
        Self { store, limits }
    }

    pub async fn create(&self, user: &AuthUser, request: ContactRequest) -> Result<Contact, ServiceError> {
        let input = request.into_input()?;
        let contact = self.store.insert_contact(&user.username, &input).await?;

        info!("Contact {} created for {}", contact.id, user.username);
        Ok(contact)
    }

    pub async fn get(&self, user: &AuthUser, contact_id: i32) -> Result<Contact, ServiceError> {
        debug!("Loading contact {} for {}", contact_id, user.username);
        self.store
            .find_contact(&user.username, contact_id)
            .await?
            .ok_or_else(contact_not_found)
    }

    pub async fn update(
        &self,
        user: &AuthUser,
        contact_id: i32,
        request: ContactRequest,
    ) -> Result<Contact, ServiceError> {
        let input = request.into_input()?;
        self.ensure_exists(user, contact_id).await?;

        // The row can disappear between the check and the write
        let contact = self
            .store
            .update_contact(&user.username, contact_id, &input)
            .await?
            .ok_or_else(contact_not_found)?;

        info!("Contact {} updated for {}", contact.id, user.username);
        Ok(contact)
    }

    pub async fn delete(&self, user: &AuthUser, contact_id: i32) -> Result<(), ServiceError> {
        self.ensure_exists(user, contact_id).await?;

        if !self.store.delete_contact(&user.username, contact_id).await? {
            return Err(contact_not_found());
        }

        info!("Contact {} deleted for {}", contact_id, user.username);
        Ok(())
    }

    pub async fn search(
        &self,
        user: &AuthUser,
        request: SearchContactRequest,
    ) -> Result<Page<Contact>, ServiceError> {
        let search = request.into_search(&self.limits)?;

        let items = self
            .store
            .search_contacts(&user.username, &search.filter, search.page.skip(), search.page.take())
            .await?;
        let total_item = self.store.count_contacts(&user.username, &search.filter).await?;

        debug!(
            "Contact search for {} returned {} of {} (page {})",
            user.username,
            items.len(),
            total_item,
            search.page.page
        );

        Ok(Page {
            items,
            paging: Paging::new(&search.page, total_item),
        })
    }

    async fn ensure_exists(&self, user: &AuthUser, contact_id: i32) -> Result<(), ServiceError> {
        if self.store.count_contact(&user.username, contact_id).await? != 1 {
            return Err(contact_not_found());
        }
        Ok(())
    }
}
