use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: i32,
    /// Owner. Kept out of response bodies.
    #[serde(skip)]
    pub username: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Validated contact fields, used for both insert and full overwrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInput {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Search filters, ANDed together with the owner scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFilter {
    /// Matches first_name or last_name
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactFilter {
    /// In-process evaluation of the filter, case-insensitive substring on each field.
    pub fn matches(&self, contact: &Contact) -> bool {
        let name_ok = self.name.as_deref().map_or(true, |needle| {
            contains_ignore_case(Some(&contact.first_name), needle)
                || contains_ignore_case(contact.last_name.as_deref(), needle)
        });
        let email_ok = self
            .email
            .as_deref()
            .map_or(true, |needle| contains_ignore_case(contact.email.as_deref(), needle));
        let phone_ok = self
            .phone
            .as_deref()
            .map_or(true, |needle| contains_ignore_case(contact.phone.as_deref(), needle));

        name_ok && email_ok && phone_ok
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(value) => value.to_lowercase().contains(&needle.to_lowercase()),
        None => false,
    }
}
