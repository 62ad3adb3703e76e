//! Request schemas and their validation.
//!
//! Every schema is a serde-deserializable request type whose fields are all
//! optional at the type level, so a missing field becomes a validation error
//! rather than a deserialization failure. Validation never aborts early: the
//! resulting [`ValidationErrors`] names every failing field.
//!
//! Text fields are trimmed before the rules run, so a whitespace-only value
//! fails `length(min = 1)` and the stored value carries no padding. Passwords
//! are the exception and are taken verbatim.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::database::models::{AddressInput, ContactFilter, ContactInput, UserUpdate};
use crate::pagination::{PageLimits, PageRequest};

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    /// `Ok(value)` when nothing was recorded
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let errors: Vec<String> = self
            .fields
            .iter()
            .flat_map(|(field, msgs)| msgs.iter().map(move |m| format!("{} {}", field, m)))
            .collect();
        write!(f, "{}", errors.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut errors = ValidationErrors::new();
        for (field, field_errors) in e.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("is invalid ({})", error.code));
                errors.add(field.to_string(), message);
            }
        }
        errors
    }
}

/// Contact create/update schema
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 100, message = "must be between 1 and 100 characters")
    )]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub last_name: Option<String>,

    #[validate(
        email(message = "must be a valid email"),
        length(min = 1, max = 100, message = "must be between 1 and 100 characters")
    )]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 20, message = "must be between 1 and 20 characters"))]
    pub phone: Option<String>,
}

impl ContactRequest {
    pub fn into_input(self) -> Result<ContactInput, ValidationErrors> {
        let request = Self {
            first_name: trimmed(self.first_name),
            last_name: trimmed(self.last_name),
            email: trimmed(self.email),
            phone: trimmed(self.phone),
        };
        request.validate()?;
        Ok(ContactInput {
            first_name: request.first_name.unwrap_or_default(),
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
        })
    }
}

/// Address create/update schema
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AddressRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub street: Option<String>,

    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub city: Option<String>,

    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub province: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 1, max = 100, message = "must be between 1 and 100 characters")
    )]
    pub country: Option<String>,

    #[validate(length(min = 1, max = 10, message = "must be between 1 and 10 characters"))]
    pub postal_code: Option<String>,
}

impl AddressRequest {
    pub fn into_input(self) -> Result<AddressInput, ValidationErrors> {
        let request = Self {
            street: trimmed(self.street),
            city: trimmed(self.city),
            province: trimmed(self.province),
            country: trimmed(self.country),
            postal_code: trimmed(self.postal_code),
        };
        request.validate()?;
        Ok(AddressInput {
            street: request.street,
            city: request.city,
            province: request.province,
            country: request.country.unwrap_or_default(),
            postal_code: request.postal_code,
        })
    }
}

/// Contact search query string. Values arrive as text and are coerced here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchContactRequest {
    pub page: Option<String>,
    pub size: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSearch {
    pub page: PageRequest,
    pub filter: ContactFilter,
}

impl SearchContactRequest {
    pub fn into_search(self, limits: &PageLimits) -> Result<ContactSearch, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let page = parse_positive(&mut errors, "page", self.page.as_deref(), 1, None);
        let size = parse_positive(
            &mut errors,
            "size",
            self.size.as_deref(),
            limits.default_size,
            Some(limits.max_size),
        );

        let search = ContactSearch {
            page: PageRequest { page, size },
            filter: ContactFilter {
                name: non_blank(self.name),
                email: non_blank(self.email),
                phone: non_blank(self.phone),
            },
        };
        errors.into_result(search)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    trimmed(value).filter(|v| !v.is_empty())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Coerce a positive integer query parameter; blank or absent means `default`.
fn parse_positive(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<&str>,
    default: i64,
    max: Option<i64>,
) -> i64 {
    let raw = match raw.map(str::trim) {
        None | Some("") => return default,
        Some(raw) => raw,
    };
    match raw.parse::<i64>() {
        Ok(value) if value < 1 => {
            errors.add(field, "must be a positive integer");
            default
        }
        Ok(value) => match max {
            Some(max) if value > max => {
                errors.add(field, format!("must be less than or equal to {}", max));
                default
            }
            _ => value,
        },
        Err(_) => {
            errors.add(field, "must be a number");
            default
        }
    }
}

/// User registration schema
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 100, message = "must be between 1 and 100 characters")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 1, max = 100, message = "must be between 1 and 100 characters")
    )]
    pub password: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 1, max = 100, message = "must be between 1 and 100 characters")
    )]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub name: String,
}

impl RegisterUserRequest {
    pub fn into_registration(self) -> Result<Registration, ValidationErrors> {
        let request = Self {
            username: trimmed(self.username),
            password: self.password,
            name: trimmed(self.name),
        };
        request.validate()?;
        Ok(Registration {
            username: request.username.unwrap_or_default(),
            password: request.password.unwrap_or_default(),
            name: request.name.unwrap_or_default(),
        })
    }
}

/// Login schema
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginUserRequest {
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 100, message = "must be between 1 and 100 characters")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "is required"),
        length(min = 1, max = 100, message = "must be between 1 and 100 characters")
    )]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl LoginUserRequest {
    pub fn into_credentials(self) -> Result<Credentials, ValidationErrors> {
        let request = Self {
            username: trimmed(self.username),
            password: self.password,
        };
        request.validate()?;
        Ok(Credentials {
            username: request.username.unwrap_or_default(),
            password: request.password.unwrap_or_default(),
        })
    }
}

/// Profile update schema. Both fields optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// The returned password is still plain text; hashing belongs to the user service.
    pub fn into_update(self) -> Result<UserUpdate, ValidationErrors> {
        let request = Self {
            name: trimmed(self.name),
            password: self.password,
        };
        request.validate()?;
        Ok(UserUpdate {
            name: request.name,
            password: request.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> PageLimits {
        PageLimits {
            default_size: 10,
            max_size: 100,
        }
    }

    #[test]
    fn minimal_contact_is_valid() {
        let request = ContactRequest {
            first_name: Some("Askar".to_string()),
            ..Default::default()
        };
        let input = request.into_input().unwrap();
        assert_eq!(input.first_name, "Askar");
        assert!(input.last_name.is_none());
        assert!(input.email.is_none());
    }

    #[test]
    fn contact_errors_name_every_failing_field() {
        let request = ContactRequest {
            first_name: Some(String::new()),
            last_name: Some(String::new()),
            email: Some("lasdlaksld".to_string()),
            phone: Some("0892839280302930920392038923743028928492833".to_string()),
        };
        let errors = request.into_input().unwrap_err();
        let fields: Vec<&str> = errors.fields().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["email", "first_name", "last_name", "phone"]);
    }

    #[test]
    fn missing_first_name_is_required() {
        let errors = ContactRequest::default().into_input().unwrap_err();
        assert_eq!(errors.fields()["first_name"], vec!["is required".to_string()]);
    }

    #[test]
    fn contact_lengths_count_characters() {
        let request = ContactRequest {
            first_name: Some("é".repeat(100)),
            ..Default::default()
        };
        assert!(request.into_input().is_ok());

        let request = ContactRequest {
            first_name: Some("é".repeat(101)),
            ..Default::default()
        };
        assert!(request.into_input().is_err());
    }

    #[test]
    fn contact_fields_are_trimmed() {
        let request = ContactRequest {
            first_name: Some("  Askar  ".to_string()),
            last_name: Some(" Prayogo".to_string()),
            email: Some(" askar@example.com ".to_string()),
            phone: None,
        };
        let input = request.into_input().unwrap();
        assert_eq!(input.first_name, "Askar");
        assert_eq!(input.last_name.as_deref(), Some("Prayogo"));
        assert_eq!(input.email.as_deref(), Some("askar@example.com"));
    }

    #[test]
    fn whitespace_only_values_are_blank() {
        let request = ContactRequest {
            first_name: Some("   ".to_string()),
            last_name: Some("  x  ".to_string()),
            ..Default::default()
        };
        let errors = request.into_input().unwrap_err();
        assert!(errors.fields().contains_key("first_name"));
        assert!(!errors.fields().contains_key("last_name"));

        let request = AddressRequest {
            country: Some("\t ".to_string()),
            ..Default::default()
        };
        assert!(request.into_input().unwrap_err().fields().contains_key("country"));

        let request = RegisterUserRequest {
            username: Some("  ".to_string()),
            password: Some("rahasia".to_string()),
            name: Some("Askar".to_string()),
        };
        assert!(request.into_registration().unwrap_err().fields().contains_key("username"));
    }

    #[test]
    fn passwords_are_kept_verbatim() {
        let request = LoginUserRequest {
            username: Some(" test ".to_string()),
            password: Some(" rahasia ".to_string()),
        };
        let credentials = request.into_credentials().unwrap();
        assert_eq!(credentials.username, "test");
        assert_eq!(credentials.password, " rahasia ");
    }

    #[test]
    fn address_requires_country() {
        let request = AddressRequest {
            street: Some("Jl. Test".to_string()),
            ..Default::default()
        };
        let errors = request.into_input().unwrap_err();
        assert!(errors.fields().contains_key("country"));
        assert_eq!(errors.fields().len(), 1);
    }

    #[test]
    fn address_rejects_blank_optional_fields() {
        let request = AddressRequest {
            street: Some(String::new()),
            city: Some(String::new()),
            province: Some(String::new()),
            country: Some("indonesia".to_string()),
            postal_code: Some(String::new()),
        };
        let errors = request.into_input().unwrap_err();
        assert_eq!(errors.fields().len(), 4);
    }

    #[test]
    fn address_postal_code_is_bounded() {
        let request = AddressRequest {
            country: Some("Indonesia".to_string()),
            postal_code: Some("12345678901".to_string()),
            ..Default::default()
        };
        assert!(request.into_input().unwrap_err().fields().contains_key("postal_code"));
    }

    #[test]
    fn search_defaults() {
        let search = SearchContactRequest::default().into_search(&limits()).unwrap();
        assert_eq!(search.page, PageRequest { page: 1, size: 10 });
        assert_eq!(search.filter, ContactFilter::default());
    }

    #[test]
    fn search_coerces_numbers_and_filters() {
        let request = SearchContactRequest {
            page: Some("2".to_string()),
            size: Some(" 5 ".to_string()),
            name: Some("test".to_string()),
            email: Some(String::new()),
            ..Default::default()
        };
        let search = request.into_search(&limits()).unwrap();
        assert_eq!(search.page, PageRequest { page: 2, size: 5 });
        assert_eq!(search.filter.name.as_deref(), Some("test"));
        assert!(search.filter.email.is_none());

        let request = SearchContactRequest {
            name: Some("  test ".to_string()),
            email: Some("   ".to_string()),
            ..Default::default()
        };
        let search = request.into_search(&limits()).unwrap();
        assert_eq!(search.filter.name.as_deref(), Some("test"));
        assert!(search.filter.email.is_none());
    }

    #[test]
    fn search_rejects_bad_paging() {
        let request = SearchContactRequest {
            page: Some("0".to_string()),
            size: Some("abc".to_string()),
            ..Default::default()
        };
        let errors = request.into_search(&limits()).unwrap_err();
        assert_eq!(errors.fields()["page"], vec!["must be a positive integer".to_string()]);
        assert_eq!(errors.fields()["size"], vec!["must be a number".to_string()]);

        let request = SearchContactRequest {
            size: Some("101".to_string()),
            ..Default::default()
        };
        assert!(request.into_search(&limits()).is_err());
    }

    #[test]
    fn registration_requires_all_fields() {
        let errors = RegisterUserRequest::default().into_registration().unwrap_err();
        assert_eq!(errors.fields().len(), 3);
    }

    #[test]
    fn update_accepts_empty_body() {
        let update = UpdateUserRequest::default().into_update().unwrap();
        assert!(update.name.is_none());
        assert!(update.password.is_none());
    }

    #[test]
    fn display_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.add("country", "is required");
        errors.add("postal_code", "must be between 1 and 10 characters");
        assert_eq!(
            errors.to_string(),
            "country is required, postal_code must be between 1 and 10 characters"
        );
    }
}
