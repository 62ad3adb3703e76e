pub mod address_service;
pub mod contact_service;
pub mod user_service;

pub use address_service::AddressService;
pub use contact_service::ContactService;
pub use user_service::UserService;

use crate::database::manager::DatabaseError;
use crate::validation::ValidationErrors;

/// Business-level failures. Mapped to HTTP statuses by `ApiError`.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Missing, or owned by somebody else. The two are never distinguished.
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Password hashing failed: {0}")]
    Password(#[from] bcrypt::BcryptError),
}
