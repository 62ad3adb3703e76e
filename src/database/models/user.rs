use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `users` table. Never rendered directly: see [`UserProfile`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub username: String,
    pub password: String,
    pub name: String,
    pub token: Option<String>,
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub name: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
        }
    }
}

/// Insert payload; `password` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
}

/// Partial profile change. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
}
