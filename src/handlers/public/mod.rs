// handlers/public/mod.rs - endpoints that run without a token

pub mod users;

pub use users::login as user_login;
pub use users::register as user_register;
