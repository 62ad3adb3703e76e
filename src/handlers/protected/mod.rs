// handlers/protected/mod.rs - endpoints behind token authentication
//
// Every handler here receives the caller as `Extension<AuthUser>`, inserted
// by `token_auth_middleware`, and only ever touches that user's rows.

pub mod addresses;
pub mod contacts;
pub mod users;

pub use users::current as user_current;
pub use users::logout as user_logout;
pub use users::update as user_update;

pub use contacts::create as contact_create;
pub use contacts::delete as contact_delete;
pub use contacts::get as contact_get;
pub use contacts::search as contact_search;
pub use contacts::update as contact_update;

pub use addresses::create as address_create;
pub use addresses::delete as address_delete;
pub use addresses::get as address_get;
pub use addresses::list as address_list;
pub use addresses::update as address_update;
