pub mod address;
pub mod contact;
pub mod user;

pub use address::{Address, AddressInput};
pub use contact::{Contact, ContactFilter, ContactInput};
pub use user::{NewUser, User, UserProfile, UserUpdate};
