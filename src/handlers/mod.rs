// handlers/mod.rs - two security tiers
//
// Public (no token) → Protected (token resolved to an AuthUser)

pub mod health;
pub mod protected;
pub mod public;

pub use health::health;
