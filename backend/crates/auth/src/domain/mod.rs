//! Domain Layer
//!
//! Contains entities, value objects, repository traits and pure services.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{token_payload::TokenPayload, user::User, user::UserFilter};
pub use repository::{OtpRepository, UserRepository};
