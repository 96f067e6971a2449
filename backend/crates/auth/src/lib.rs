//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Value objects, entities, repository traits
//! - `application/` - OTP store, token service, use cases
//! - `infra/` - Redis, PostgreSQL and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, identity guard
//!
//! ## Features
//! - Passwordless login: phone number + 5-digit one-time passcode
//! - Users created on their first successful login
//! - Stateless HS256 bearer tokens (access and refresh)
//! - Authenticated user directory (profile, filtered listing)
//!
//! ## Security Model
//! - Codes drawn uniformly from the OS CSPRNG, live 2 minutes, single use
//! - At most 3 deliveries per phone per 10-minute window
//! - Constant-time code comparison
//! - OTP and token failures are reported with one generic message each
//! - Refresh tokens are never accepted as access credentials

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{postgres::PgUserRepository, redis::RedisOtpRepository};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::memory::{InMemoryOtpRepository, InMemoryUserRepository};
    pub use crate::infra::postgres::PgUserRepository as UserStore;
    pub use crate::infra::redis::RedisOtpRepository as CodeStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
