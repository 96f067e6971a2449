//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod otp_store;
pub mod request_otp;
pub mod token_service;
pub mod users;
pub mod validate_token;
pub mod verify_login;

// Re-exports
pub use config::AuthConfig;
pub use otp_store::OtpStore;
pub use request_otp::{RequestOtpInput, RequestOtpUseCase};
pub use token_service::{Claims, TokenService};
pub use users::{GetProfileUseCase, ListUsersInput, ListUsersUseCase};
pub use validate_token::ValidateTokenUseCase;
pub use verify_login::{VerifyLoginInput, VerifyLoginOutput, VerifyLoginUseCase};
