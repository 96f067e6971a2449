//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use std::time::Duration;

use crate::domain::entity::user::{User, UserFilter};
use crate::domain::value_object::{phone_number::PhoneNumber, user_id::UserId};
use crate::error::AuthResult;

/// User store
///
/// Lookups report a missing user as `AuthError::UserNotFound`; every other
/// failure comes back as a different variant and must not be mistaken for
/// "not found".
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by phone number
    async fn find_by_phone(&self, phone: &PhoneNumber) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<User>;

    /// Create a user; the store assigns `id` and `created_at`
    async fn create(&self, phone: &PhoneNumber) -> AuthResult<User>;

    /// Filtered page of users, ordered by id ascending
    async fn list(&self, filter: &UserFilter) -> AuthResult<Vec<User>>;
}

/// Ephemeral key/value store backing OTP codes and delivery counters
#[trait_variant::make(OtpRepository: Send)]
pub trait LocalOtpRepository {
    /// Store `code` under `key` for `ttl`, replacing any previous value
    async fn put_code(&self, key: &str, code: &str, ttl: Duration) -> AuthResult<()>;

    /// Current value under `key`, `None` when never set or expired
    async fn get_code(&self, key: &str) -> AuthResult<Option<String>>;

    /// Remove `key`
    async fn delete_code(&self, key: &str) -> AuthResult<()>;

    /// Atomically increment the counter under `key` and return the new value.
    ///
    /// The expiry is set to `window` only when the counter goes from 0 to 1,
    /// so the window is fixed from the first increment.
    async fn increment_window(&self, key: &str, window: Duration) -> AuthResult<u64>;
}
