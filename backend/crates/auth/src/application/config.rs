//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

pub use platform::rate_limit::RateLimitConfig;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC key for signing tokens (HS256)
    pub jwt_secret: Vec<u8>,
    /// Lifetime of an issued OTP (2 minutes)
    pub otp_ttl: Duration,
    /// OTP deliveries allowed per phone and window (3 per 10 minutes)
    pub otp_rate_limit: RateLimitConfig,
    /// Access token lifetime (1 hour)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (7 days)
    pub refresh_token_ttl: Duration,
    /// Deadline for each OTP store call
    pub store_timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            otp_ttl: Duration::from_secs(2 * 60),
            otp_rate_limit: RateLimitConfig::new(3, 10 * 60),
            access_token_ttl: Duration::from_secs(3600),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600),
            store_timeout: Duration::from_secs(2),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("otp_ttl", &self.otp_ttl)
            .field("otp_rate_limit", &self.otp_rate_limit)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("store_timeout", &self.store_timeout)
            .finish()
    }
}

impl AuthConfig {
    /// Create config with the given signing secret
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create config with a random signing secret (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self::with_secret(secret.to_vec())
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Rate limit window in whole minutes, for messages
    pub fn otp_window_minutes(&self) -> u64 {
        self.otp_rate_limit.window_secs() / 60
    }
}
