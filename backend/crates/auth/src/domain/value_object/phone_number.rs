//! Phone Number Value Object
//!
//! A phone number is the identity key of a user. It is kept exactly as the
//! client submitted it: no trimming and no E.164 canonicalisation, so
//! `"+15551234567"` and `"15551234567"` are different identities.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;
use std::str::FromStr;

/// Minimum phone length in characters
pub const PHONE_MIN_LENGTH: usize = 8;
/// Maximum phone length in characters
pub const PHONE_MAX_LENGTH: usize = 20;

/// Validated phone number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate user input
    pub fn new(phone: impl Into<String>) -> AppResult<Self> {
        let phone = phone.into();
        let length = phone.chars().count();

        if length == 0 {
            return Err(AppError::bad_request("phone is required"));
        }

        if !(PHONE_MIN_LENGTH..=PHONE_MAX_LENGTH).contains(&length) {
            return Err(AppError::bad_request(format!(
                "phone must be between {} and {} characters",
                PHONE_MIN_LENGTH, PHONE_MAX_LENGTH
            )));
        }

        Ok(Self(phone))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PhoneNumber {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        PhoneNumber::new(s)
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
