//! User Entity
//!
//! Owned by the user store. The auth flow only reads users and creates one
//! the first time a phone number completes an OTP login.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{phone_number::PhoneNumber, user_id::UserId};

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier
    pub id: UserId,
    /// Identity key
    pub phone: PhoneNumber,
    /// Store-assigned creation time
    pub created_at: DateTime<Utc>,
}

/// Listing criteria for the user directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub skip: u32,
    pub limit: u32,
    /// Case-insensitive substring of the phone number
    pub phone_contains: Option<String>,
    /// Inclusive lower bound on `created_at`
    pub created_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`
    pub created_to: Option<DateTime<Utc>>,
}

impl UserFilter {
    /// Whether `user` satisfies the non-paging criteria
    pub fn matches(&self, user: &User) -> bool {
        if let Some(term) = self.phone_contains.as_deref().filter(|t| !t.is_empty()) {
            let phone = user.phone.as_str().to_lowercase();
            if !phone.contains(&term.to_lowercase()) {
                return false;
            }
        }
        if self.created_from.is_some_and(|from| user.created_at < from) {
            return false;
        }
        if self.created_to.is_some_and(|to| user.created_at > to) {
            return false;
        }
        true
    }
}
