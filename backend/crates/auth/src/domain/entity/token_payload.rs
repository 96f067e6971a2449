//! Token Payload
//!
//! What a validated bearer token says about its holder. There is no server
//! side record behind it; validity lives entirely in the signature and the
//! embedded expiry.

use crate::domain::value_object::user_id::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPayload {
    pub user_id: UserId,
    /// Unix seconds
    pub issued_at: i64,
    /// Unix seconds
    pub expires_at: i64,
    pub is_refresh: bool,
}
