//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ListUsersInput;
use crate::domain::entity::user::User;

// ============================================================================
// OTP
// ============================================================================

/// Request OTP request
///
/// Absent fields deserialize as empty so they fail phone validation with a
/// 400 instead of a JSON rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestOtpRequest {
    #[serde(default)]
    pub phone: String,
}

/// Verify OTP request
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub otp: String,
}

/// Verify OTP response
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpResponse {
    pub jwt: String,
}

/// Plain message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Users
// ============================================================================

/// User response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: u32,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            phone: user.phone.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

/// List users query string
///
/// Paging values that are not unsigned integers fall back to the defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    /// RFC 3339; ignored when unparseable
    pub created_from: Option<String>,
    /// RFC 3339; ignored when unparseable
    pub created_to: Option<String>,
}

impl From<ListUsersQuery> for ListUsersInput {
    fn from(q: ListUsersQuery) -> Self {
        ListUsersInput {
            page: q.page.as_deref().map_or(0, parse_count),
            limit: q.limit.as_deref().map_or(0, parse_count),
            search: q.search,
            created_from: q.created_from.as_deref().and_then(parse_timestamp),
            created_to: q.created_to.as_deref().and_then(parse_timestamp),
        }
    }
}

fn parse_count(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
