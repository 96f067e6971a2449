//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! OTP and token failures each render one fixed message no matter which
//! check failed, so the endpoints cannot be used as an oracle.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed phone number or OTP, rejected before any store access
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Too many OTP deliveries for this phone in the current window
    #[error("rate limit exceeded: max {max} OTPs per {window_minutes} minutes")]
    RateLimitExceeded { max: u32, window_minutes: u64 },

    /// Wrong, expired or never-issued code
    #[error("invalid or expired otp")]
    InvalidOtp,

    /// No credential supplied
    #[error("missing token")]
    MissingToken,

    /// Bad signature, expired, malformed, or a refresh token
    #[error("invalid token")]
    InvalidToken,

    /// User lookup miss
    #[error("User not found")]
    UserNotFound,

    /// OTP store transport error
    #[error("OTP store error: {0}")]
    Store(#[from] redis::RedisError),

    /// OTP store call exceeded its deadline; outcome unknown
    #[error("OTP store timed out")]
    StoreTimeout,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::RateLimitExceeded { .. } => ErrorKind::TooManyRequests,
            AuthError::InvalidOtp | AuthError::MissingToken | AuthError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Store(_) | AuthError::StoreTimeout => ErrorKind::ServiceUnavailable,
            AuthError::Database(e) if is_unique_violation(e) => ErrorKind::Conflict,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Infrastructure details stay in the logs; clients get the kind's
    /// reason phrase instead.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        match self {
            AuthError::RateLimitExceeded { .. } => AppError::new(kind, self.to_string())
                .with_action("Wait for the current window to expire before requesting a new code"),
            AuthError::Store(_)
            | AuthError::StoreTimeout
            | AuthError::Database(_)
            | AuthError::Internal(_) => AppError::new(kind, kind.as_str()),
            _ => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Store(e) => {
                tracing::error!(error = %e, "OTP store error");
            }
            AuthError::StoreTimeout => {
                tracing::error!("OTP store call timed out");
            }
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::RateLimitExceeded { .. } => {
                tracing::warn!("OTP rate limit exceeded");
            }
            AuthError::InvalidOtp => {
                tracing::warn!("Invalid OTP attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<platform::crypto::EntropyError> for AuthError {
    fn from(err: platform::crypto::EntropyError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AuthError, StatusCode)> = vec![
            (AuthError::Validation("phone".into()), StatusCode::BAD_REQUEST),
            (
                AuthError::RateLimitExceeded {
                    max: 3,
                    window_minutes: 10,
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (AuthError::InvalidOtp, StatusCode::UNAUTHORIZED),
            (AuthError::MissingToken, StatusCode::UNAUTHORIZED),
            (AuthError::InvalidToken, StatusCode::UNAUTHORIZED),
            (AuthError::UserNotFound, StatusCode::NOT_FOUND),
            (AuthError::StoreTimeout, StatusCode::SERVICE_UNAVAILABLE),
            (
                AuthError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AuthError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status);
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_messages_are_generic() {
        assert_eq!(AuthError::InvalidOtp.to_string(), "invalid or expired otp");
        assert_eq!(AuthError::InvalidToken.to_string(), "invalid token");
        assert_eq!(
            AuthError::RateLimitExceeded {
                max: 3,
                window_minutes: 10
            }
            .to_string(),
            "rate limit exceeded: max 3 OTPs per 10 minutes"
        );
    }

    #[test]
    fn test_internal_details_not_exposed() {
        let app = AuthError::Internal("secret detail".into()).to_app_error();
        assert!(!app.message().contains("secret detail"));
        assert_eq!(app.message(), "Internal Server Error");
    }

    #[test]
    fn test_from_app_error_bad_request_is_validation() {
        let err: AuthError = AppError::bad_request("phone is required").into();
        assert!(matches!(err, AuthError::Validation(ref m) if m == "phone is required"));
    }
}
