//! Token Service
//!
//! HS256 bearer tokens with a fixed claim shape. Access and refresh tokens
//! share one key and are told apart by the `refresh` claim; only access
//! tokens pass [`TokenService::validate`].

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::token_payload::TokenPayload;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Wire form of the token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: u32,
    pub exp: i64,
    /// Absent from tokens that carry only `userId` and `exp`
    #[serde(default)]
    pub iat: i64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub refresh: bool,
}

impl From<Claims> for TokenPayload {
    fn from(claims: Claims) -> Self {
        TokenPayload {
            user_id: UserId::new(claims.user_id),
            issued_at: claims.iat,
            expires_at: claims.exp,
            is_refresh: claims.refresh,
        }
    }
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    config: Arc<AuthConfig>,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(&config.jwt_secret),
            decoding: DecodingKey::from_secret(&config.jwt_secret),
            validation,
            config,
        }
    }

    /// Access token, valid for `access_token_ttl`
    pub fn issue_access(&self, user_id: UserId) -> AuthResult<String> {
        self.issue(user_id, self.config.access_token_ttl, false)
    }

    /// Refresh token, valid for `refresh_token_ttl`; never accepted by `validate`
    pub fn issue_refresh(&self, user_id: UserId) -> AuthResult<String> {
        self.issue(user_id, self.config.refresh_token_ttl, true)
    }

    /// Check signature and expiry and decode the payload.
    ///
    /// Every failure, including a well-signed refresh token, is `InvalidToken`.
    pub fn validate(&self, token: &str) -> AuthResult<TokenPayload> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AuthError::InvalidToken
        })?;

        if data.claims.refresh {
            tracing::debug!(user_id = data.claims.user_id, "Refresh token presented as access token");
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims.into())
    }

    fn issue(&self, user_id: UserId, ttl: Duration, refresh: bool) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(ttl.as_secs())
            .map_err(|_| AuthError::Internal("token lifetime out of range".into()))?;

        self.sign(&Claims {
            user_id: user_id.get(),
            exp: now.saturating_add(ttl),
            iat: now,
            refresh,
        })
    }

    fn sign(&self, claims: &Claims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(Arc::new(AuthConfig::with_secret(secret)))
    }

    #[test]
    fn test_access_round_trip() {
        let tokens = service("secret");
        for id in [0, 1, 42, u32::MAX] {
            let token = tokens.issue_access(UserId::new(id)).unwrap();
            let payload = tokens.validate(&token).unwrap();
            assert_eq!(payload.user_id, UserId::new(id));
            assert!(!payload.is_refresh);
            assert_eq!(payload.expires_at - payload.issued_at, 3600);
        }
    }

    #[test]
    fn test_refresh_token_rejected() {
        let tokens = service("secret");
        let token = tokens.issue_refresh(UserId::new(7)).unwrap();
        assert!(matches!(tokens.validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_access_token_omits_refresh_claim() {
        let tokens = service("secret");
        let token = tokens.issue_access(UserId::new(7)).unwrap();
        let body = token.split('.').nth(1).unwrap();
        let refresh = tokens.issue_refresh(UserId::new(7)).unwrap();
        let refresh_body = refresh.split('.').nth(1).unwrap();
        // Base64 of a body with an extra claim is longer
        assert!(body.len() < refresh_body.len());
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = service("secret");
        let now = Utc::now().timestamp();
        let token = tokens
            .sign(&Claims {
                user_id: 1,
                exp: now - 1,
                iat: now - 3601,
                refresh: false,
            })
            .unwrap();
        assert!(matches!(tokens.validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service("one").issue_access(UserId::new(1)).unwrap();
        assert!(matches!(
            service("two").validate(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        let tokens = service("secret");
        for raw in ["", "abc", "a.b.c", "Bearer x"] {
            assert!(matches!(tokens.validate(raw), Err(AuthError::InvalidToken)));
        }
    }

    #[test]
    fn test_token_without_iat_accepted() {
        let tokens = service("secret");
        let exp = Utc::now().timestamp() + 3600;
        let token = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "userId": 7, "exp": exp }),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        let payload = tokens.validate(&token).unwrap();
        assert_eq!(payload.user_id, UserId::new(7));
        assert_eq!(payload.expires_at, exp);
        assert_eq!(payload.issued_at, 0);
        assert!(!payload.is_refresh);
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let tokens = service("secret");
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: 1,
            exp: now + 60,
            iat: now,
            refresh: false,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();
        assert!(matches!(tokens.validate(&token), Err(AuthError::InvalidToken)));
    }
}
