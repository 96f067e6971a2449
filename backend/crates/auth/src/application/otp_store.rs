//! OTP Store
//!
//! Issues, persists, checks and consumes one-time passcodes, and enforces
//! the per-phone delivery limit. Storage is behind [`OtpRepository`]; every
//! call to it is bounded by `AuthConfig::store_timeout`.

use std::future::Future;
use std::sync::Arc;

use platform::rate_limit::RateLimitResult;

use crate::application::config::AuthConfig;
use crate::domain::repository::OtpRepository;
use crate::domain::services::{otp_code_key, otp_rate_key};
use crate::domain::value_object::{otp_code::OtpCode, phone_number::PhoneNumber};
use crate::error::{AuthError, AuthResult};

pub struct OtpStore<O>
where
    O: OtpRepository + Send + Sync + 'static,
{
    repo: Arc<O>,
    config: Arc<AuthConfig>,
}

impl<O> Clone for OtpStore<O>
where
    O: OtpRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<O> OtpStore<O>
where
    O: OtpRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<O>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Fresh code, uniform over `10000..=99999`
    pub fn generate(&self) -> AuthResult<OtpCode> {
        Ok(OtpCode::generate()?)
    }

    /// Store `code` for `phone`, replacing any unconsumed code
    pub async fn save(&self, phone: &PhoneNumber, code: &OtpCode) -> AuthResult<()> {
        let key = otp_code_key(phone);
        self.bounded(self.repo.put_code(&key, code.as_str(), self.config.otp_ttl))
            .await
    }

    /// Succeeds once per issued code.
    ///
    /// A missing and a mismatched code both fail with `InvalidOtp`. A
    /// mismatch leaves the stored code in place. The delete after a match is
    /// best effort: if it fails the code stays usable until its TTL runs out.
    pub async fn verify_and_consume(&self, phone: &PhoneNumber, code: &OtpCode) -> AuthResult<()> {
        let key = otp_code_key(phone);

        let stored = self
            .bounded(self.repo.get_code(&key))
            .await?
            .ok_or(AuthError::InvalidOtp)?;

        if !code.matches(&stored) {
            return Err(AuthError::InvalidOtp);
        }

        if let Err(e) = self.bounded(self.repo.delete_code(&key)).await {
            tracing::warn!(phone = %phone, error = %e, "Failed to delete consumed OTP");
        }

        Ok(())
    }

    /// Count one delivery for `phone` and reject it past the limit.
    ///
    /// Rejected attempts still count, so a blocked phone stays blocked until
    /// its window expires.
    pub async fn check_and_increment_rate_limit(
        &self,
        phone: &PhoneNumber,
    ) -> AuthResult<RateLimitResult> {
        let limit = &self.config.otp_rate_limit;
        let key = otp_rate_key(phone);

        let count = self
            .bounded(self.repo.increment_window(&key, limit.window))
            .await?;
        let result = limit.evaluate(count);

        if !result.allowed {
            tracing::warn!(phone = %phone, count, "OTP delivery throttled");
            return Err(AuthError::RateLimitExceeded {
                max: limit.max_requests,
                window_minutes: self.config.otp_window_minutes(),
            });
        }

        Ok(result)
    }

    /// Send `code` to `phone`.
    ///
    /// There is no SMS gateway; delivery is a log event after the limit check.
    pub async fn deliver(&self, phone: &PhoneNumber, code: &OtpCode) -> AuthResult<()> {
        let result = self.check_and_increment_rate_limit(phone).await?;
        tracing::info!(phone = %phone, remaining = result.remaining, "OTP sent");
        tracing::debug!(phone = %phone, code = code.as_str(), "OTP code");
        Ok(())
    }

    async fn bounded<T>(&self, call: impl Future<Output = AuthResult<T>>) -> AuthResult<T> {
        tokio::time::timeout(self.config.store_timeout, call)
            .await
            .map_err(|_| AuthError::StoreTimeout)?
    }
}
