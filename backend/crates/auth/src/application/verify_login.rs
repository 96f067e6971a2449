//! Verify Login Use Case
//!
//! Exchanges a phone number and a valid OTP for an access token, creating
//! the user on first login.

use std::sync::Arc;

use crate::application::otp_store::OtpStore;
use crate::application::token_service::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::domain::value_object::{otp_code::OtpCode, phone_number::PhoneNumber};
use crate::error::{AuthError, AuthResult};

/// Verify login input
pub struct VerifyLoginInput {
    pub phone: String,
    pub otp: String,
}

/// Verify login output
#[derive(Debug)]
pub struct VerifyLoginOutput {
    pub access_token: String,
    pub user: User,
}

/// Verify login use case
pub struct VerifyLoginUseCase<U, O>
where
    U: UserRepository + Send + Sync + 'static,
    O: OtpRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    otp: OtpStore<O>,
    tokens: TokenService,
}

impl<U, O> VerifyLoginUseCase<U, O>
where
    U: UserRepository + Send + Sync + 'static,
    O: OtpRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, otp: OtpStore<O>, tokens: TokenService) -> Self {
        Self {
            user_repo,
            otp,
            tokens,
        }
    }

    pub async fn execute(&self, input: VerifyLoginInput) -> AuthResult<VerifyLoginOutput> {
        // Both inputs are checked before the store is touched
        let phone = PhoneNumber::new(input.phone)?;
        let code = OtpCode::parse(input.otp)?;

        self.otp.verify_and_consume(&phone, &code).await?;

        let user = match self.user_repo.find_by_phone(&phone).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => {
                let user = self.user_repo.create(&phone).await?;
                tracing::info!(user_id = %user.id, phone = %phone, "User created on first login");
                user
            }
            Err(e) => return Err(e),
        };

        let access_token = self.tokens.issue_access(user.id)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(VerifyLoginOutput { access_token, user })
    }
}
