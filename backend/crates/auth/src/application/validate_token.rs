//! Validate Token Use Case
//!
//! Resolves a raw `Authorization` header value to the user it names.

use std::sync::Arc;

use platform::header::parse_bearer;

use crate::application::token_service::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Validate token use case
pub struct ValidateTokenUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    tokens: TokenService,
}

impl<U> ValidateTokenUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, tokens: TokenService) -> Self {
        Self { user_repo, tokens }
    }

    /// Trim, strip one `bearer ` prefix (any case), trim again, then check
    /// the token and load its user.
    pub async fn execute(&self, raw_header: &str) -> AuthResult<User> {
        let token = parse_bearer(raw_header).ok_or(AuthError::MissingToken)?;
        let payload = self.tokens.validate(token)?;
        self.user_repo.find_by_id(payload.user_id).await
    }

    /// Just check if the header resolves to a user
    pub async fn is_valid(&self, raw_header: &str) -> bool {
        self.execute(raw_header).await.is_ok()
    }
}
