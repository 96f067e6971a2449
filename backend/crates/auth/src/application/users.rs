//! User Directory Use Cases
//!
//! Read-only access to the user store for authenticated callers.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entity::user::{User, UserFilter};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Get profile use case
pub struct GetProfileUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: UserId) -> AuthResult<User> {
        self.user_repo.find_by_id(user_id).await
    }
}

/// List users input. Zero means "use the default" for both paging fields.
#[derive(Debug, Clone, Default)]
pub struct ListUsersInput {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl ListUsersInput {
    /// Resolve paging into a store filter
    pub fn to_filter(&self) -> UserFilter {
        let page = self.page.max(1);
        let limit = match self.limit {
            0 => DEFAULT_PAGE_LIMIT,
            n => n.min(MAX_PAGE_LIMIT),
        };

        UserFilter {
            skip: (page - 1).saturating_mul(limit),
            limit,
            phone_contains: self.search.clone().filter(|s| !s.is_empty()),
            created_from: self.created_from,
            created_to: self.created_to,
        }
    }
}

/// List users use case
pub struct ListUsersUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
}

impl<U> ListUsersUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: ListUsersInput) -> AuthResult<Vec<User>> {
        let filter = input.to_filter();
        tracing::debug!(skip = filter.skip, limit = filter.limit, "Listing users");
        self.user_repo.list(&filter).await
    }
}
