//! Auth Middleware
//!
//! Identity guard for protected routes. A request either carries a bearer
//! token that resolves to a user, or it is answered with a bare 401.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::header::authorization;

use crate::application::{TokenService, ValidateTokenUseCase};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;

/// Middleware state
pub struct AuthMiddlewareState<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub tokens: TokenService,
}

impl<U> Clone for AuthMiddlewareState<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

/// Resolved caller, stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that requires a valid bearer token
pub async fn require_bearer<U>(
    State(state): State<AuthMiddlewareState<U>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    U: UserRepository + Send + Sync + 'static,
{
    // Owned copy; the request body is not Sync and cannot be borrowed across an await
    let header = authorization(req.headers()).to_owned();

    let use_case = ValidateTokenUseCase::new(state.users.clone(), state.tokens.clone());

    let user = match use_case.execute(&header).await {
        Ok(user) => user,
        Err(e) => {
            tracing::debug!(error = %e, path = %req.uri().path(), "Request rejected by identity guard");
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    tracing::debug!(user_id = %user.id, "Request authenticated");
    req.extensions_mut().insert(CurrentUser(user));

    next.run(req).await
}
