//! HTTP Handlers

use axum::extract::{Query, State};
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    GetProfileUseCase, ListUsersUseCase, OtpStore, RequestOtpInput, RequestOtpUseCase,
    TokenService, VerifyLoginInput, VerifyLoginUseCase,
};
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    ListUsersQuery, MessageResponse, RequestOtpRequest, UserResponse, VerifyOtpRequest,
    VerifyOtpResponse,
};
use crate::presentation::middleware::CurrentUser;

pub const OTP_SENT_MESSAGE: &str = "otp sms sent successfully.";

/// Shared state for auth handlers
pub struct AuthAppState<U, O>
where
    U: UserRepository + Send + Sync + 'static,
    O: OtpRepository + Send + Sync + 'static,
{
    pub users: Arc<U>,
    pub otp: OtpStore<O>,
    pub tokens: TokenService,
    pub config: Arc<AuthConfig>,
}

impl<U, O> AuthAppState<U, O>
where
    U: UserRepository + Send + Sync + 'static,
    O: OtpRepository + Send + Sync + 'static,
{
    pub fn new(users: Arc<U>, otp: Arc<O>, config: Arc<AuthConfig>) -> Self {
        Self {
            users,
            otp: OtpStore::new(otp, config.clone()),
            tokens: TokenService::new(config.clone()),
            config,
        }
    }
}

impl<U, O> Clone for AuthAppState<U, O>
where
    U: UserRepository + Send + Sync + 'static,
    O: OtpRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            otp: self.otp.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// OTP
// ============================================================================

/// POST /auth/request-otp
pub async fn request_otp<U, O>(
    State(state): State<AuthAppState<U, O>>,
    Json(req): Json<RequestOtpRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    O: OtpRepository + Send + Sync + 'static,
{
    let use_case = RequestOtpUseCase::new(state.otp.clone());

    use_case
        .execute(RequestOtpInput { phone: req.phone })
        .await?;

    Ok(Json(MessageResponse::new(OTP_SENT_MESSAGE)))
}

/// POST /auth/verify-otp
pub async fn verify_otp<U, O>(
    State(state): State<AuthAppState<U, O>>,
    Json(req): Json<VerifyOtpRequest>,
) -> AuthResult<Json<VerifyOtpResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    O: OtpRepository + Send + Sync + 'static,
{
    let use_case = VerifyLoginUseCase::new(
        state.users.clone(),
        state.otp.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(VerifyLoginInput {
            phone: req.phone,
            otp: req.otp,
        })
        .await?;

    Ok(Json(VerifyOtpResponse {
        jwt: output.access_token,
    }))
}

// ============================================================================
// Users
// ============================================================================

/// GET /users/profile
pub async fn profile<U, O>(
    State(state): State<AuthAppState<U, O>>,
    Extension(current): Extension<CurrentUser>,
) -> AuthResult<Json<UserResponse>>
where
    U: UserRepository + Send + Sync + 'static,
    O: OtpRepository + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.users.clone());
    let user = use_case.execute(current.0.id).await?;
    Ok(Json(user.into()))
}

/// GET /users
pub async fn list_users<U, O>(
    State(state): State<AuthAppState<U, O>>,
    Query(query): Query<ListUsersQuery>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    U: UserRepository + Send + Sync + 'static,
    O: OtpRepository + Send + Sync + 'static,
{
    let use_case = ListUsersUseCase::new(state.users.clone());
    let users = use_case.execute(query.into()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
