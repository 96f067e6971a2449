//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{OtpRepository, UserRepository};
use crate::infra::{postgres::PgUserRepository, redis::RedisOtpRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_bearer};

/// Create the Auth router with PostgreSQL users and Redis OTP storage
pub fn auth_router(users: PgUserRepository, otp: RedisOtpRepository, config: AuthConfig) -> Router {
    auth_router_generic(users, otp, config)
}

/// Create a generic Auth router for any repository implementations
pub fn auth_router_generic<U, O>(users: U, otp: O, config: AuthConfig) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    O: OtpRepository + Send + Sync + 'static,
{
    router_with_state(AuthAppState::new(
        Arc::new(users),
        Arc::new(otp),
        Arc::new(config),
    ))
}

/// Build the router around existing state
pub fn router_with_state<U, O>(state: AuthAppState<U, O>) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    O: OtpRepository + Send + Sync + 'static,
{
    let guard = AuthMiddlewareState {
        users: state.users.clone(),
        tokens: state.tokens.clone(),
    };

    let protected = Router::new()
        .route("/users/profile", get(handlers::profile::<U, O>))
        .route("/users", get(handlers::list_users::<U, O>))
        .route("/users/", get(handlers::list_users::<U, O>))
        .route_layer(middleware::from_fn_with_state(guard, require_bearer::<U>));

    Router::new()
        .route("/auth/request-otp", post(handlers::request_otp::<U, O>))
        .route("/auth/verify-otp", post(handlers::verify_otp::<U, O>))
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::otp_code_key;
    use crate::domain::value_object::phone_number::PhoneNumber;
    use crate::infra::memory::{InMemoryOtpRepository, InMemoryUserRepository};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    const PHONE: &str = "+15551234567";

    struct TestApp {
        router: Router,
        state: AuthAppState<InMemoryUserRepository, InMemoryOtpRepository>,
        otp_repo: Arc<InMemoryOtpRepository>,
    }

    fn app() -> TestApp {
        let otp_repo = Arc::new(InMemoryOtpRepository::new());
        let state = AuthAppState::new(
            Arc::new(InMemoryUserRepository::new()),
            otp_repo.clone(),
            Arc::new(AuthConfig::with_secret("router-test")),
        );
        TestApp {
            router: router_with_state(state.clone()),
            state,
            otp_repo,
        }
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_with_auth(uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn login(app: &TestApp) -> String {
        let (status, _) = send(
            &app.router,
            post_json("/auth/request-otp", json!({ "phone": PHONE })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let key = otp_code_key(&PhoneNumber::new(PHONE).unwrap());
        let code = app.otp_repo.get_code(&key).await.unwrap().unwrap();

        let (status, body) = send(
            &app.router,
            post_json("/auth/verify-otp", json!({ "phone": PHONE, "otp": code })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        body["jwt"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_request_otp_message() {
        let app = app();
        let (status, body) = send(
            &app.router,
            post_json("/auth/request-otp", json!({ "phone": PHONE })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({ "message": "otp sms sent successfully." }));
    }

    #[tokio::test]
    async fn test_request_otp_validation() {
        let app = app();
        for body in [json!({}), json!({ "phone": "123" })] {
            let (status, _) = send(&app.router, post_json("/auth/request-otp", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_request_otp_rate_limited() {
        let app = app();
        for _ in 0..3 {
            let (status, _) = send(
                &app.router,
                post_json("/auth/request-otp", json!({ "phone": PHONE })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, _) = send(
            &app.router,
            post_json("/auth/request-otp", json!({ "phone": PHONE })),
        )
        .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_verify_wrong_otp_unauthorized() {
        let app = app();
        send(
            &app.router,
            post_json("/auth/request-otp", json!({ "phone": PHONE })),
        )
        .await;

        let key = otp_code_key(&PhoneNumber::new(PHONE).unwrap());
        let code = app.otp_repo.get_code(&key).await.unwrap().unwrap();
        let wrong = if code == "99999" { "99998" } else { "99999" };

        let (status, body) = send(
            &app.router,
            post_json("/auth/verify-otp", json!({ "phone": PHONE, "otp": wrong })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["detail"], "invalid or expired otp");
    }

    #[tokio::test]
    async fn test_profile_with_token() {
        let app = app();
        let jwt = login(&app).await;

        let (status, body) = send(
            &app.router,
            get_with_auth("/users/profile", Some(format!("Bearer {}", jwt).as_str())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["phone"], PHONE);
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_guard_rejects_with_empty_body() {
        let app = app();
        let refresh = app
            .state
            .tokens
            .issue_refresh(crate::domain::value_object::user_id::UserId::new(1))
            .unwrap();
        let refresh_header = format!("Bearer {}", refresh);

        for auth in [None, Some(""), Some("Bearer garbage"), Some(refresh_header.as_str())] {
            for uri in ["/users/profile", "/users", "/users/"] {
                let (status, body) = send(&app.router, get_with_auth(uri, auth)).await;
                assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {:?}", uri, auth);
                assert!(body.is_empty());
            }
        }
    }

    #[tokio::test]
    async fn test_list_users() {
        let app = app();
        let jwt = login(&app).await;
        let auth = format!("Bearer {}", jwt);

        let (status, body) = send(
            &app.router,
            get_with_auth("/users?page=0&limit=0&search=555&created_to=not-a-date", Some(auth.as_str())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = send(
            &app.router,
            get_with_auth("/users/?page=2&limit=10", Some(auth.as_str())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_users_bad_paging_uses_defaults() {
        let app = app();
        let jwt = login(&app).await;
        let auth = format!("Bearer {}", jwt);

        let (status, body) = send(
            &app.router,
            get_with_auth("/users?page=abc&limit=-1", Some(auth.as_str())),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}
