//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use anyhow::Context;
use auth::{PgUserRepository, RedisOtpRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, StatusCode, header},
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ApiConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;

    // Initialize tracing
    let filter = config.log_filter(std::env::var("RUST_LOG").ok());
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&filter).context("invalid log filter")?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.ephemeral_secret {
        tracing::warn!("JWT_SECRET not set, signing with a random secret; tokens will not survive a restart");
    }

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to PostgreSQL")?;

    let users = PgUserRepository::new(pool.clone());
    users.ping().await.context("PostgreSQL ping failed")?;

    tracing::info!("Connected to database");

    // Run migrations
    if config.run_migrations {
        sqlx::migrate!("../../../database/migrations")
            .run(&pool)
            .await?;

        tracing::info!("Migrations completed");
    }

    // OTP store
    let otp = RedisOtpRepository::connect(&config.redis_url)
        .await
        .context("failed to connect to Redis")?;
    otp.ping().await.context("Redis ping failed")?;

    tracing::info!("Connected to Redis");

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .nest("/api/v1", auth_router(users, otp, config.auth))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
