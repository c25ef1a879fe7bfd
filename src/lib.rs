//! quasar-oauth: a minimal web service demonstrating OAuth login against a
//! Google-style provider and an SMS send through a Twilio-style REST API.

pub mod config;
pub mod messaging;
pub mod oauth;
pub mod server;
pub mod shared;

use std::sync::Arc;

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use config::AppConfig;
use messaging::twilio::TwilioMessaging;
use oauth::google::GoogleOAuth;
use server::listen::format_host_port;
use server::routes::build_router;
use server::state::AppState;
use shared::error::{AppError, AppResult};

/// Load configuration, wire the adapters, and serve until interrupted.
pub async fn run() -> AppResult<()> {
    let config = Arc::new(AppConfig::from_env()?);

    let http = reqwest::Client::builder()
        .user_agent(concat!("quasar-oauth/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::Startup(format!("http client init failed: {e}")))?;

    let state = AppState {
        oauth: Arc::new(GoogleOAuth::new(http.clone(), config.oauth.clone())),
        messaging: Arc::new(TwilioMessaging::new(http, config.sms.clone())),
        config: config.clone(),
    };

    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_expiry(Expiry::OnSessionEnd);

    let app = build_router(state, sessions);

    let addr = format_host_port(&config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr.as_str())
        .await
        .map_err(|e| AppError::Startup(format!("bind {addr} failed: {e}")))?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Startup(format!("server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("shutdown signal listener failed: {err}");
    }
}
