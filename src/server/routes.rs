use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::{Session, SessionManagerLayer, SessionStore};

use super::session;
use super::state::AppState;
use crate::oauth::pkce::LoginChallenge;
use crate::shared::error::{AppError, AppResult};
use crate::shared::security::{constant_time_eq, mask_token};
use crate::shared::time::now_unix_seconds;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app: &'static str,
    version: &'static str,
    ts: u64,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        app: "quasar-oauth",
        version: env!("CARGO_PKG_VERSION"),
        ts: now_unix_seconds(),
    })
}

async fn root() -> &'static str {
    "quasar-oauth is running"
}

async fn login(State(state): State<AppState>, session: Session) -> AppResult<Redirect> {
    let challenge = LoginChallenge::generate();
    session::begin_login(&session, &challenge.state, &challenge.code_verifier).await?;

    let target = state
        .oauth
        .authorize_url(&challenge.state, &challenge.code_challenge);
    tracing::debug!(target = %target, "redirecting to authorization endpoint");
    Ok(Redirect::to(&target))
}

#[derive(Debug, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error_reason: Option<String>,
    error_description: Option<String>,
    next: Option<String>,
}

async fn authorized(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> AppResult<Response> {
    let code = match params.code.as_deref() {
        Some(code) => code,
        None => {
            // Provider denial is a user-facing outcome, not a server error.
            if params.error_reason.is_some() || params.error_description.is_some() {
                let reason = params.error_reason.as_deref().unwrap_or_default();
                let description = params.error_description.as_deref().unwrap_or_default();
                tracing::info!(reason = reason, "authorization denied by provider");
                return Ok(
                    format!("Access denied: reason={reason} error={description}").into_response(),
                );
            }
            return Err(AppError::MissingAuthCode);
        }
    };

    let (expected_state, code_verifier) = session::take_pending_login(&session)
        .await?
        .ok_or(AppError::StateMismatch)?;
    let presented = params.state.as_deref().unwrap_or_default();
    if !constant_time_eq(presented.as_bytes(), expected_state.as_bytes()) {
        return Err(AppError::StateMismatch);
    }

    let tokens = state.oauth.exchange_code(code, &code_verifier).await?;
    session::store_credential(&session, &session::Credential::new(tokens.access_token.clone()))
        .await?;
    tracing::info!(token = %mask_token(&tokens.access_token), "login completed, credential stored");

    let profile = state.oauth.fetch_profile(&tokens.access_token).await?;
    let next = params.next.as_deref().unwrap_or_default();
    Ok(format!(
        "Logged in as id={} name={} email={} redirect={}",
        profile.id, profile.name, profile.email, next
    )
    .into_response())
}

#[derive(Debug, Deserialize)]
struct SendTextForm {
    #[serde(default)]
    message: String,
}

async fn send_text(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SendTextForm>,
) -> AppResult<Response> {
    if session::credential(&session).await?.is_none() {
        return Ok(Redirect::to("/login").into_response());
    }

    let sms = &state.config.sms;
    let receipt = state
        .messaging
        .send_message(&sms.to_number, &sms.from_number, &form.message)
        .await?;
    tracing::info!(sid = receipt.sid.as_deref().unwrap_or("-"), "text message sent");
    Ok("Text message sent!".into_response())
}

async fn logout(session: Session) -> AppResult<Redirect> {
    session::clear_credential(&session).await?;
    Ok(Redirect::to("/"))
}

pub fn build_router<S>(state: AppState, sessions: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/login", get(login))
        .route("/authorized", get(authorized))
        .route("/send_text", post(send_text))
        .route("/logout", get(logout))
        .layer(sessions)
        .with_state(state)
}
