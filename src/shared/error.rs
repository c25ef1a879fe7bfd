//! Usage: typed application error model; the HTTP boundary maps each kind to a status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed configuration discovered at startup.
    #[error("config: {0}")]
    Config(String),

    /// Server failed to initialize (client build, bind, serve).
    #[error("startup: {0}")]
    Startup(String),

    /// OAuth token endpoint failure (transport error, non-2xx, malformed body).
    #[error("oauth token exchange failed: {0}")]
    OAuthExchange(String),

    /// OAuth userinfo endpoint failure.
    #[error("oauth profile fetch failed: {0}")]
    OAuthProfile(String),

    /// Messaging provider rejected or never received the send.
    #[error("sms send failed: {0}")]
    MessagingSend(String),

    /// Session store read/write failure.
    #[error("session store failed: {0}")]
    Session(String),

    /// Callback `state` does not match the pending login in the session.
    #[error("oauth callback state mismatch")]
    StateMismatch,

    /// Callback carried neither an authorization code nor a denial pair.
    #[error("oauth callback missing authorization code")]
    MissingAuthCode,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_INVALID",
            AppError::Startup(_) => "STARTUP_FAILED",
            AppError::OAuthExchange(_) => "OAUTH_EXCHANGE_FAILED",
            AppError::OAuthProfile(_) => "OAUTH_PROFILE_FAILED",
            AppError::MessagingSend(_) => "SMS_SEND_FAILED",
            AppError::Session(_) => "SESSION_STORE_FAILED",
            AppError::StateMismatch => "SEC_STATE_MISMATCH",
            AppError::MissingAuthCode => "OAUTH_CALLBACK_INVALID",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::OAuthExchange(_) | AppError::OAuthProfile(_) | AppError::MessagingSend(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::StateMismatch | AppError::MissingAuthCode => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Startup(_) | AppError::Session(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(value: tower_sessions::session::Error) -> Self {
        AppError::Session(value.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(code = self.code(), status = %status, "{self}");
        (status, format!("{}: {}", self.code(), self)).into_response()
    }
}
