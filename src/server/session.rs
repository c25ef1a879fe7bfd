//! Usage: session payloads and typed helpers over the injected cookie session.
//!
//! The only durable entry is the OAuth credential under `google_token`; the
//! `state`/verifier pair exists just between `/login` and `/authorized` and
//! is consumed on first use.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::shared::error::AppResult;

/// Session key holding the OAuth credential.
pub const CREDENTIAL_KEY: &str = "google_token";
const PENDING_STATE_KEY: &str = "oauth_state";
const PENDING_VERIFIER_KEY: &str = "pkce_verifier";

/// Access credential as stored in the session. The refresh slot is kept as
/// an empty placeholder; only presence is ever checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
}

impl Credential {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: String::new(),
        }
    }
}

pub async fn credential(session: &Session) -> AppResult<Option<Credential>> {
    Ok(session.get::<Credential>(CREDENTIAL_KEY).await?)
}

pub async fn store_credential(session: &Session, credential: &Credential) -> AppResult<()> {
    session.insert(CREDENTIAL_KEY, credential).await?;
    Ok(())
}

/// Remove the credential; no-op when absent.
pub async fn clear_credential(session: &Session) -> AppResult<()> {
    session.remove::<Credential>(CREDENTIAL_KEY).await?;
    Ok(())
}

/// Record the `state`/verifier pair for an in-flight login.
pub async fn begin_login(session: &Session, state: &str, code_verifier: &str) -> AppResult<()> {
    session.insert(PENDING_STATE_KEY, state).await?;
    session.insert(PENDING_VERIFIER_KEY, code_verifier).await?;
    Ok(())
}

/// Consume the pending login, if any. Single-use: a second callback against
/// the same session finds nothing.
pub async fn take_pending_login(session: &Session) -> AppResult<Option<(String, String)>> {
    let state = session.remove::<String>(PENDING_STATE_KEY).await?;
    let verifier = session.remove::<String>(PENDING_VERIFIER_KEY).await?;
    Ok(state.zip(verifier))
}
