//! Usage: per-login randomness (CSRF `state` plus PKCE verifier/challenge pair).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::shared::security::random_url_safe;

#[derive(Debug, Clone)]
pub struct LoginChallenge {
    pub state: String,
    pub code_verifier: String,
    pub code_challenge: String,
}

impl LoginChallenge {
    pub fn generate() -> Self {
        let state = random_url_safe(24);
        let code_verifier = random_url_safe(64);
        let code_challenge = s256_challenge(&code_verifier);
        Self {
            state,
            code_verifier,
            code_challenge,
        }
    }
}

pub(crate) fn s256_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}
