//! Usage: security-sensitive helpers (log masking, constant-time compare, random tokens).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use subtle::ConstantTimeEq;

/// Mask a secret for logs, keeping just enough to correlate.
pub(crate) fn mask_token(token: &str) -> String {
    let trimmed = token.trim();
    let len = trimmed.len();
    if len <= 8 || !trimmed.is_ascii() {
        return "*".repeat(len.min(8));
    }
    format!("{}***{}", &trimmed[..4], &trimmed[len - 4..])
}

pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// URL-safe random token carrying `n` bytes of entropy.
pub(crate) fn random_url_safe(n: usize) -> String {
    let mut bytes = vec![0u8; n];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
