//! Usage: capability trait the route handlers use to talk to the OAuth provider.
//!
//! Handlers hold an `Arc<dyn OAuthAdapter>`; production wires in
//! [`crate::oauth::google::GoogleOAuth`] and tests substitute a mock, so the
//! login flow is exercised without a network.

use crate::shared::error::AppResult;
use crate::shared::BoxFuture;

/// Token material returned by the provider's token endpoint.
#[derive(Debug, Clone)]
pub struct TokenSet {
    pub access_token: String,
    /// Present when the provider grants offline access; stored nowhere.
    pub refresh_token: Option<String>,
}

/// Subset of the userinfo payload rendered after login.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
}

pub trait OAuthAdapter: Send + Sync {
    /// Authorization endpoint URL carrying the redirect, scopes, `state`,
    /// and PKCE challenge.
    fn authorize_url(&self, state: &str, code_challenge: &str) -> String;

    /// Exchange an authorization code (plus PKCE verifier) for tokens.
    fn exchange_code<'a>(
        &'a self,
        code: &'a str,
        code_verifier: &'a str,
    ) -> BoxFuture<'a, AppResult<TokenSet>>;

    /// Fetch the profile behind a freshly issued access token.
    fn fetch_profile<'a>(&'a self, access_token: &'a str) -> BoxFuture<'a, AppResult<Profile>>;
}
