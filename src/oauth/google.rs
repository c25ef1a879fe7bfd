//! Usage: Google-style OAuth adapter (authorize URL, code exchange, userinfo fetch).

use serde_json::Value;

use crate::config::OAuthConfig;
use crate::oauth::adapter::{OAuthAdapter, Profile, TokenSet};
use crate::shared::error::{AppError, AppResult};
use crate::shared::BoxFuture;

pub struct GoogleOAuth {
    http: reqwest::Client,
    config: OAuthConfig,
}

impl GoogleOAuth {
    pub fn new(http: reqwest::Client, config: OAuthConfig) -> Self {
        Self { http, config }
    }

    async fn exchange(&self, code: &str, code_verifier: &str) -> AppResult<TokenSet> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code.trim()),
            ("redirect_uri", self.config.redirect_url.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code_verifier", code_verifier),
        ];

        let response = self
            .http
            .post(self.config.token_url.clone())
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::OAuthExchange(format!("token request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::OAuthExchange(format!("token response read failed: {e}")))?;

        if !status.is_success() {
            let mut msg = format!("token endpoint returned status={}", status.as_u16());
            if let Some(detail) = oauth_error_detail(&body) {
                msg.push_str(" error=");
                msg.push_str(&detail);
            }
            return Err(AppError::OAuthExchange(msg));
        }

        token_set_from_body(&body)
    }

    async fn profile(&self, access_token: &str) -> AppResult<Profile> {
        let response = self
            .http
            .get(self.config.userinfo_url.clone())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::OAuthProfile(format!("userinfo request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::OAuthProfile(format!(
                "userinfo returned status={}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::OAuthProfile(format!("userinfo read failed: {e}")))?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| AppError::OAuthProfile(format!("userinfo json invalid: {e}")))?;

        Ok(Profile {
            id: string_field(&value, "id").unwrap_or_default(),
            name: string_field(&value, "name").unwrap_or_default(),
            email: string_field(&value, "email").unwrap_or_default(),
        })
    }
}

impl OAuthAdapter for GoogleOAuth {
    fn authorize_url(&self, state: &str, code_challenge: &str) -> String {
        let mut url = self.config.auth_url.clone();
        let scope = self.config.scopes.join(" ");
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("scope", &scope)
            .append_pair("state", state)
            .append_pair("code_challenge", code_challenge)
            .append_pair("code_challenge_method", "S256");
        url.to_string()
    }

    fn exchange_code<'a>(
        &'a self,
        code: &'a str,
        code_verifier: &'a str,
    ) -> BoxFuture<'a, AppResult<TokenSet>> {
        Box::pin(self.exchange(code, code_verifier))
    }

    fn fetch_profile<'a>(&'a self, access_token: &'a str) -> BoxFuture<'a, AppResult<Profile>> {
        Box::pin(self.profile(access_token))
    }
}

fn token_set_from_body(body: &str) -> AppResult<TokenSet> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::OAuthExchange(format!("token response json invalid: {e}")))?;

    let access_token = string_field(&value, "access_token")
        .ok_or_else(|| AppError::OAuthExchange("token response missing access_token".to_string()))?;
    let refresh_token = string_field(&value, "refresh_token");

    Ok(TokenSet {
        access_token,
        refresh_token,
    })
}

/// `error` / `error_description` out of an OAuth error body, when parseable.
fn oauth_error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let code = string_field(&value, "error");
    let description = string_field(&value, "error_description");
    match (code, description) {
        (Some(code), Some(description)) => Some(format!("{code} ({description})")),
        (Some(code), None) => Some(code),
        (None, Some(description)) => Some(description),
        (None, None) => None,
    }
}

/// Trimmed string field; numbers are accepted for providers that send
/// numeric ids.
fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
