//! Usage: environment-driven service configuration, loaded once at startup.
//!
//! Every setting lives under the `QUASAR_` prefix; a `.env` file is honored
//! by the entry point before this module reads the process environment.
//! Required values fail startup with a `CONFIG_INVALID` error naming the
//! variable rather than surfacing later as a broken upstream call.

use reqwest::Url;

use crate::server::listen;
use crate::shared::error::{AppError, AppResult};

const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v1/userinfo";
const DEFAULT_SMS_API_BASE: &str = "https://api.twilio.com";
const DEFAULT_SCOPES: &str = "email";

#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: Url,
    pub token_url: Url,
    pub userinfo_url: Url,
    /// External callback URL registered with the provider.
    pub redirect_url: String,
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub api_base: String,
    /// Fixed destination and source numbers; never derived from the request.
    pub to_number: String,
    pub from_number: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub oauth: OAuthConfig,
    pub sms: SmsConfig,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup; the seam tests use instead of mutating
    /// the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let listen_raw = non_empty(&lookup, "QUASAR_LISTEN").unwrap_or_default();
        let (host, port) = listen::parse_listen(&listen_raw)?;

        let redirect_url = match non_empty(&lookup, "QUASAR_OAUTH_REDIRECT_URL") {
            Some(value) => value,
            None => {
                // A wildcard bind is not a reachable callback host.
                let public_host = if listen::is_wildcard_host(&host) {
                    "127.0.0.1"
                } else {
                    host.as_str()
                };
                format!(
                    "http://{}/authorized",
                    listen::format_host_port(public_host, port)
                )
            }
        };

        let oauth = OAuthConfig {
            client_id: required(&lookup, "QUASAR_OAUTH_CLIENT_ID")?,
            client_secret: required(&lookup, "QUASAR_OAUTH_CLIENT_SECRET")?,
            auth_url: url_var(&lookup, "QUASAR_OAUTH_AUTH_URL", DEFAULT_AUTH_URL)?,
            token_url: url_var(&lookup, "QUASAR_OAUTH_TOKEN_URL", DEFAULT_TOKEN_URL)?,
            userinfo_url: url_var(&lookup, "QUASAR_OAUTH_USERINFO_URL", DEFAULT_USERINFO_URL)?,
            redirect_url,
            scopes: non_empty(&lookup, "QUASAR_OAUTH_SCOPES")
                .unwrap_or_else(|| DEFAULT_SCOPES.to_string())
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        };

        let sms = SmsConfig {
            account_sid: required(&lookup, "QUASAR_SMS_ACCOUNT_SID")?,
            auth_token: required(&lookup, "QUASAR_SMS_AUTH_TOKEN")?,
            api_base: non_empty(&lookup, "QUASAR_SMS_API_BASE")
                .unwrap_or_else(|| DEFAULT_SMS_API_BASE.to_string()),
            to_number: required(&lookup, "QUASAR_SMS_TO")?,
            from_number: required(&lookup, "QUASAR_SMS_FROM")?,
        };

        Ok(AppConfig {
            host,
            port,
            oauth,
            sms,
        })
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> AppResult<String> {
    non_empty(lookup, key).ok_or_else(|| AppError::Config(format!("{key} is required")))
}

fn url_var(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> AppResult<Url> {
    let raw = non_empty(lookup, key).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| AppError::Config(format!("{key} is not a valid URL: {e}")))
}
