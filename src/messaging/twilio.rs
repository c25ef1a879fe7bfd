//! Usage: Twilio-style REST adapter (`Messages.json` form POST with basic auth).

use serde_json::Value;

use crate::config::SmsConfig;
use crate::messaging::adapter::{MessageReceipt, MessagingAdapter};
use crate::shared::error::{AppError, AppResult};
use crate::shared::BoxFuture;

pub struct TwilioMessaging {
    http: reqwest::Client,
    config: SmsConfig,
}

impl TwilioMessaging {
    pub fn new(http: reqwest::Client, config: SmsConfig) -> Self {
        Self { http, config }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }

    async fn send(&self, to: &str, from: &str, body: &str) -> AppResult<MessageReceipt> {
        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[("To", to), ("From", from), ("Body", body)])
            .send()
            .await
            .map_err(|e| AppError::MessagingSend(format!("request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::MessagingSend(format!("response read failed: {e}")))?;

        if !status.is_success() {
            return Err(AppError::MessagingSend(provider_error(
                status.as_u16(),
                &text,
            )));
        }

        Ok(receipt_from_body(&text))
    }
}

impl MessagingAdapter for TwilioMessaging {
    fn send_message<'a>(
        &'a self,
        to: &'a str,
        from: &'a str,
        body: &'a str,
    ) -> BoxFuture<'a, AppResult<MessageReceipt>> {
        Box::pin(self.send(to, from, body))
    }
}

/// Twilio error bodies carry `code` + `message`; fall back to the bare status.
fn provider_error(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let code = value.get("code").and_then(Value::as_i64);
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty());
        match (code, message) {
            (Some(code), Some(message)) => {
                return format!("provider returned status={status} code={code}: {message}")
            }
            (None, Some(message)) => return format!("provider returned status={status}: {message}"),
            _ => {}
        }
    }
    format!("provider returned status={status}")
}

fn receipt_from_body(body: &str) -> MessageReceipt {
    let sid = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("sid").and_then(Value::as_str).map(str::to_string));
    MessageReceipt { sid }
}
