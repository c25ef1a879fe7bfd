#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use reqwest::Url;
use tower::ServiceExt;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use quasar_oauth::config::AppConfig;
use quasar_oauth::messaging::adapter::{MessageReceipt, MessagingAdapter};
use quasar_oauth::oauth::adapter::{OAuthAdapter, Profile, TokenSet};
use quasar_oauth::server::routes::build_router;
use quasar_oauth::server::state::AppState;
use quasar_oauth::shared::error::{AppError, AppResult};
use quasar_oauth::shared::BoxFuture;

pub const AUTHORIZE_URL: &str = "https://auth.example.test/o/authorize";

pub fn test_config() -> AppConfig {
    let vars: Vec<(&str, &str)> = vec![
        ("QUASAR_OAUTH_CLIENT_ID", "test-client"),
        ("QUASAR_OAUTH_CLIENT_SECRET", "test-secret"),
        ("QUASAR_OAUTH_AUTH_URL", AUTHORIZE_URL),
        ("QUASAR_SMS_ACCOUNT_SID", "AC00000000000000000000000000000000"),
        ("QUASAR_SMS_AUTH_TOKEN", "test-token"),
        ("QUASAR_SMS_TO", "+15005550006"),
        ("QUASAR_SMS_FROM", "+15005550001"),
    ];
    AppConfig::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    })
    .expect("test config")
}

/// OAuth adapter double: records exchanges, hands out canned tokens/profile.
pub struct MockOAuth {
    pub auth_url: String,
    pub fail_exchange: bool,
    pub exchange_calls: AtomicUsize,
    pub exchanged: Mutex<Vec<(String, String)>>,
    pub profile: Profile,
}

impl MockOAuth {
    pub fn new() -> Self {
        Self {
            auth_url: AUTHORIZE_URL.to_string(),
            fail_exchange: false,
            exchange_calls: AtomicUsize::new(0),
            exchanged: Mutex::new(Vec::new()),
            profile: Profile {
                id: "104".to_string(),
                name: "Ada Lovelace".to_string(),
                email: "ada@example.test".to_string(),
            },
        }
    }

    pub fn failing_exchange() -> Self {
        Self {
            fail_exchange: true,
            ..Self::new()
        }
    }
}

impl OAuthAdapter for MockOAuth {
    fn authorize_url(&self, state: &str, code_challenge: &str) -> String {
        format!(
            "{}?state={state}&code_challenge={code_challenge}",
            self.auth_url
        )
    }

    fn exchange_code<'a>(
        &'a self,
        code: &'a str,
        code_verifier: &'a str,
    ) -> BoxFuture<'a, AppResult<TokenSet>> {
        Box::pin(async move {
            self.exchange_calls.fetch_add(1, Ordering::SeqCst);
            self.exchanged
                .lock()
                .expect("exchanged lock")
                .push((code.to_string(), code_verifier.to_string()));
            if self.fail_exchange {
                return Err(AppError::OAuthExchange(
                    "token endpoint returned status=500".to_string(),
                ));
            }
            Ok(TokenSet {
                access_token: "mock-access-token".to_string(),
                refresh_token: None,
            })
        })
    }

    fn fetch_profile<'a>(&'a self, _access_token: &'a str) -> BoxFuture<'a, AppResult<Profile>> {
        Box::pin(async move { Ok(self.profile.clone()) })
    }
}

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub to: String,
    pub from: String,
    pub body: String,
}

/// Messaging adapter double: records every invocation, optionally failing
/// after the fact so "invoked exactly once" stays observable.
#[derive(Default)]
pub struct MockMessaging {
    pub fail: bool,
    pub sent: Mutex<Vec<SentMessage>>,
}

impl MockMessaging {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl MessagingAdapter for MockMessaging {
    fn send_message<'a>(
        &'a self,
        to: &'a str,
        from: &'a str,
        body: &'a str,
    ) -> BoxFuture<'a, AppResult<MessageReceipt>> {
        Box::pin(async move {
            self.sent.lock().expect("sent lock").push(SentMessage {
                to: to.to_string(),
                from: from.to_string(),
                body: body.to_string(),
            });
            if self.fail {
                return Err(AppError::MessagingSend(
                    "provider returned status=400".to_string(),
                ));
            }
            Ok(MessageReceipt {
                sid: Some("SM123".to_string()),
            })
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub oauth: Arc<MockOAuth>,
    pub messaging: Arc<MockMessaging>,
    pub config: Arc<AppConfig>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_mocks(MockOAuth::new(), MockMessaging::default())
    }

    pub fn with_mocks(oauth: MockOAuth, messaging: MockMessaging) -> Self {
        let config = Arc::new(test_config());
        let oauth = Arc::new(oauth);
        let messaging = Arc::new(messaging);
        let state = AppState {
            config: config.clone(),
            oauth: oauth.clone(),
            messaging: messaging.clone(),
        };
        let sessions = SessionManagerLayer::new(MemoryStore::default())
            .with_secure(false)
            .with_expiry(Expiry::OnSessionEnd);
        Self {
            router: build_router(state, sessions),
            oauth,
            messaging,
            config,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::empty()).expect("request"))
            .await
            .expect("response")
    }

    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(request.body(Body::from(form.to_string())).expect("request"))
            .await
            .expect("response")
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .expect("cookie str")
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("location str")
}

pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// Drive `/login` then the success callback; returns the session cookie of
/// the now-authenticated session.
pub async fn login(app: &TestApp) -> String {
    let response = app.get("/login", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&response);

    let target = Url::parse(location(&response)).expect("authorize url");
    let state = query_param(&target, "state").expect("state param");

    let callback = format!("/authorized?code=test-code&state={state}");
    let response = app.get(&callback, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    cookie
}
