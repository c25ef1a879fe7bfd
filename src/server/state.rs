//! Usage: cloneable per-request application state for the router.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::messaging::adapter::MessagingAdapter;
use crate::oauth::adapter::OAuthAdapter;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub oauth: Arc<dyn OAuthAdapter>,
    pub messaging: Arc<dyn MessagingAdapter>,
}
