//! Usage: capability trait for the outbound SMS provider.

use crate::shared::error::AppResult;
use crate::shared::BoxFuture;

/// Provider acknowledgement for a single send.
#[derive(Debug, Clone, Default)]
pub struct MessageReceipt {
    /// Provider-assigned message identifier, when the response carried one.
    pub sid: Option<String>,
}

/// One synchronous, atomic send. No retry, backoff, or delivery-status
/// tracking lives behind this interface.
pub trait MessagingAdapter: Send + Sync {
    fn send_message<'a>(
        &'a self,
        to: &'a str,
        from: &'a str,
        body: &'a str,
    ) -> BoxFuture<'a, AppResult<MessageReceipt>>;
}
