pub mod error;
pub(crate) mod security;
pub(crate) mod time;

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by the object-safe adapter traits.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
