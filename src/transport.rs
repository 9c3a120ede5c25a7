//! Outbound messaging and calling
//!
//! The conversation core only needs two best-effort operations. Twilio is
//! the production implementation.

mod error;
mod twilio;
pub mod twiml;

#[allow(unused_imports)] // Public API re-exports
pub use error::{TransportError, TransportErrorKind};
pub use twilio::TwilioClient;

use async_trait::async_trait;
use std::sync::Arc;

/// Reaches experts outside the chat
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a chat message to `to`
    async fn send_message(&self, to: &str, body: &str) -> Result<(), TransportError>;

    /// Call `to` and read `script` aloud
    async fn place_call(&self, to: &str, script: &str) -> Result<(), TransportError>;
}

#[async_trait]
impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    async fn send_message(&self, to: &str, body: &str) -> Result<(), TransportError> {
        (**self).send_message(to, body).await
    }

    async fn place_call(&self, to: &str, script: &str) -> Result<(), TransportError> {
        (**self).place_call(to, script).await
    }
}

/// Logging wrapper for notifiers
pub struct LoggingNotifier {
    inner: Arc<dyn Notifier>,
}

impl LoggingNotifier {
    pub fn new(inner: Arc<dyn Notifier>) -> Self {
        Self { inner }
    }

    fn log(
        operation: &str,
        to: &str,
        duration: std::time::Duration,
        result: &Result<(), TransportError>,
    ) {
        match result {
            Ok(()) => {
                tracing::info!(
                    operation,
                    to = %to,
                    duration_ms = %duration.as_millis(),
                    "Outbound request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    operation,
                    to = %to,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "Outbound request failed"
                );
            }
        }
    }
}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send_message(&self, to: &str, body: &str) -> Result<(), TransportError> {
        let start = std::time::Instant::now();
        let result = self.inner.send_message(to, body).await;
        Self::log("send_message", to, start.elapsed(), &result);
        result
    }

    async fn place_call(&self, to: &str, script: &str) -> Result<(), TransportError> {
        let start = std::time::Instant::now();
        let result = self.inner.place_call(to, script).await;
        Self::log("place_call", to, start.elapsed(), &result);
        result
    }
}
