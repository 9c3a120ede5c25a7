//! Mock implementations for testing
//!
//! These mocks enable runtime and API tests without real I/O.

use crate::session::{Session, SessionHandle, SessionStore, StoreError};
use crate::transport::{Notifier, TransportError};
use async_trait::async_trait;
use chrono::TimeDelta;
use std::sync::Mutex;

// ============================================================================
// Mock Notifier
// ============================================================================

/// An outbound request recorded by [`MockNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Message { to: String, body: String },
    Call { to: String, script: String },
}

/// Notifier that records requests and fails on demand
#[derive(Default)]
pub struct MockNotifier {
    fail_messages: bool,
    fail_calls: bool,
    sent: Mutex<Vec<Sent>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `send_message` fail
    pub fn failing_messages(mut self) -> Self {
        self.fail_messages = true;
        self
    }

    /// Make every `place_call` fail
    pub fn failing_calls(mut self) -> Self {
        self.fail_calls = true;
        self
    }

    /// Requests made so far, failed ones included
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_message(&self, to: &str, body: &str) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(Sent::Message {
            to: to.to_string(),
            body: body.to_string(),
        });
        if self.fail_messages {
            return Err(TransportError::rejected("mock message failure"));
        }
        Ok(())
    }

    async fn place_call(&self, to: &str, script: &str) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(Sent::Call {
            to: to.to_string(),
            script: script.to_string(),
        });
        if self.fail_calls {
            return Err(TransportError::network("mock call failure"));
        }
        Ok(())
    }
}

// ============================================================================
// Failing Store
// ============================================================================

/// Store whose backend is always down
pub struct FailingStore;

#[async_trait]
impl SessionStore for FailingStore {
    async fn get_or_create(&self, _sender: &str) -> Result<SessionHandle, StoreError> {
        Err(StoreError::Unavailable("mock store is down".to_string()))
    }

    async fn save(&self, _sender: &str, _session: &Session) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("mock store is down".to_string()))
    }

    async fn session_count(&self) -> usize {
        0
    }

    fn idle_timeout(&self) -> TimeDelta {
        TimeDelta::minutes(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_notifier_records_failures() {
        let notifier = MockNotifier::new().failing_calls();

        assert!(notifier.send_message("a", "hello").await.is_ok());
        assert!(notifier.place_call("b", "hello").await.is_err());
        assert_eq!(notifier.sent().len(), 2);
    }
}
