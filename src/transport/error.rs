//! Transport error types

use thiserror::Error;

/// Outbound request error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Network, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Auth, message)
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Rejected, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Unknown, message)
    }
}

/// Why an outbound request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Timeout, connection refused, unreadable response
    Network,
    /// Bad account SID or token (401, 403)
    Auth,
    /// Provider refused the request, e.g. invalid number (4xx)
    Rejected,
    /// Provider side failure (5xx) or anything unclassified
    Unknown,
}
