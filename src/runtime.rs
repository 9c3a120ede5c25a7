//! Runtime for handling inbound messages
//!
//! Resolves the sender's session, runs the pure transition, executes the
//! resulting effects and renders the reply.

mod executor;

#[cfg(test)]
pub mod testing;

pub use executor::ConversationRuntime;

use crate::session::{SessionStore, StoreError};
use crate::transport::Notifier;
use std::sync::Arc;
use thiserror::Error;

/// Runtime over trait objects, as used by the HTTP layer
pub type ProductionRuntime = ConversationRuntime<Arc<dyn SessionStore>, Arc<dyn Notifier>>;

/// Errors that abort handling of a message
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
