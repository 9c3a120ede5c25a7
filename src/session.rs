//! Per-sender conversation sessions

mod store;

#[allow(unused_imports)] // SessionHandle is only named by test stores
pub use store::{InMemorySessionStore, SessionHandle, SessionStore, StoreError};

use crate::state_machine::{Language, SessionData, Step};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Conversation record of one sender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub language: Language,
    pub step: Step,
    pub data: SessionData,
    pub last_active: DateTime<Utc>,
}

impl Session {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            language: Language::Fr,
            step: Step::Init,
            data: SessionData::default(),
            last_active: now,
        }
    }

    /// True once more than `timeout` has passed since the last message
    pub fn is_stale(&self, now: DateTime<Utc>, timeout: TimeDelta) -> bool {
        now.signed_duration_since(self.last_active) > timeout
    }

    /// Restart the flow if the session went idle; language is kept.
    ///
    /// Returns whether a reset happened.
    pub fn reset_if_stale(&mut self, now: DateTime<Utc>, timeout: TimeDelta) -> bool {
        if !self.is_stale(now, timeout) {
            return false;
        }
        self.step = Step::Init;
        self.data = SessionData::default();
        true
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_active = now;
    }
}
