//! Conversation runtime executor

use super::ConversationError;
use crate::config::DomainCatalog;
use crate::messages;
use crate::session::SessionStore;
use crate::state_machine::{self, ConvContext, Effect, Reply};
use crate::transport::Notifier;
use chrono::Utc;
use std::sync::Arc;

/// Generic conversation runtime that can work with any store and notifier
pub struct ConversationRuntime<S, N>
where
    S: SessionStore,
    N: Notifier,
{
    store: S,
    notifier: N,
    catalog: Arc<DomainCatalog>,
}

impl<S, N> ConversationRuntime<S, N>
where
    S: SessionStore,
    N: Notifier,
{
    pub fn new(store: S, notifier: N, catalog: Arc<DomainCatalog>) -> Self {
        Self {
            store,
            notifier,
            catalog,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one inbound message and return the reply text.
    ///
    /// The sender's session stays locked until the reply is ready, so
    /// deliveries from one sender are processed one at a time.
    pub async fn handle_message(
        &self,
        sender: &str,
        text: &str,
    ) -> Result<String, ConversationError> {
        let handle = self.store.get_or_create(sender).await?;
        let mut session = handle.lock().await;

        if self.store.reset_if_stale(&mut session) {
            tracing::info!(sender = %sender, "Session expired, restarting flow");
        }
        session.touch(Utc::now());

        let from = session.step;
        let context = ConvContext::new(&self.catalog, session.language);
        let (reply, effects) = state_machine::handle(&mut session, &context, text);

        // Failed contact attempts still end the flow
        let reply = if self.execute_effects(&effects).await {
            reply
        } else {
            Reply::Error
        };

        self.store.save(sender, &session).await?;

        tracing::info!(
            sender = %sender,
            from = %from,
            to = %session.step,
            domain = session.data.domain.as_deref().unwrap_or(""),
            effects = effects.len(),
            "Message handled"
        );

        Ok(messages::render(&reply, &self.catalog, session.language))
    }

    /// Run every effect in order. True only if all of them succeeded.
    async fn execute_effects(&self, effects: &[Effect]) -> bool {
        let mut all_succeeded = true;
        for effect in effects {
            all_succeeded &= self.execute_effect(effect).await;
        }
        all_succeeded
    }

    async fn execute_effect(&self, effect: &Effect) -> bool {
        let result = match effect {
            Effect::SendMessage { to, body } => self.notifier.send_message(to, body).await,
            Effect::PlaceCall { to, script } => self.notifier.place_call(to, script).await,
        };

        if let Err(e) = &result {
            tracing::warn!(
                effect = effect.kind(),
                to = %effect.destination(),
                error = %e,
                "Contact effect failed, not retrying"
            );
        }
        result.is_ok()
    }
}
