//! Pure state transition function
//!
//! Given the same step, data, context and message this always yields the
//! same result. Nothing here performs I/O.

use super::{ContactChannel, ConvContext, Effect, Reply, SessionData, Step, UserMessage};

const YES_ANSWERS: &[&str] = &["oui", "yes"];

/// Result of a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    pub new_step: Step,
    pub new_data: SessionData,
    pub reply: Reply,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(step: Step, data: SessionData, reply: Reply) -> Self {
        Self {
            new_step: step,
            new_data: data,
            reply,
            effects: vec![],
        }
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Pure transition function
pub fn transition(
    step: Step,
    data: &SessionData,
    context: &ConvContext<'_>,
    message: &UserMessage,
) -> TransitionResult {
    match step {
        // Init + empty -> Init, ask again
        Step::Init if message.is_empty() => {
            TransitionResult::new(Step::Init, data.clone(), Reply::AskName)
        }

        // Init + name -> ChooseDomain
        Step::Init => {
            let data = SessionData {
                name: Some(message.text.clone()),
                ..data.clone()
            };
            TransitionResult::new(Step::ChooseDomain, data, Reply::Welcome)
        }

        Step::ChooseDomain => match context.catalog.match_keyword(&message.normalized) {
            Some(domain) => {
                let data = SessionData {
                    domain: Some(domain.key.clone()),
                    ..data.clone()
                };
                TransitionResult::new(
                    Step::OfferResources,
                    data,
                    Reply::Resources {
                        domain: domain.key.clone(),
                    },
                )
            }
            None => TransitionResult::new(Step::ChooseDomain, data.clone(), Reply::Welcome),
        },

        Step::OfferResources if message.is_one_of(YES_ANSWERS) => {
            TransitionResult::new(Step::ChooseContact, data.clone(), Reply::ContactOptions)
        }

        Step::OfferResources => TransitionResult::new(Step::Init, data.clone(), Reply::Welcome),

        // Every answer ends the flow; only valid channels produce effects
        Step::ChooseContact => {
            let Some(channel) = ContactChannel::from_answer(&message.normalized) else {
                return TransitionResult::new(Step::Init, data.clone(), Reply::Error);
            };

            let effects = contact_effects(channel, data, context);
            if effects.is_empty() {
                return TransitionResult::new(Step::Init, data.clone(), Reply::Error);
            }

            TransitionResult::new(Step::Init, data.clone(), Reply::ContactConfirmed(channel))
                .with_effects(effects)
        }
    }
}

/// Build the outbound effects for a contact request.
///
/// Empty when the session no longer points at a known domain or lacks a
/// name, which can only happen with a store that loaded stale data.
fn contact_effects(
    channel: ContactChannel,
    data: &SessionData,
    context: &ConvContext<'_>,
) -> Vec<Effect> {
    let (Some(name), Some(domain)) = (data.name.as_deref(), data.domain.as_deref()) else {
        return vec![];
    };
    let Some(domain) = context.catalog.get(domain) else {
        return vec![];
    };

    let notice = contact_notice(name);
    let mut effects = Vec::with_capacity(2);
    if channel.sends_message() {
        effects.push(Effect::SendMessage {
            to: domain.message_to.clone(),
            body: notice.clone(),
        });
    }
    if channel.places_call() {
        effects.push(Effect::PlaceCall {
            to: domain.call_to.clone(),
            script: notice,
        });
    }
    effects
}

pub(crate) fn contact_notice(name: &str) -> String {
    format!("New contact: {name}")
}
