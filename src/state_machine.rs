//! Conversation state machine
//!
//! Pure transitions in the Elm style: a step, the session data and an
//! inbound message go in; the next step, a reply and the outbound effects
//! come out. Running the effects is the runtime's job.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{ContactChannel, Effect, Reply};
pub use event::UserMessage;
pub use state::{ConvContext, Language, SessionData, Step};
pub use transition::transition;

use crate::session::Session;

/// Apply one inbound message to a session in place.
///
/// Returns the reply to render and the effects the caller must execute.
/// The reply assumes every effect succeeds; the runtime downgrades it to
/// [`Reply::Error`] otherwise.
pub fn handle(
    session: &mut Session,
    context: &ConvContext<'_>,
    raw: &str,
) -> (Reply, Vec<Effect>) {
    let message = UserMessage::new(raw);
    let result = transition(session.step, &session.data, context, &message);

    session.step = result.new_step;
    session.data = result.new_data;

    (result.reply, result.effects)
}
