//! Replies and effects produced by state transitions

/// Outbound actions to execute after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send a chat message to an expert
    SendMessage { to: String, body: String },

    /// Place a voice call that reads `script` to an expert
    PlaceCall { to: String, script: String },
}

impl Effect {
    pub fn kind(&self) -> &'static str {
        match self {
            Effect::SendMessage { .. } => "send_message",
            Effect::PlaceCall { .. } => "place_call",
        }
    }

    pub fn destination(&self) -> &str {
        match self {
            Effect::SendMessage { to, .. } | Effect::PlaceCall { to, .. } => to,
        }
    }
}

/// How the sender asked to be put in touch with an expert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactChannel {
    Message,
    Call,
    Both,
}

impl ContactChannel {
    /// Parse a normalized menu answer
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer {
            "1" | "message" => Some(ContactChannel::Message),
            "2" | "appel" => Some(ContactChannel::Call),
            "3" | "both" => Some(ContactChannel::Both),
            _ => None,
        }
    }

    pub fn sends_message(self) -> bool {
        matches!(self, ContactChannel::Message | ContactChannel::Both)
    }

    pub fn places_call(self) -> bool {
        matches!(self, ContactChannel::Call | ContactChannel::Both)
    }
}

/// What to tell the sender, before rendering to text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Ask for the sender's name
    AskName,
    /// Domain menu
    Welcome,
    /// Resource list of a domain, followed by the contact offer
    Resources { domain: String },
    /// Contact channel menu
    ContactOptions,
    /// Confirmation that the expert was contacted
    ContactConfirmed(ContactChannel),
    /// Generic failure
    Error,
}
