//! Inbound messages that drive the state machine

/// A chat message as received from the sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    /// Text with surrounding whitespace removed, original casing kept
    pub text: String,
    /// Trimmed, lower-cased text used for menu matching
    pub normalized: String,
}

impl UserMessage {
    pub fn new(raw: &str) -> Self {
        let text = raw.trim().to_string();
        let normalized = text.to_lowercase();
        Self { text, normalized }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Exact match of the normalized text against any of `choices`
    pub fn is_one_of(&self, choices: &[&str]) -> bool {
        choices.contains(&self.normalized.as_str())
    }
}
