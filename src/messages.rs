//! Reply texts sent back to senders

use crate::config::DomainCatalog;
use crate::state_machine::{ContactChannel, Language, Reply};
use std::fmt::Write;

pub const ASK_NAME: &str = "Quel est votre prénom ? 👋";
pub const CONTACT_OPTIONS: &str = "Contact par:\n1. Message\n2. Appel\n3. Les deux";
pub const MESSAGE_SENT: &str = "✅ Message envoyé!";
pub const CALL_PLACED: &str = "✅ Appel initié!";
pub const BOTH_SENT: &str = "✅ Message et appel envoyés!";
pub const ACTION_UNAVAILABLE: &str = "❌ Action non disponible";
pub const INVALID_MESSAGE: &str = "Message invalide";
pub const SERVER_ERROR: &str = "Erreur serveur";
pub const VOICE_NOT_CONFIGURED: &str = "Service vocal non configuré";

/// Domain menu, numbered in catalog order
pub fn welcome(catalog: &DomainCatalog) -> String {
    let mut text = String::from("Bienvenue! Choisissez:");
    for (i, domain) in catalog.iter().enumerate() {
        let _ = write!(text, "\n{}. {}", i + 1, domain.label);
    }
    text
}

/// Resource list of one domain followed by the contact offer
pub fn resources(catalog: &DomainCatalog, domain: &str, language: Language) -> Option<String> {
    let def = catalog.get(domain)?;
    let list = def.resources_for(language).join("\n");
    Some(format!(
        "📖 Ressources {domain}:\n{list}\n\nContact expert ? (Oui/Non)"
    ))
}

/// Render a reply to the text sent back to the sender
pub fn render(reply: &Reply, catalog: &DomainCatalog, language: Language) -> String {
    match reply {
        Reply::AskName => ASK_NAME.to_string(),
        Reply::Welcome => welcome(catalog),
        Reply::Resources { domain } => resources(catalog, domain, language)
            .unwrap_or_else(|| ACTION_UNAVAILABLE.to_string()),
        Reply::ContactOptions => CONTACT_OPTIONS.to_string(),
        Reply::ContactConfirmed(channel) => match channel {
            ContactChannel::Message => MESSAGE_SENT,
            ContactChannel::Call => CALL_PLACED,
            ContactChannel::Both => BOTH_SENT,
        }
        .to_string(),
        Reply::Error => ACTION_UNAVAILABLE.to_string(),
    }
}
