//! Conversation state types

use crate::config::DomainCatalog;
use serde::{Deserialize, Serialize};

/// Position of a sender in the menu flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Waiting for the sender's name
    #[default]
    Init,
    /// Menu shown, waiting for a domain choice
    ChooseDomain,
    /// Resources shown, waiting for yes/no on expert contact
    OfferResources,
    /// Waiting for the contact channel
    ChooseContact,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Init => "init",
            Step::ChooseDomain => "choose_domain",
            Step::OfferResources => "offer_resources",
            Step::ChooseContact => "choose_contact",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language of a session's replies and resource lists
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

/// Answers collected during the flow
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionData {
    /// Free-text name given at `Init`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Key of the chosen domain; always a key of the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Read-only inputs a transition needs besides the session itself
#[derive(Debug, Clone, Copy)]
pub struct ConvContext<'a> {
    pub catalog: &'a DomainCatalog,
    pub language: Language,
}

impl<'a> ConvContext<'a> {
    pub fn new(catalog: &'a DomainCatalog, language: Language) -> Self {
        Self { catalog, language }
    }
}
