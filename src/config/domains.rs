//! Domain catalog: where each subject area routes and what it offers

use super::ConfigError;
use crate::state_machine::Language;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// One subject area a sender can pick from the menu
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DomainDef {
    pub key: String,
    /// Menu label, e.g. "Programmation 💻"
    pub label: String,
    /// Chat destination of the expert, e.g. `whatsapp:+33…`
    pub message_to: String,
    /// Phone number the expert is called on
    pub call_to: String,
    pub keywords: Vec<String>,
    pub resources: BTreeMap<Language, Vec<String>>,
}

impl DomainDef {
    /// Resources in `language`, falling back to French
    pub fn resources_for(&self, language: Language) -> &[String] {
        self.resources
            .get(&language)
            .or_else(|| self.resources.get(&Language::Fr))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    domains: Vec<DomainDef>,
}

/// Validated, immutable list of domains in declaration order
#[derive(Debug, Clone)]
pub struct DomainCatalog {
    domains: Vec<DomainDef>,
}

impl DomainCatalog {
    /// Validate and normalize a list of domains.
    ///
    /// Keywords are trimmed and lower-cased, and each domain also answers
    /// to its 1-based menu number. A keyword shared by two domains is
    /// allowed; the first declared domain wins, except that a menu number
    /// must select the domain shown under it.
    pub fn new(domains: Vec<DomainDef>) -> Result<Self, ConfigError> {
        if domains.is_empty() {
            return Err(ConfigError::InvalidCatalog(
                "at least one domain is required".to_string(),
            ));
        }

        let mut normalized = Vec::with_capacity(domains.len());
        let mut keyword_owner: HashMap<String, String> = HashMap::new();

        for (index, mut domain) in domains.into_iter().enumerate() {
            domain.key = domain.key.trim().to_string();
            if domain.key.is_empty() {
                return Err(ConfigError::InvalidCatalog("domain key is empty".to_string()));
            }
            if normalized.iter().any(|d: &DomainDef| d.key == domain.key) {
                return Err(ConfigError::InvalidCatalog(format!(
                    "duplicate domain key '{}'",
                    domain.key
                )));
            }
            if domain.message_to.trim().is_empty() || domain.call_to.trim().is_empty() {
                return Err(ConfigError::InvalidCatalog(format!(
                    "domain '{}' is missing a destination",
                    domain.key
                )));
            }
            if !domain.resources.contains_key(&Language::Fr) {
                return Err(ConfigError::InvalidCatalog(format!(
                    "domain '{}' has no resources for '{}'",
                    domain.key,
                    Language::Fr.code()
                )));
            }

            domain.keywords = domain
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            let position = (index + 1).to_string();
            if let Some(owner) = keyword_owner.get(&position) {
                return Err(ConfigError::InvalidCatalog(format!(
                    "menu number {position} of domain '{}' is already a keyword of '{owner}'",
                    domain.key
                )));
            }
            if !domain.keywords.contains(&position) {
                domain.keywords.insert(0, position);
            }

            for keyword in &domain.keywords {
                if let Some(owner) = keyword_owner.get(keyword) {
                    tracing::warn!(
                        keyword = %keyword,
                        first = %owner,
                        shadowed = %domain.key,
                        "Keyword declared by several domains, first one wins"
                    );
                } else {
                    keyword_owner.insert(keyword.clone(), domain.key.clone());
                }
            }

            normalized.push(domain);
        }

        Ok(Self {
            domains: normalized,
        })
    }

    /// Load a catalog from a JSON file of the form `{"domains": [...]}`
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: CatalogFile =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(file.domains)
    }

    /// The two domains the service ships with
    pub fn builtin() -> Self {
        Self {
            domains: builtin_domains(),
        }
    }

    /// Replace destinations from `{KEY}_WHATSAPP` / `{KEY}_PHONE` variables
    #[must_use]
    pub fn with_destination_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        for domain in &mut self.domains {
            let prefix = domain.key.to_uppercase().replace(['-', ' '], "_");
            if let Some(to) = lookup(&format!("{prefix}_WHATSAPP")).filter(|v| !v.is_empty()) {
                domain.message_to = to;
            }
            if let Some(to) = lookup(&format!("{prefix}_PHONE")).filter(|v| !v.is_empty()) {
                domain.call_to = to;
            }
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&DomainDef> {
        self.domains.iter().find(|d| d.key == key)
    }

    /// First domain, in declaration order, listing `input` as a keyword
    pub fn match_keyword(&self, input: &str) -> Option<&DomainDef> {
        self.domains
            .iter()
            .find(|d| d.keywords.iter().any(|k| k == input))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainDef> {
        self.domains.iter()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }
}

const DEFAULT_EXPERT_WHATSAPP: &str = "whatsapp:+237698856730";
const DEFAULT_EXPERT_PHONE: &str = "+237698856730";

fn builtin_domains() -> Vec<DomainDef> {
    fn resources(fr: &str, en: &str) -> BTreeMap<Language, Vec<String>> {
        BTreeMap::from([
            (Language::Fr, vec![fr.to_string()]),
            (Language::En, vec![en.to_string()]),
        ])
    }

    vec![
        DomainDef {
            key: "programmation".to_string(),
            label: "Programmation 💻".to_string(),
            message_to: DEFAULT_EXPERT_WHATSAPP.to_string(),
            call_to: DEFAULT_EXPERT_PHONE.to_string(),
            keywords: ["1", "prog", "code", "dev", "python"]
                .map(String::from)
                .to_vec(),
            resources: resources(
                "Python: https://docs.python.org/fr/3/tutorial/",
                "Python: https://docs.python.org/3/tutorial/",
            ),
        },
        DomainDef {
            key: "design".to_string(),
            label: "Design 🎨".to_string(),
            message_to: DEFAULT_EXPERT_WHATSAPP.to_string(),
            call_to: DEFAULT_EXPERT_PHONE.to_string(),
            keywords: ["2", "design", "graphisme", "canva"]
                .map(String::from)
                .to_vec(),
            resources: resources(
                "Canva: https://www.canva.com/fr_fr/learn/design/",
                "Canva: https://www.canva.com/learn/design/",
            ),
        },
    ]
}
