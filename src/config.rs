//! Process configuration
//!
//! Everything is read once at startup from the environment (after an
//! optional `.env` file) and is immutable afterwards.

mod domains;

pub use domains::DomainCatalog;

use chrono::TimeDelta;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_SESSION_TIMEOUT_MINUTES: i64 = 30;
const DEFAULT_WHATSAPP_FROM: &str = "whatsapp:+14155238886";
const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com";

/// Variables without which the service refuses to start
const REQUIRED_VARS: &[&str] = &[
    "TWILIO_ACCOUNT_SID",
    "TWILIO_AUTH_TOKEN",
    "TWILIO_PHONE_NUMBER",
];

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),

    #[error("invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid domain catalog: {0}")]
    InvalidCatalog(String),
}

/// Twilio account and sender numbers
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender for chat messages, e.g. `whatsapp:+14155238886`
    pub whatsapp_from: String,
    /// Caller ID for voice calls
    pub phone_from: String,
    pub api_base: String,
}

/// Full service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub session_timeout: TimeDelta,
    pub twilio: TwilioConfig,
    pub catalog: DomainCatalog,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| get(*name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        let twilio = TwilioConfig {
            account_sid: get("TWILIO_ACCOUNT_SID").unwrap_or_default(),
            auth_token: get("TWILIO_AUTH_TOKEN").unwrap_or_default(),
            phone_from: get("TWILIO_PHONE_NUMBER").unwrap_or_default(),
            whatsapp_from: get("TWILIO_WHATSAPP_NUMBER")
                .unwrap_or_else(|| DEFAULT_WHATSAPP_FROM.to_string()),
            api_base: get("TWILIO_API_BASE")
                .unwrap_or_else(|| DEFAULT_TWILIO_API_BASE.to_string()),
        };

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { var: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let session_timeout = match get("SESSION_TIMEOUT_MINUTES") {
            Some(value) => value
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|m| *m > 0)
                .and_then(TimeDelta::try_minutes)
                .ok_or(ConfigError::InvalidValue {
                    var: "SESSION_TIMEOUT_MINUTES",
                    value,
                })?,
            None => TimeDelta::minutes(DEFAULT_SESSION_TIMEOUT_MINUTES),
        };

        let catalog = match get("DOMAINS_FILE") {
            Some(path) => DomainCatalog::from_file(&PathBuf::from(path))?,
            None => DomainCatalog::builtin(),
        }
        .with_destination_overrides(&get);

        Ok(Self {
            port,
            session_timeout,
            twilio,
            catalog,
        })
    }
}
