//! Twilio REST client for `WhatsApp` messages and voice calls

use super::twiml;
use super::{Notifier, TransportError};
use crate::config::TwilioConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const API_VERSION: &str = "2010-04-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Twilio service implementation
pub struct TwilioClient {
    client: Client,
    account_url: String,
    account_sid: String,
    auth_token: String,
    whatsapp_from: String,
    phone_from: String,
}

impl TwilioClient {
    pub fn new(config: &TwilioConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TransportError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            account_url: format!(
                "{}/{API_VERSION}/Accounts/{}",
                config.api_base.trim_end_matches('/'),
                config.account_sid
            ),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            whatsapp_from: config.whatsapp_from.clone(),
            phone_from: config.phone_from.clone(),
        })
    }

    async fn create(&self, resource: &str, form: &[(&str, &str)]) -> Result<(), TransportError> {
        let url = format!("{}/{resource}.json", self.account_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    TransportError::network(format!("Connection failed: {e}"))
                } else {
                    TransportError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        if let Ok(created) = serde_json::from_str::<CreatedResource>(&body) {
            tracing::debug!(resource, sid = %created.sid, "Twilio resource created");
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for TwilioClient {
    async fn send_message(&self, to: &str, body: &str) -> Result<(), TransportError> {
        self.create(
            "Messages",
            &[("From", self.whatsapp_from.as_str()), ("To", to), ("Body", body)],
        )
        .await
    }

    async fn place_call(&self, to: &str, script: &str) -> Result<(), TransportError> {
        let twiml = twiml::call_script(script);
        self.create(
            "Calls",
            &[("From", self.phone_from.as_str()), ("To", to), ("Twiml", twiml.as_str())],
        )
        .await
    }
}

// Twilio API types

#[derive(Debug, Deserialize)]
struct CreatedResource {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: Option<u32>,
    message: String,
}

fn classify_error(status: reqwest::StatusCode, body: &str) -> TransportError {
    let message = match serde_json::from_str::<ApiError>(body) {
        Ok(ApiError {
            code: Some(code),
            message,
        }) => format!("{message} (code {code})"),
        Ok(ApiError { message, .. }) => message,
        Err(_) => body.to_string(),
    };

    match status.as_u16() {
        401 | 403 => TransportError::auth(format!("Authentication failed: {message}")),
        400..=499 => TransportError::rejected(format!("Request rejected: {message}")),
        _ => TransportError::unknown(format!("HTTP {status}: {message}")),
    }
}
