//! API request and response types

use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Form fields Twilio posts for an inbound message
#[derive(Debug, Default, Deserialize)]
pub struct WebhookForm {
    #[serde(rename = "From")]
    pub from: Option<String>,
    #[serde(rename = "Body")]
    pub body: Option<String>,
    #[serde(rename = "MessageSid")]
    pub message_sid: Option<String>,
}

impl WebhookForm {
    /// Sender and text, if both are present and non-blank
    pub fn sender_and_text(&self) -> Option<(&str, &str)> {
        let sender = self.from.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let text = self.body.as_deref().filter(|b| !b.trim().is_empty())?;
        Some((sender, text))
    }
}

/// XML document returned to Twilio
#[derive(Debug)]
pub struct Twiml(pub String);

impl IntoResponse for Twiml {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "text/xml; charset=utf-8")], self.0).into_response()
    }
}

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
}
