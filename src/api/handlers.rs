//! HTTP request handlers

use super::types::{HealthResponse, Twiml, WebhookForm};
use super::AppState;
use crate::messages;
use crate::session::SessionStore;
use crate::transport::twiml;
use axum::{
    extract::{rejection::FormRejection, State},
    routing::{get, post},
    Form, Json, Router,
};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tracing::Instrument;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Inbound chat messages
        .route("/webhook", post(receive_message))
        // Inbound voice calls
        .route("/voice", post(voice_call))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat Webhook
// ============================================================

async fn receive_message(
    State(state): State<AppState>,
    form: Result<Form<WebhookForm>, FormRejection>,
) -> Twiml {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Undecodable webhook payload");
            return message_reply(messages::INVALID_MESSAGE);
        }
    };

    let Some((sender, text)) = form.sender_and_text() else {
        tracing::warn!("Webhook without sender or body");
        return message_reply(messages::INVALID_MESSAGE);
    };

    let request_id = form
        .message_sid
        .clone()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let span = tracing::info_span!("webhook", request_id = %request_id, sender = %sender);

    let outcome = AssertUnwindSafe(state.runtime.handle_message(sender, text))
        .catch_unwind()
        .instrument(span)
        .await;

    match outcome {
        Ok(Ok(reply)) => message_reply(&reply),
        Ok(Err(e)) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to handle message");
            message_reply(messages::SERVER_ERROR)
        }
        Err(_) => {
            tracing::error!(request_id = %request_id, "Panic while handling message");
            message_reply(messages::SERVER_ERROR)
        }
    }
}

fn message_reply(text: &str) -> Twiml {
    Twiml(twiml::messaging_response(text))
}

// ============================================================
// Voice Webhook
// ============================================================

async fn voice_call() -> Twiml {
    Twiml(twiml::voice_response(
        messages::VOICE_NOT_CONFIGURED,
        Some("woman"),
    ))
}

// ============================================================
// Liveness
// ============================================================

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: state.runtime.store().session_count().await,
    })
}

async fn get_version() -> &'static str {
    concat!("expert-connect ", env!("CARGO_PKG_VERSION"))
}
