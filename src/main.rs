//! Expert Connect - `WhatsApp` menu bot routing learners to human experts
//!
//! Receives Twilio webhooks, walks each sender through a short menu and
//! contacts the chosen domain's expert by message and/or call.

mod api;
mod config;
mod messages;
mod runtime;
mod session;
mod state_machine;
mod transport;

use api::{create_router, AppState};
use config::AppConfig;
use runtime::ConversationRuntime;
use session::{InMemorySessionStore, SessionStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transport::{LoggingNotifier, Notifier, TwilioClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine, variables may come from the environment
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expert_connect=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    // Configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    tracing::info!(
        domain_count = config.catalog.len(),
        domains = ?config.catalog.iter().map(|d| d.key.as_str()).collect::<Vec<_>>(),
        session_timeout_minutes = config.session_timeout.num_minutes(),
        "Configuration loaded"
    );

    // Outbound transport
    let twilio = TwilioClient::new(&config.twilio)?;
    let notifier: Arc<dyn Notifier> = Arc::new(LoggingNotifier::new(Arc::new(twilio)));

    // Session storage
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(config.session_timeout));

    // Create application state
    let runtime = ConversationRuntime::new(store, notifier, Arc::new(config.catalog));
    let state = AppState::new(runtime);

    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Expert Connect listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
