//! AI Village Doctor - symptom guidance chat
//!
//! Serves a browser chat widget that answers symptom descriptions with
//! emergency alerts, language-model guidance, or offline templates.

mod api;
mod config;
mod engine;
mod llm;
mod session;
mod system_prompt;

use api::{create_router, AppState, SessionStore};
use config::AppConfig;
use engine::ResponseEngine;
use llm::{LoggingService, OpenAIService};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "village_doctor=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = AppConfig::from_env()?;

    let engine = if let Some(collaborator) = &config.collaborator {
        let service = OpenAIService::new(
            collaborator.api_key.clone(),
            collaborator.model.clone(),
            collaborator.gateway.as_deref(),
            collaborator.timeout,
        )?;
        tracing::info!(
            model = %collaborator.model,
            endpoint = %service.endpoint(),
            timeout_secs = collaborator.timeout.as_secs(),
            "Language model guidance enabled"
        );
        ResponseEngine::with_collaborator(Arc::new(LoggingService::new(Arc::new(service))))
            .collaborator_timeout(collaborator.timeout)
    } else {
        tracing::warn!(
            reason = config.offline_reason(),
            "Using offline guidance templates"
        );
        ResponseEngine::offline()
    };

    let sessions = SessionStore::new(Arc::new(engine), config.max_sessions);
    let state = AppState::new(Arc::new(sessions));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.bind_addr();
    tracing::info!("Village doctor listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
