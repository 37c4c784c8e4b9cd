mod config;
mod errors;
mod extract;
mod ner;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ner::{BertEntityTagger, BertTokenClassifier};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV extract API v{}", env!("CARGO_PKG_VERSION"));

    // Both checkpoints come out of the local Hub cache after the first start.
    // Read-only from here on; requests share them concurrently.
    info!("Loading span tagger ({})", config.tagger_model);
    let tagger = BertEntityTagger::from_hub(&config.tagger_model, &config.model_revision)?;

    info!("Loading token classifier ({})", config.classifier_model);
    let classifier =
        BertTokenClassifier::from_hub(&config.classifier_model, &config.model_revision)?;

    let state = AppState {
        tagger: Arc::new(tagger),
        classifier: Arc::new(classifier),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
