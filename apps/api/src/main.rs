mod cms;
mod config;
mod content;
mod errors;
mod llm_client;
mod metrics;
mod resume;
mod routes;
mod state;
#[cfg(test)]
mod testing;
mod translation;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cms::images::SanityImageUrls;
use crate::cms::SanityClient;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::resume::profile::ResumeProfile;
use crate::resume::render::TypstRenderer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::translation::{LlmTranslator, Translator};

const IMAGE_FETCH_TIMEOUT_SECS: u64 = 15;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting portfolio API v{}", env!("CARGO_PKG_VERSION"));

    // CMS
    let content = SanityClient::from_config(&config)?;
    info!(
        "Sanity client initialized (project: {}, dataset: {}, cdn: {})",
        config.sanity_project_id, config.sanity_dataset, config.sanity_use_cdn
    );
    let images = SanityImageUrls::new(&config.sanity_project_id, &config.sanity_dataset);

    // Translation is optional; without a key only English resumes are available
    let translator: Option<Arc<dyn Translator>> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(LlmTranslator::new(llm)))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set, Dutch resumes are disabled");
            None
        }
    };

    let profile = ResumeProfile::load(&config.profile_path)?;
    info!("Resume profile loaded from {}", config.profile_path);

    let renderer = TypstRenderer::new();
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(IMAGE_FETCH_TIMEOUT_SECS))
        .build()?;

    // Build app state
    let state = AppState {
        content: Arc::new(content),
        images: Arc::new(images),
        translator,
        renderer: Arc::new(renderer),
        http,
        profile: Arc::new(profile),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
