/// Server setup and initialization
///
/// Wires together all components: backend client, mail relay, and HTTP routes.
/// Provides the application factory used by `main` and by the integration tests.

use crate::{
    api::{create_dashboard_routes, create_public_routes, create_report_routes, AppState},
    baas::BaasClient,
    config::Config,
    mail::SmtpMailer,
};
use anyhow::Result;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Create the main Axum application with all routes
///
/// Builds the backend client and SMTP transport once; every handler shares them
/// through `AppState`.
pub async fn create_app(config: Config) -> Result<Router> {
    tracing::info!("🔌 Initializing backend client for {}", config.baas.url);
    let baas = BaasClient::new(&config.baas)
        .map_err(|e| anyhow::anyhow!("Failed to initialize backend client: {}", e))?;
    if config.baas.anon_key.is_empty() {
        tracing::warn!("⚠️ BAAS_ANON_KEY is empty; backend requests will be anonymous");
    }

    tracing::info!(
        "📧 Initializing SMTP relay {}:{} (secure: {})",
        config.smtp.host,
        config.smtp.port,
        config.smtp.secure
    );
    let mailer = SmtpMailer::new(&config.smtp)
        .map_err(|e| anyhow::anyhow!("Failed to initialize SMTP transport: {}", e))?;

    let http = reqwest::Client::builder()
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

    tracing::info!("🏗️ Creating application state");
    let state = AppState {
        baas: Arc::new(baas),
        mailer: Arc::new(mailer),
        http,
        mail: config.mail.clone(),
        site: config.site.clone(),
    };

    let app = build_router(state);
    tracing::info!("✅ Application initialized successfully");

    Ok(app)
}

/// Build the router over an existing state
pub fn build_router(state: AppState) -> Router {
    tracing::info!("📡 Creating HTTP router with all endpoints");
    Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))
        // Public pages and the report form
        .merge(create_public_routes())
        // Admin dashboard
        .merge(create_dashboard_routes())
        // Report relay API
        .merge(create_report_routes())
        .with_state(state)
}

/// Start the HTTP server with the given configuration
///
/// Log verbosity follows `RUST_LOG`, defaulting to `info`.
pub async fn start_server(config: Config) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting County Advocacy server...");

    let app = create_app(config.clone()).await?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
