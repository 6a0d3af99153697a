/// County Advocacy server entry point
///
/// Reads configuration from the environment and starts the HTTP server.

use county_advocacy::{config::Config, server::start_server};

/// Application entry point
///
/// The server provides:
/// - Public pages at /, /counties/{slug}, /projects/{id}, /submit-report
/// - The admin dashboard at /dashboard/*
/// - Report relay at /api/send-report
/// - Health check at /healthz
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from the environment (defaults to 0.0.0.0:3000)
    let config = Config::default();

    start_server(config).await?;

    Ok(())
}
