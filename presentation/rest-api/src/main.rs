use dotenvy::dotenv;

mod api;
mod config;
mod setup;

use config::app_config::AppConfig;
use setup::{dependency_injection::DependencyContainer, server::Server};

/// Receipt extraction API entry point
///
/// Initializes logging and configuration, wires the extraction pipeline and
/// starts the HTTP server.
/// - config/: Application configuration (server, CORS, inference)
/// - setup/: Dependency injection and server setup
/// - api/: Route handlers, DTOs and error mapping
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables, so RUST_LOG from .env is honored
    dotenv().ok();

    // 2. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 3. Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(
        provider = %config.inference.provider,
        model = %config.inference.model,
        strictness = %config.inference.strictness,
        schema_version = business::domain::receipt::prompt::SCHEMA_VERSION,
        "Receipt extraction configured"
    );

    // 4. Wire dependencies
    let container = DependencyContainer::new(config.inference.clone());

    // 5. Run server
    Server::run(config, container).await?;

    Ok(())
}
