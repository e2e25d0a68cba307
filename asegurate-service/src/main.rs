use std::sync::Arc;

use asegurate_core::GeminiClient;
use asegurate_service::{AppState, LogFormat, ServiceConfig, build_router};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing in the configured format
fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "asegurate_service=debug,asegurate_core=debug,tower_http=debug".into()
    });

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A local .env may carry GEMINI_API_KEY; real environment variables win
    dotenvy::dotenv().ok();

    let config = ServiceConfig::from_env();
    init_tracing(config.log_format);

    let generator =
        match GeminiClient::with_model(config.gemini_api_key.as_deref(), &config.gemini_model) {
            Ok(client) => Arc::new(client),
            Err(e) => {
                error!(error = %e, "Gemini API key not found, set GEMINI_API_KEY in the environment or a .env file");
                std::process::exit(1);
            }
        };

    let catalog = config.load_catalog()?;
    info!(products = catalog.len(), model = %config.gemini_model, "Catalog ready");

    let app = build_router(AppState::new(generator, catalog));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);

    info!("Available endpoints:");
    info!("  GET  /health                - Health check");
    info!("  POST /advisor               - Apply an advisor action (start, submit, restart, back_to_form, refresh)");
    info!("  GET  /advisor/{{session_id}}  - Inspect an advisor session");
    info!("  POST /compare               - Find the best life insurance for the given criteria");
    info!("  GET  /catalog               - List the available products");

    axum::serve(listener, app).await?;

    Ok(())
}
