mod advisor;
mod compare;
mod form;

use std::path::PathBuf;

use anyhow::{Context as _, anyhow};
use asegurate_core::{Catalog, DEFAULT_MODEL, GEMINI_API_KEY_VAR, GeminiClient};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "asegurate",
    version,
    about = "Find the right insurance with the help of Gemini"
)]
struct Cli {
    /// Gemini model identifier
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL, global = true)]
    model: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in your profile and get one personalised recommendation
    Advisor,
    /// Compare the life insurance catalog against your priorities
    Compare {
        /// JSON file replacing the built-in product catalog
        #[arg(long, env = "ASEGURATE_CATALOG_PATH")]
        catalog: Option<PathBuf>,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    let api_key = std::env::var(GEMINI_API_KEY_VAR).ok();
    let client = GeminiClient::with_model(api_key.as_deref(), &cli.model).map_err(|e| {
        anyhow!(
            "{e}. La clave API de Gemini no se encontró: asegúrate de que {GEMINI_API_KEY_VAR} esté en tu archivo .env."
        )
    })?;
    info!(model = %cli.model, "Gemini client ready");

    match cli.command {
        Command::Advisor => advisor::run(&client).await,
        Command::Compare { catalog } => {
            let catalog = match catalog {
                Some(path) => Catalog::from_path(&path)
                    .with_context(|| format!("loading catalog from {}", path.display()))?,
                None => Catalog::builtin(),
            };
            compare::run(&catalog, &client).await
        }
    }
}
