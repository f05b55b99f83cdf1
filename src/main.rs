use anyhow::Context;
use clap::Parser;
use configuration::load_config;
use database::{connect, prepare_schema, DbRepository};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// REST service recording cities, temperature measurements and webhooks.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML or YAML).
    #[arg(long, default_value = "config.toml")]
    cfg: PathBuf,
}

/// The main entry point for the weather service.
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        // The log writer's guard is dropped with `run`, so report on stderr.
        eprintln!("FATAL: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // A .env file may carry RUST_LOG; it is optional.
    dotenvy::dotenv().ok();

    let config = load_config(&cli.cfg)
        .with_context(|| format!("Config load error ({})", cli.cfg.display()))?;
    let _guard = init_tracing(&config.log_level)?;

    tracing::info!("Weather Service started");
    tracing::info!("Configuration file: {}", cli.cfg.display());
    tracing::info!("Database instance: {}", config.db);

    let pool = connect(&config.db)
        .await
        .context("Connection to PostgreSQL failed")?;
    prepare_schema(&pool).await.context("Prepare")?;

    let db_repo = DbRepository::new(pool);
    let result = web_server::run_server(&config, db_repo.clone())
        .await
        .with_context(|| format!("REST server on {} failed", config.listen_addr()));

    db_repo.close().await;
    result
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) -> anyhow::Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Invalid log level")?;
    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}
