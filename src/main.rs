use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use parc_info_auth::config::{self, AppConfig};
use parc_info_auth::database::DatabaseManager;
use parc_info_auth::{router, AppState};

#[derive(Parser)]
#[command(name = "parc-info-auth")]
#[command(about = "Login service for the parc-info web client")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Address to bind (overrides AUTH_API_HOST)")]
    host: Option<String>,

    #[arg(short, long, help = "Port to listen on (overrides AUTH_API_PORT / PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Postgres connection URL (overrides DATABASE_URL)")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = apply_cli(config::config().clone(), cli);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .init();

    tracing::info!("Starting parc-info auth in {:?} mode", config.environment);

    let db = DatabaseManager::new(&config.database).context("invalid database configuration")?;
    tracing::info!("Using database {}", db.redacted_url());

    let app = router(AppState::new(db), &config);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn apply_cli(mut config: AppConfig, cli: Cli) -> AppConfig {
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }
    config
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
