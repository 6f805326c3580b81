use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lab_hack_nexus_api::config::{AppConfig, LoggingConfig};
use lab_hack_nexus_api::{app, AppState};

#[derive(Debug, Parser)]
#[command(name = "lab-hack-nexus-api", version, about = "Lab Hack Nexus blog/CMS API server")]
struct Args {
    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SUPABASE_URL and the keys
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config.logging);
    tracing::info!("Starting Lab Hack Nexus API in {:?} mode", config.environment);

    let bind_addr = config.server.bind_addr();
    let state = AppState::from_config(config).context("failed to build BaaS client")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Lab Hack Nexus API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lab_hack_nexus_api=debug,tower_http=info"));

    if logging.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
