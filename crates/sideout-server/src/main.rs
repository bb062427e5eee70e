use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use sideout_server::{ServerConfig, SideoutServer};
use tracing_subscriber::EnvFilter;

/// Sideout backend: match reports and user profiles over an object store.
#[derive(Parser)]
#[command(name = "sideout-server", version)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }

    SideoutServer::new(config).serve().await?;
    Ok(())
}
