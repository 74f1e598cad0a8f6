//! netcounter simulated device
//!
//! Standalone HTTP server answering like the counter firmware

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use netcounter_sim::{DeviceState, SimConfig};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// Simulated netcounter device
#[derive(Parser, Debug)]
#[command(name = "netcounter-sim", version, about)]
struct Args {
    /// Config file (defaults to netcounter-sim.toml or the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the starting value
    #[arg(long)]
    initial: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::load_default()?,
    };
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(initial) = args.initial {
        config.device.initial = initial;
    }
    config.validate()?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let listener = TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        initial = config.device.initial,
        step = config.device.step,
        "device simulator listening"
    );

    netcounter_sim::serve(listener, DeviceState::new(config.device)).await?;
    Ok(())
}
