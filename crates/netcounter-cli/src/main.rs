//! netcounter CLI
//!
//! One-shot commands against a networked counter device

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::{Result, eyre::eyre};
use netcounter_client::{ClientConfig, CounterClient, CounterValue, Operation};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "netcounter", version)]
#[command(about = "Read and change a networked counter", long_about = None)]
struct Cli {
    /// Device address (host or host:port)
    #[arg(short, long, global = true)]
    address: Option<String>,

    /// Config file (defaults to netcounter.toml or the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Print the full client state as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Fail when the device reports something other than an integer
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Read the current value
    #[command(alias = "count")]
    Get,
    /// Increment, then read the new value
    #[command(alias = "inc")]
    Add,
    /// Decrement, then read the new value
    #[command(alias = "dec")]
    Sub,
}

impl From<Commands> for Operation {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Get => Operation::Refresh,
            Commands::Add => Operation::Increment,
            Commands::Sub => Operation::Decrement,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::load_default()?,
    };
    if cli.address.is_some() {
        config.address = cli.address;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }

    let address = config
        .address
        .clone()
        .ok_or_else(|| eyre!("no device address given (use --address or set `address` in netcounter.toml)"))?;

    let operation = Operation::from(cli.command);
    debug!(%address, timeout_ms = config.timeout_ms, %operation, "running");

    let client = CounterClient::from_config(&config)?;
    let outcome = client.run(operation, &address).await;
    let state = client.snapshot();
    let strict_error = if cli.strict { state.number().err() } else { None };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else if outcome.is_ok() {
        println!("{}", render_value(state.value));
    }

    if outcome.is_err() {
        eprintln!("{}", state.status);
        return Ok(ExitCode::FAILURE);
    }
    if let Some(e) = strict_error {
        eprintln!("Error: {e}");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Value line for plain output
fn render_value(value: Option<CounterValue>) -> String {
    value.map_or_else(|| "--".to_string(), CounterValue::into_inner)
}
