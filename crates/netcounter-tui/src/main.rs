//! netcounter TUI
//!
//! Terminal user interface for reading and changing a networked counter

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use netcounter_client::{ClientConfig, CounterClient, Operation, OverlapPolicy};
use ratatui::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod action;
mod app;
mod config;
mod event;
mod ui;

use app::App;
use event::EventHandler;

/// netcounter Terminal UI
#[derive(Parser, Debug)]
#[command(name = "netcounter-tui", version, about)]
struct Args {
    /// Device address (host or host:port)
    #[arg(short, long)]
    address: Option<String>,

    /// Config file (defaults to netcounter.toml or the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Refuse to start an operation while another is running
    #[arg(long)]
    reject_overlap: bool,

    /// Tick rate in milliseconds
    #[arg(long, default_value = "250")]
    tick_rate: u64,

    /// Enable debug logging to file
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse arguments
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        let file = std::fs::File::create("netcounter-tui.log")?;
        tracing_subscriber::registry()
            .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
            .with(tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false))
            .init();
    }

    let mut client_config = match &args.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::load_default()?,
    };
    if args.address.is_some() {
        client_config.address = args.address;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        client_config.timeout_ms = timeout_ms;
    }
    if args.reject_overlap {
        client_config.overlap = OverlapPolicy::Reject;
    }
    let client = CounterClient::from_config(&client_config)?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let tick_rate = Duration::from_millis(args.tick_rate);
    let mut app = App::new(client);
    let result = run_app(&mut terminal, &mut app, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Run the application main loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let mut events = EventHandler::new(tick_rate);
    events.start();

    // Show the current value straight away when the address is known
    if !app.address_input.trim().is_empty() {
        app.handle_action(action::Action::Run(Operation::Refresh));
    }

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let Some(event) = events.next().await else {
            break;
        };
        let action = match event {
            event::Event::Key(key) => event::key_to_action(key, app.editing),
            event::Event::Resize(_, _) => action::Action::Render,
            event::Event::Tick => action::Action::Tick,
        };
        app.handle_action(action);

        // Operations report back through the client's state channel
        app.process_state_changes();

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
