//! Share screen TUI entry point.

#![allow(clippy::disallowed_types, reason = "Synchronous log file writer")]

use std::{
    fs::OpenOptions,
    path::{Path, PathBuf},
    sync::Mutex,
};

use clap::Parser;
use sharesheet_tui::{
    ConfigOverrides, DemoOrchestrator, Runtime, TerminalDriver, load_config, restore_terminal,
};
use tracing_subscriber::EnvFilter;

/// Share screen terminal UI
#[derive(Parser, Debug)]
#[command(name = "sharesheet-tui")]
#[command(about = "Terminal share screen driven by a demo share workflow")]
#[command(version)]
struct Args {
    /// TOML file with the screen configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Offer the settings entry in the action menu
    #[arg(long)]
    debug: bool,

    /// Delay before the detail sheet reveals itself, in milliseconds
    #[arg(long)]
    reveal_delay_ms: Option<u64>,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to this file
    ///
    /// Logging is off without it: the terminal belongs to the UI.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path, level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path, &args.log_level)?;
    }

    let overrides = ConfigOverrides { debug_menu: args.debug, reveal_delay_ms: args.reveal_delay_ms };
    let config = load_config(args.config.as_deref(), &overrides)?;

    // leave the alternate screen before the panic message is printed
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));

    let demo = DemoOrchestrator::default();
    let states = demo.subscribe();
    let driver = TerminalDriver::new(config.sheet)?;

    let mut runtime = Runtime::new(driver, demo, states, config);
    let result = runtime.run().await;
    if let Err(error) = &result {
        tracing::error!(%error, "screen stopped with an error");
    }
    Ok(result?)
}
