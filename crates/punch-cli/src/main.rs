use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use punch_cli::commands::{calendar, day, month, record, status, toggle};
use punch_cli::{Cli, Commands, Config};
use punch_core::StatusController;
use punch_store::StateFile;

/// Load config and open the event store, ensuring the parent directory
/// exists. Corrupt persisted state fails initialization here; the user
/// decides whether to delete the state file or restore a backup.
fn open_controller(config_path: Option<&Path>) -> Result<StatusController<StateFile>> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.state_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create state directory")?;
    }

    let store = StateFile::new(&config.state_path);
    let controller = StatusController::initialize(store)
        .with_context(|| format!("failed to load state from {}", config.state_path.display()))?;
    Ok(controller)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout();
    match cli.command {
        Some(Commands::Toggle) => {
            let mut controller = open_controller(cli.config.as_deref())?;
            toggle::run(&mut stdout, &mut controller)?;
        }
        Some(Commands::Record { kind, notes }) => {
            let mut controller = open_controller(cli.config.as_deref())?;
            record::run(&mut stdout, &mut controller, kind, notes)?;
        }
        Some(Commands::Status) => {
            let controller = open_controller(cli.config.as_deref())?;
            status::run(&mut stdout, &controller)?;
        }
        Some(Commands::Day { date }) => {
            let controller = open_controller(cli.config.as_deref())?;
            day::run(&mut stdout, &controller, date)?;
        }
        Some(Commands::Month { month }) => {
            let controller = open_controller(cli.config.as_deref())?;
            month::run(&mut stdout, &controller, month)?;
        }
        Some(Commands::Calendar { month }) => {
            let controller = open_controller(cli.config.as_deref())?;
            calendar::run(&mut stdout, &controller, month)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
