//! PIN pad kiosk entry point.
//!
//! # Usage
//!
//! ```bash
//! # Run the kiosk (default data directory)
//! pinpad
//!
//! # Open on the results screen
//! pinpad --results
//!
//! # Print recorded attempts without starting the kiosk
//! pinpad results
//!
//! # Write the results table as an HTML fragment
//! pinpad export-html results.html
//! ```

use std::{fs::OpenOptions, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use pinpad_app::ResultsView;
use pinpad_store::{RedbLog, load_or_empty};
use pinpad_tui::{AppEvent, KioskConfig, Runtime, SystemEnv, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// PIN pad recall kiosk
#[derive(Parser, Debug)]
#[command(name = "pinpad")]
#[command(about = "Terminal kiosk: remember a code, re-enter it on a keypad")]
#[command(version)]
struct Args {
    /// Path to the results database
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Path to the log file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Open on the results screen
    #[arg(long)]
    results: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive kiosk (default)
    Run,
    /// Print recorded attempts as a table
    Results,
    /// Write recorded attempts as an HTML table
    ExportHtml {
        /// Output file
        path: PathBuf,
    },
}

impl Args {
    /// Fold arguments over the default configuration.
    fn into_config(self) -> (KioskConfig, Command) {
        let mut config = KioskConfig::default();
        if let Some(db) = self.db {
            config.db_path = db;
        }
        if let Some(log_file) = self.log_file {
            config.log_file = log_file;
        }
        config.log_level = self.log_level;
        config.show_results = self.results;
        (config, self.command.unwrap_or(Command::Run))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, command) = Args::parse().into_config();
    config.ensure_dirs()?;
    init_logging(&config)?;

    tracing::info!("Opening result log at {}", config.db_path.display());
    let log = RedbLog::open(&config.db_path)?;

    match command {
        Command::Run => run_kiosk(&config, log).await,
        Command::Results => {
            print_results(&ResultsView::from_attempts(&load_or_empty(&log)));
            Ok(())
        },
        Command::ExportHtml { path } => {
            let view = ResultsView::from_attempts(&load_or_empty(&log));
            std::fs::write(&path, view.to_html())?;
            tracing::info!("Exported {} rows to {}", view.rows().len(), path.display());
            Ok(())
        },
    }
}

async fn run_kiosk(config: &KioskConfig, log: RedbLog) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Kiosk starting");
    let driver = TerminalDriver::new()?;
    let mut runtime = Runtime::new(driver, log, SystemEnv::new());

    if config.show_results && runtime.dispatch(AppEvent::Navigate { results: true })? {
        return Ok(());
    }

    runtime.run().await?;
    tracing::info!("Kiosk stopped");
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_results(view: &ResultsView) {
    println!("{}", view.to_text());
}

/// Install a file-backed subscriber. The terminal itself is owned by the UI.
fn init_logging(config: &KioskConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new().create(true).append(true).open(&config.log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}
