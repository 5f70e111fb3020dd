//! Ledger entry checker.
//!
//! Loads an entry from a JSON file, reports its balance and every validation
//! problem, and optionally saves the validated entry to a JSON store file.
//!
//! Usage: cargo run --bin lancamento-check -- entry.json [--catalog catalog.json] [--save entries.json]

mod report;
mod store;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::de::DeserializeOwned;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use lancamento_core::ledger::{Catalog, EntrySession, PersistedEntry};
use lancamento_shared::AppConfig;
use lancamento_shared::config::LoggingConfig;

use crate::report::Report;
use crate::store::JsonFileStore;

/// Exit code when the entry has validation problems.
const EXIT_INVALID: u8 = 1;
/// Exit code when saving the entry failed.
const EXIT_SAVE_FAILED: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "lancamento-check", about = "Check a ledger entry for balance and completeness")]
struct Cli {
    /// Entry file (JSON).
    entry: PathBuf,

    /// Accounts and descriptions used to label the report (JSON).
    #[arg(long, env = "LANCAMENTO_CATALOG")]
    catalog: Option<PathBuf>,

    /// Save the entry to this JSON store file when it is valid.
    #[arg(long)]
    save: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let entry: PersistedEntry = read_json(&cli.entry)?;
    let catalog: Catalog = match &cli.catalog {
        Some(path) => read_json(path)?,
        None => Catalog::default(),
    };

    let mut session = EntrySession::edit(&entry);
    info!(draft_id = %session.id(), file = %cli.entry.display(), "Checking entry");

    let report = Report::build(session.draft(), &catalog, config.ledger.amount_scale);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
    }

    if !report.is_valid() {
        return Ok(ExitCode::from(EXIT_INVALID));
    }

    if let Some(path) = cli.save {
        let store = JsonFileStore::new(&path);
        match session.submit(&store).await {
            Ok(entry_id) => {
                info!(entry_id = %entry_id, store = %path.display(), "Entry saved");
                println!("Saved entry {entry_id}");
            }
            Err(err) => {
                error!(code = err.error_code(), error = %err, "Entry not saved");
                eprintln!("{err}");
                return Ok(ExitCode::from(EXIT_SAVE_FAILED));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let registry = tracing_subscriber::registry().with(filter);

    if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("Failed to parse {}", path.display()))
}
