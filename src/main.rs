use clap::Parser;
use loc_workflow::application::engine::LetterEngine;
use loc_workflow::config::load_config;
use loc_workflow::domain::ports::{EventSinkBox, LetterStoreBox, ParticipantDirectoryBox};
use loc_workflow::infrastructure::in_memory::{InMemoryLetterStore, InMemoryParticipantDirectory};
#[cfg(feature = "storage-rocksdb")]
use loc_workflow::infrastructure::rocksdb::RocksDBStore;
use loc_workflow::infrastructure::tracing_sink::TracingEventSink;
use loc_workflow::interfaces::csv::letter_writer::LetterWriter;
use loc_workflow::interfaces::json::action_reader::ActionReader;
use loc_workflow::interfaces::json::event_writer::JsonLinesEventSink;
use loc_workflow::interfaces::json::participant_loader::ParticipantSetup;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input actions file, one JSON action per line
    input: PathBuf,

    /// JSON file declaring the banks and people taking part
    #[arg(long)]
    participants: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Write every emitted event to this file as JSON lines
    #[arg(long)]
    events: Option<PathBuf>,

    /// JSON configuration file (optional)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).into_diagnostic()?;
    init_tracing(&config.log_filter);

    let (letters, participants) = open_stores(cli.db_path)?;

    let setup = ParticipantSetup::from_reader(BufReader::new(
        File::open(&cli.participants).into_diagnostic()?,
    ))
    .into_diagnostic()?;
    setup.load_into(&*participants).await.into_diagnostic()?;

    let events: EventSinkBox = match cli.events {
        Some(path) => Box::new(JsonLinesEventSink::new(
            File::create(path).into_diagnostic()?,
        )),
        None => Box::new(TracingEventSink),
    };

    let engine =
        LetterEngine::new(letters, participants, events).with_policy(config.approval_policy);

    // Process actions
    let file = File::open(cli.input).into_diagnostic()?;
    let reader = ActionReader::new(BufReader::new(file));
    let mut processed = 0usize;
    let mut refused = 0usize;
    for action_result in reader.actions() {
        match action_result {
            Ok(action) => match engine.process_action(action).await {
                Ok(_) => processed += 1,
                Err(e) if e.is_domain_rule() => refused += 1,
                Err(e) => {
                    refused += 1;
                    error!("Error processing action: {}", e);
                }
            },
            Err(e) => {
                warn!("Error reading action: {}", e);
            }
        }
    }
    info!(processed, refused, "Finished processing actions");

    // Collect final state from engine
    let letters = engine.into_results().await.into_diagnostic()?;

    // Output final state
    let stdout = io::stdout();
    let mut writer = LetterWriter::new(stdout.lock());
    writer.write_letters(letters).into_diagnostic()?;

    Ok(())
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn in_memory_stores() -> (LetterStoreBox, ParticipantDirectoryBox) {
    (
        Box::new(InMemoryLetterStore::new()),
        Box::new(InMemoryParticipantDirectory::new()),
    )
}

#[cfg(feature = "storage-rocksdb")]
fn open_stores(db_path: Option<PathBuf>) -> Result<(LetterStoreBox, ParticipantDirectoryBox)> {
    match db_path {
        Some(db_path) => {
            // Use persistent storage (RocksDB)
            let store = RocksDBStore::open(db_path).into_diagnostic()?;
            Ok((Box::new(store.clone()), Box::new(store)))
        }
        None => Ok(in_memory_stores()),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_stores(db_path: Option<PathBuf>) -> Result<(LetterStoreBox, ParticipantDirectoryBox)> {
    if db_path.is_some() {
        warn!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(in_memory_stores())
}
