use clap::Parser;
use miette::{IntoDiagnostic, Result};
use notification_relay::application::processor::MessageProcessor;
use notification_relay::domain::ports::SharedStorageProvider;
use notification_relay::error::RelayError;
use notification_relay::infrastructure::in_memory::{
    InMemoryNotificationChannel, InMemoryStorageProvider, SequentialTransactionTracker,
};
#[cfg(feature = "storage-rocksdb")]
use notification_relay::infrastructure::rocksdb::RocksDBStorageProvider;
use notification_relay::infrastructure::serializer::JsonMessageSerializer;
use notification_relay::interfaces::csv::envelope_writer::EnvelopeWriter;
use notification_relay::interfaces::csv::notification_reader::NotificationReader;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{Level, error, info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input notifications CSV file (`id, payload`)
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Maximum number of notifications handed over per cycle
    #[arg(long, default_value_t = 10)]
    batch_size: usize,

    /// Log level for diagnostics written to stderr
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

#[cfg(feature = "storage-rocksdb")]
fn storage_provider(db_path: Option<PathBuf>) -> Result<SharedStorageProvider<i64>> {
    match db_path {
        Some(db_path) => {
            let store = RocksDBStorageProvider::open(db_path).into_diagnostic()?;
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(InMemoryStorageProvider::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn storage_provider(db_path: Option<PathBuf>) -> Result<SharedStorageProvider<i64>> {
    if db_path.is_some() {
        warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Arc::new(InMemoryStorageProvider::new()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_max_level(cli.log_level)
        .init();

    let channel =
        Arc::new(InMemoryNotificationChannel::<i64>::new(cli.batch_size).into_diagnostic()?);

    // Load every notification up front; the channel then drains and closes.
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = NotificationReader::new(file);
    for record in reader.notifications() {
        match record {
            Ok(notification) => channel.push(notification),
            Err(e) => error!(error = %e, "Error reading notification"),
        }
    }
    channel.close();

    let processor = MessageProcessor::new(
        channel.clone(),
        storage_provider(cli.db_path)?,
        Arc::new(JsonMessageSerializer),
        Arc::new(SequentialTransactionTracker::new()),
    );

    let cancellation = CancellationToken::new();
    tokio::spawn({
        let cancellation = cancellation.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancellation.cancel();
            }
        }
    });

    let stdout = io::stdout();
    let mut writer = EnvelopeWriter::new(stdout.lock()).into_diagnostic()?;
    loop {
        match processor.process_cycle(&cancellation).await {
            Ok(envelope) if envelope.is_empty() => break,
            Ok(envelope) => writer.write_envelope(&envelope).into_diagnostic()?,
            Err(RelayError::Cancelled) => {
                warn!(
                    pending = channel.pending_len(),
                    "Interrupted before the channel was drained"
                );
                break;
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
    writer.flush().into_diagnostic()?;

    info!(
        committed = channel.committed().len(),
        rolled_back = channel.rolled_back().len(),
        "Relay finished"
    );

    Ok(())
}
