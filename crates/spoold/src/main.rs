//! spoold - category spooling daemon
//!
//! Reads newline-delimited records from stdin, queues them, and persists
//! them to per-category rotating files on a flush interval.
//!
//! # Usage
//!
//! ```bash
//! # Run with defaults (spool/ under the working directory)
//! some-producer | spoold
//!
//! # Run with a config file and an explicit node id
//! some-producer | spoold --config configs/spool.toml --node-id ingest-01
//! ```

mod ingest;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use spool_config::{Config, LogFormat};
use spool_persist::{CategoryDirs, MemoryQueue, PersistService, RegistryConfig, WriterRegistry};

/// Category spooling daemon
#[derive(Parser, Debug)]
#[command(name = "spoold")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "configs/spool.toml")]
    config: PathBuf,

    /// Node id embedded in output filenames (overrides config)
    #[arg(long)]
    node_id: Option<String>,

    /// Log level (trace, debug, info, warn, error; overrides config)
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };
    if let Some(node_id) = cli.node_id {
        config.persist.node_id = node_id;
    }
    config.validate()?;

    let level = cli
        .log_level
        .unwrap_or_else(|| config.log.level.as_str().to_string());
    init_logging(&level, config.log.format)?;

    tracing::info!(
        node_id = %config.persist.node_id,
        base_path = %config.persist.base_path.display(),
        max_file_size = config.persist.max_file_size,
        "spoold starting"
    );

    let queue = Arc::new(MemoryQueue::new());
    let registry = WriterRegistry::new(
        RegistryConfig {
            node_id: config.persist.node_id.clone(),
            lazy: config.persist.lazy,
            max_file_size: config.persist.max_file_size,
        },
        Arc::new(CategoryDirs::new(&config.persist.base_path)),
    );
    let service = PersistService::new(queue.clone(), registry);

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.persist.flush_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if let Some(record) = ingest::parse_line(&line) {
                        queue.enqueue(record);
                    }
                }
                Ok(None) => {
                    tracing::info!("input closed");
                    break;
                }
                Err(error) => {
                    tracing::error!(%error, "reading input failed");
                    break;
                }
            },
            _ = ticker.tick() => service.flush(),
            _ = &mut ctrl_c => {
                tracing::info!("shutdown signal received");
                break;
            }
        }
    }

    service.shutdown().await;
    Ok(())
}

/// Initialize the tracing subscriber for logging
fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Console => registry
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init(),
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
    }

    Ok(())
}
