//! opinions server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use opinions_server::ServerConfig;
use opinions_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Opinions JSON API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override `database_path` from the configuration.
  #[arg(long)]
  database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;
  if let Some(database) = cli.database {
    server_cfg.database_path = database;
  }

  let store = if server_cfg.in_memory() {
    tracing::warn!("using an in-memory store; data is lost on exit");
    SqliteStore::open_in_memory()
      .await
      .context("failed to open in-memory store")?
  } else {
    let store_path = server_cfg.resolved_database_path();
    SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?
  };

  let app = opinions_server::app(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
