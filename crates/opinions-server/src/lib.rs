//! Server wiring for the opinions API: configuration and the traced
//! application router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use opinions_core::store::OpinionStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// `database_path` value that selects a throwaway in-memory store.
pub const IN_MEMORY: &str = ":memory:";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `OPINIONS_*` environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:          "127.0.0.1".to_string(),
      port:          5000,
      database_path: PathBuf::from("opinions.db"),
    }
  }
}

impl ServerConfig {
  /// Load from an optional TOML file, overridden by `OPINIONS_*` variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("OPINIONS"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `true` if the store should live in memory only.
  pub fn in_memory(&self) -> bool { self.database_path.as_os_str() == IN_MEMORY }

  /// The database path with a leading `~` expanded to the home directory.
  pub fn resolved_database_path(&self) -> PathBuf {
    expand_tilde(&self.database_path)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router with per-request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: OpinionStore + 'static,
{
  opinions_api::router(store).layer(TraceLayer::new_for_http())
}
