//! Error type for `opinions-store-sqlite`.

use opinions_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The row vanished between lookup and write.
  #[error("opinion not found: {0}")]
  OpinionNotFound(i64),

  /// The `UNIQUE` constraint on `opinions.text` rejected a write.
  #[error("an opinion with this text already exists")]
  DuplicateText,
}

impl Error {
  /// Classify a write error, turning a unique-constraint violation into
  /// [`Error::DuplicateText`].
  pub(crate) fn from_write(e: tokio_rusqlite::Error) -> Self {
    if let tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
      ref err,
      _,
    )) = e
      && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    {
      return Error::DuplicateText;
    }
    Error::Database(e)
  }
}

impl StoreError for Error {
  fn is_duplicate_text(&self) -> bool { matches!(self, Error::DuplicateText) }

  fn is_not_found(&self) -> bool { matches!(self, Error::OpinionNotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
