//! Error types for `opinions-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("required field missing: {0}")]
  MissingRequiredField(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
