//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error renders as `{"message": "..."}` with the status of its variant.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use opinions_core::store::StoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Opinion with given id not found")]
  NotFound,

  #[error("No opinions in database")]
  NoOpinions,

  #[error("Opinion with this text already exists")]
  DuplicateText,

  #[error("Required fields missing")]
  MissingFields,

  /// The request body could not be read as a JSON object.
  #[error("{1}")]
  InvalidBody(StatusCode, String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a store error, keeping the conditions clients are told about.
  pub fn store<E: StoreError>(e: E) -> Self {
    if e.is_duplicate_text() {
      ApiError::DuplicateText
    } else if e.is_not_found() {
      ApiError::NotFound
    } else {
      ApiError::Store(Box::new(e))
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound | ApiError::NoOpinions => StatusCode::NOT_FOUND,
      ApiError::DuplicateText | ApiError::MissingFields => StatusCode::BAD_REQUEST,
      ApiError::InvalidBody(status, _) => *status,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<opinions_core::Error> for ApiError {
  fn from(e: opinions_core::Error) -> Self {
    match e {
      opinions_core::Error::MissingRequiredField(_) => ApiError::MissingFields,
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::InvalidBody(rejection.status(), rejection.body_text())
  }
}

// Non-integer ids never name an opinion.
impl From<PathRejection> for ApiError {
  fn from(_: PathRejection) -> Self { ApiError::NotFound }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if let ApiError::Store(e) = &self {
      tracing::error!(error = %e, "store failure");
    }
    (status, Json(json!({ "message": self.to_string() }))).into_response()
  }
}
