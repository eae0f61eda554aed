//! JSON REST API for opinions.
//!
//! Exposes an axum [`Router`] backed by any [`opinions_core::store::OpinionStore`].
//! Tracing layers, TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = opinions_api::router(store.clone());
//! ```

pub mod error;
pub mod opinions;

use std::sync::Arc;

use axum::{Router, routing::get};
use opinions_core::store::OpinionStore;

pub use error::ApiError;

/// Build the API routes for `store`, without the `/api` prefix.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: OpinionStore + 'static,
{
  Router::new()
    .route("/opinions/", get(opinions::list::<S>).post(opinions::create::<S>))
    .route(
      "/opinions/{id}/",
      get(opinions::get_one::<S>)
        .patch(opinions::update_one::<S>)
        .delete(opinions::delete_one::<S>),
    )
    .route("/get-random-opinion/", get(opinions::random::<S>))
    .with_state(store)
}

/// The full application router: [`api_router`] mounted under `/api`.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: OpinionStore + 'static,
{
  Router::new().nest("/api", api_router(store))
}
