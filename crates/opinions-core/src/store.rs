//! The `OpinionStore` trait.
//!
//! Implemented by storage backends (e.g. `opinions-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::opinion::{NewOpinion, Opinion, OpinionPatch};

/// Classification of backend errors the HTTP layer needs to tell apart.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// `true` when the error is a violation of the unique-text invariant,
  /// however the backend detected it.
  fn is_duplicate_text(&self) -> bool;

  /// `true` when the targeted opinion no longer exists.
  fn is_not_found(&self) -> bool;
}

/// Abstraction over an opinion store backend.
///
/// Each call completes fully before its result is observed; no transaction
/// spans more than one call.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait OpinionStore: Send + Sync {
  type Error: StoreError;

  /// Look up an opinion by id. Returns `None` if not found.
  fn get(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Opinion>, Self::Error>> + Send + '_;

  /// All opinions, in insertion order.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Opinion>, Self::Error>> + Send + '_;

  /// Find the opinion whose text equals `text` exactly.
  fn find_by_text<'a>(
    &'a self,
    text: &'a str,
  ) -> impl Future<Output = Result<Option<Opinion>, Self::Error>> + Send + 'a;

  /// Persist a new opinion. `id` and `timestamp` are assigned here.
  ///
  /// Fails with a duplicate-text error if another opinion has the same text.
  fn create(
    &self,
    input: NewOpinion,
  ) -> impl Future<Output = Result<Opinion, Self::Error>> + Send + '_;

  /// Merge `patch` into `opinion` and persist the result.
  ///
  /// Fails with a duplicate-text error if the new text belongs to another
  /// opinion.
  fn update(
    &self,
    opinion: Opinion,
    patch: OpinionPatch,
  ) -> impl Future<Output = Result<Opinion, Self::Error>> + Send + '_;

  /// Permanently remove an opinion. Returns `false` if no row matched.
  fn delete(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// A uniformly chosen opinion, or `None` if the store is empty.
  fn pick_random(
    &self,
  ) -> impl Future<Output = Result<Option<Opinion>, Self::Error>> + Send + '_;
}
