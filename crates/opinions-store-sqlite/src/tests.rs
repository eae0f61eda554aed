//! Integration tests for `SqliteStore` against an in-memory database.

use opinions_core::{
  opinion::{NewOpinion, OpinionPatch},
  store::{OpinionStore, StoreError as _},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get() {
  let s = store().await;

  let mut input = NewOpinion::new("Title", "Text");
  input.source = Some("a book".into());
  let created = s.create(input).await.unwrap();
  assert_eq!(created.title, "Title");
  assert_eq!(created.source.as_deref(), Some("a book"));
  assert_eq!(created.added_by, None);

  let fetched = s.get(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(42).await.unwrap().is_none());
}

#[tokio::test]
async fn ids_are_distinct() {
  let s = store().await;
  let a = s.create(NewOpinion::new("A", "one")).await.unwrap();
  let b = s.create(NewOpinion::new("B", "two")).await.unwrap();
  assert_ne!(a.id, b.id);
}

// ─── Uniqueness ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_text_is_rejected_by_the_database() {
  let s = store().await;
  s.create(NewOpinion::new("A", "same")).await.unwrap();

  let err = s.create(NewOpinion::new("B", "same")).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateText), "got {err:?}");
  assert!(err.is_duplicate_text());
  assert_eq!(s.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_to_existing_text_is_rejected() {
  let s = store().await;
  s.create(NewOpinion::new("A", "first")).await.unwrap();
  let second = s.create(NewOpinion::new("B", "second")).await.unwrap();

  let patch = OpinionPatch { text: Some("first".into()), ..Default::default() };
  let err = s.update(second.clone(), patch).await.unwrap_err();
  assert!(err.is_duplicate_text());

  let unchanged = s.get(second.id).await.unwrap().unwrap();
  assert_eq!(unchanged.text, "second");
}

#[tokio::test]
async fn find_by_text_matches_exactly() {
  let s = store().await;
  let created = s.create(NewOpinion::new("A", "needle")).await.unwrap();

  let found = s.find_by_text("needle").await.unwrap().unwrap();
  assert_eq!(found.id, created.id);
  assert!(s.find_by_text("need").await.unwrap().is_none());
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_all_in_insertion_order() {
  let s = store().await;
  assert!(s.list_all().await.unwrap().is_empty());

  for text in ["one", "two", "three"] {
    s.create(NewOpinion::new("T", text)).await.unwrap();
  }

  let texts: Vec<_> = s
    .list_all()
    .await
    .unwrap()
    .into_iter()
    .map(|o| o.text)
    .collect();
  assert_eq!(texts, ["one", "two", "three"]);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_persists_only_given_fields() {
  let s = store().await;
  let mut input = NewOpinion::new("Title", "Text");
  input.added_by = Some("bob".into());
  let created = s.create(input).await.unwrap();

  let patch = OpinionPatch {
    title: Some("New title".into()),
    source: Some(Some("radio".into())),
    ..Default::default()
  };
  let updated = s.update(created.clone(), patch).await.unwrap();

  let fetched = s.get(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, updated);
  assert_eq!(fetched.title, "New title");
  assert_eq!(fetched.text, "Text");
  assert_eq!(fetched.source.as_deref(), Some("radio"));
  assert_eq!(fetched.added_by.as_deref(), Some("bob"));
  assert_eq!(fetched.timestamp, created.timestamp);
}

#[tokio::test]
async fn update_keeping_own_text_succeeds() {
  let s = store().await;
  let created = s.create(NewOpinion::new("Title", "Text")).await.unwrap();

  let patch = OpinionPatch { text: Some("Text".into()), ..Default::default() };
  let updated = s.update(created, patch).await.unwrap();
  assert_eq!(updated.text, "Text");
}

#[tokio::test]
async fn update_of_deleted_row_is_not_found() {
  let s = store().await;
  let created = s.create(NewOpinion::new("Title", "Text")).await.unwrap();
  assert!(s.delete(created.id).await.unwrap());

  let err = s
    .update(created, OpinionPatch::default())
    .await
    .unwrap_err();
  assert!(err.is_not_found());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_row() {
  let s = store().await;
  let created = s.create(NewOpinion::new("Title", "Text")).await.unwrap();

  assert!(s.delete(created.id).await.unwrap());
  assert!(s.get(created.id).await.unwrap().is_none());
  assert!(!s.delete(created.id).await.unwrap());
}

#[tokio::test]
async fn deleted_text_can_be_reused() {
  let s = store().await;
  let created = s.create(NewOpinion::new("Title", "Text")).await.unwrap();
  s.delete(created.id).await.unwrap();

  s.create(NewOpinion::new("Again", "Text")).await.unwrap();
}

// ─── Random ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn pick_random_on_empty_store_is_none() {
  let s = store().await;
  assert!(s.pick_random().await.unwrap().is_none());
}

#[tokio::test]
async fn pick_random_returns_an_existing_opinion() {
  let s = store().await;
  let mut ids = Vec::new();
  for text in ["a", "b", "c"] {
    ids.push(s.create(NewOpinion::new("T", text)).await.unwrap().id);
  }

  for _ in 0..20 {
    let picked = s.pick_random().await.unwrap().unwrap();
    assert!(ids.contains(&picked.id));
  }
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_rows() {
  let dir = tempfile::tempdir().expect("temp dir");
  let path = dir.path().join("opinions.db");

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create(NewOpinion::new("Title", "Text")).await.unwrap().id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let fetched = s.get(id).await.unwrap().unwrap();
  assert_eq!(fetched.text, "Text");
}
