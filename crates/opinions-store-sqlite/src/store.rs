//! [`SqliteStore`] — the SQLite implementation of [`OpinionStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use opinions_core::{
  opinion::{NewOpinion, Opinion, OpinionPatch},
  store::OpinionStore,
};

use crate::{
  encode::{OPINION_COLUMNS, RawOpinion, encode_dt},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An opinion store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a query expected to yield at most one opinion row.
  async fn query_one(
    &self,
    sql: String,
    param: rusqlite::types::Value,
  ) -> Result<Option<Opinion>> {
    let raw: Option<RawOpinion> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![param], RawOpinion::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawOpinion::into_opinion).transpose()
  }
}

// ─── OpinionStore impl ───────────────────────────────────────────────────────

impl OpinionStore for SqliteStore {
  type Error = Error;

  async fn get(&self, id: i64) -> Result<Option<Opinion>> {
    self
      .query_one(
        format!("SELECT {OPINION_COLUMNS} FROM opinions WHERE id = ?1"),
        id.into(),
      )
      .await
  }

  async fn list_all(&self) -> Result<Vec<Opinion>> {
    let raws: Vec<RawOpinion> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {OPINION_COLUMNS} FROM opinions ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawOpinion::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawOpinion::into_opinion).collect()
  }

  async fn find_by_text<'a>(&'a self, text: &'a str) -> Result<Option<Opinion>> {
    self
      .query_one(
        format!("SELECT {OPINION_COLUMNS} FROM opinions WHERE text = ?1"),
        text.to_owned().into(),
      )
      .await
  }

  async fn create(&self, input: NewOpinion) -> Result<Opinion> {
    let timestamp = Utc::now();
    let at_str    = encode_dt(timestamp);

    let NewOpinion { title, text, source, added_by } = input;
    let (title_c, text_c, source_c, added_by_c) =
      (title.clone(), text.clone(), source.clone(), added_by.clone());

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO opinions (title, text, source, timestamp, added_by)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![title_c, text_c, source_c, at_str, added_by_c],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(Error::from_write)?;

    tracing::debug!(id, "opinion inserted");

    Ok(Opinion { id, title, text, source, timestamp, added_by })
  }

  async fn update(&self, opinion: Opinion, patch: OpinionPatch) -> Result<Opinion> {
    let merged = opinion.apply(patch);

    let id       = merged.id;
    let title    = merged.title.clone();
    let text     = merged.text.clone();
    let source   = merged.source.clone();
    let added_by = merged.added_by.clone();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE opinions
           SET title = ?1, text = ?2, source = ?3, added_by = ?4
           WHERE id = ?5",
          rusqlite::params![title, text, source, added_by, id],
        )?)
      })
      .await
      .map_err(Error::from_write)?;

    if changed == 0 {
      return Err(Error::OpinionNotFound(id));
    }

    tracing::debug!(id, "opinion updated");

    Ok(merged)
  }

  async fn delete(&self, id: i64) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM opinions WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn pick_random(&self) -> Result<Option<Opinion>> {
    let raw: Option<RawOpinion> = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {OPINION_COLUMNS} FROM opinions ORDER BY RANDOM() LIMIT 1"
              ),
              [],
              RawOpinion::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawOpinion::into_opinion).transpose()
  }
}
