//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use opinions_core::Opinion;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawOpinion::from_row`].
pub const OPINION_COLUMNS: &str = "id, title, text, source, timestamp, added_by";

/// Raw values read directly from an `opinions` row.
pub struct RawOpinion {
  pub id:        i64,
  pub title:     String,
  pub text:      String,
  pub source:    Option<String>,
  pub timestamp: String,
  pub added_by:  Option<String>,
}

impl RawOpinion {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawOpinion {
      id:        row.get(0)?,
      title:     row.get(1)?,
      text:      row.get(2)?,
      source:    row.get(3)?,
      timestamp: row.get(4)?,
      added_by:  row.get(5)?,
    })
  }

  pub fn into_opinion(self) -> Result<Opinion> {
    Ok(Opinion {
      id:        self.id,
      title:     self.title,
      text:      self.text,
      source:    self.source,
      timestamp: decode_dt(&self.timestamp)?,
      added_by:  self.added_by,
    })
  }
}
