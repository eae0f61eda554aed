//! The `Opinion` entity and its inbound field sets.
//!
//! [`Opinion`] serialises directly into the transport representation.
//! Inbound JSON is read into [`OpinionFields`], which has no `id` or
//! `timestamp` member, so those are never taken from clients.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{
  Deserialize, Deserializer, Serialize,
  de::{IgnoredAny, MapAccess, Visitor},
};

use crate::{Error, Result};

// ─── Opinion ─────────────────────────────────────────────────────────────────

/// A titled piece of text, attributed to a source and a contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opinion {
  pub id:        i64,
  pub title:     String,
  /// Unique across all opinions.
  pub text:      String,
  pub source:    Option<String>,
  /// Store-assigned creation time; never changes afterwards.
  pub timestamp: DateTime<Utc>,
  pub added_by:  Option<String>,
}

impl Opinion {
  /// Merge `patch` into this opinion. Fields absent from the patch keep
  /// their current values.
  pub fn apply(mut self, patch: OpinionPatch) -> Self {
    if let Some(title) = patch.title {
      self.title = title;
    }
    if let Some(text) = patch.text {
      self.text = text;
    }
    if let Some(source) = patch.source {
      self.source = source;
    }
    if let Some(added_by) = patch.added_by {
      self.added_by = added_by;
    }
    self
  }
}

// ─── NewOpinion ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::OpinionStore::create`].
/// `id` and `timestamp` are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOpinion {
  pub title:    String,
  pub text:     String,
  pub source:   Option<String>,
  pub added_by: Option<String>,
}

impl NewOpinion {
  /// Convenience constructor with the optional fields left empty.
  pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
    Self {
      title:    title.into(),
      text:     text.into(),
      source:   None,
      added_by: None,
    }
  }
}

// ─── OpinionPatch ────────────────────────────────────────────────────────────

/// A partial update. `None` means "leave as is"; for the optional columns,
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpinionPatch {
  pub title:    Option<String>,
  pub text:     Option<String>,
  pub source:   Option<Option<String>>,
  pub added_by: Option<Option<String>>,
}

// ─── OpinionFields ───────────────────────────────────────────────────────────

/// The client-settable fields of an opinion, as read from a request body.
///
/// Only maps are accepted; a sequence is rejected even when its length fits.
/// Unknown keys are ignored. A `null` title or text counts as missing, while a
/// `null` source or contributor is kept as "clear this field".
#[derive(Debug, Clone, Default)]
pub struct OpinionFields {
  pub title:    Option<String>,
  pub text:     Option<String>,
  pub source:   Option<Option<String>>,
  pub added_by: Option<Option<String>>,
}

impl OpinionFields {
  /// Build a creation request; `title` and `text` are required.
  pub fn into_new(self) -> Result<NewOpinion> {
    let title = self.title.ok_or(Error::MissingRequiredField("title"))?;
    let text = self.text.ok_or(Error::MissingRequiredField("text"))?;
    let mut new = NewOpinion::new(title, text);
    new.source = self.source.flatten();
    new.added_by = self.added_by.flatten();
    Ok(new)
  }

  pub fn into_patch(self) -> OpinionPatch {
    OpinionPatch {
      title:    self.title,
      text:     self.text,
      source:   self.source,
      added_by: self.added_by,
    }
  }
}

impl<'de> Deserialize<'de> for OpinionFields {
  fn deserialize<D>(de: D) -> std::result::Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    de.deserialize_map(FieldsVisitor)
  }
}

struct FieldsVisitor;

impl<'de> Visitor<'de> for FieldsVisitor {
  type Value = OpinionFields;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str("a JSON object of opinion fields")
  }

  fn visit_map<A>(self, mut map: A) -> std::result::Result<OpinionFields, A::Error>
  where
    A: MapAccess<'de>,
  {
    let mut fields = OpinionFields::default();
    while let Some(key) = map.next_key::<String>()? {
      match key.as_str() {
        "title" => fields.title = map.next_value()?,
        "text" => fields.text = map.next_value()?,
        "source" => fields.source = Some(map.next_value()?),
        "added_by" => fields.added_by = Some(map.next_value()?),
        _ => {
          map.next_value::<IgnoredAny>()?;
        }
      }
    }
    Ok(fields)
  }
}
