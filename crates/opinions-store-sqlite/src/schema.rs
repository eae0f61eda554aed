//! SQL schema for the opinion SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS opinions (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    title     TEXT NOT NULL,
    text      TEXT NOT NULL UNIQUE,  -- authoritative duplicate-text check
    source    TEXT,
    timestamp TEXT NOT NULL,         -- ISO 8601 UTC; server-assigned
    added_by  TEXT
);

CREATE INDEX IF NOT EXISTS opinions_timestamp_idx ON opinions(timestamp);

PRAGMA user_version = 1;
";
