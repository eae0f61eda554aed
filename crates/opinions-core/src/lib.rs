//! Core types and trait definitions for the opinions service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod error;
pub mod opinion;
pub mod store;

pub use error::{Error, Result};
pub use opinion::{NewOpinion, Opinion, OpinionFields, OpinionPatch};
