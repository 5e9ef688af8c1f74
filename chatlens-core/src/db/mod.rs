//! Database layer for chatlens
//!
//! This module provides read-only access to a chat archive with:
//! - A single schema mapping for the message view
//! - The [`MessageSource`] seam used by the analyzer's callers

pub mod repo;
pub mod schema;

pub use repo::{Database, InMemorySource, MessageSource};
pub use schema::{MessageRow, ViewMapping, MESSAGE_VIEW};
