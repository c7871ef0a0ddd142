//! SQLite-backed cache of videos seen from the live source.
//!
//! This module provides the persistent fallback store using SQLite with
//! async access via tokio-rusqlite. It supports:
//!
//! - Slug-keyed storage with first-write-wins semantics
//! - Automatic schema migrations
//! - WAL mode for concurrent access
//! - Atomic conditional inserts (insert-if-absent, never overwrite)

pub mod connection;
pub mod migrations;
pub mod videos;

pub use crate::Error;

pub use connection::CacheDb;
pub use videos::Video;
