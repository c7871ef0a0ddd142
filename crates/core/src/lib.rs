//! Core types and shared functionality for streambox.
//!
//! This crate provides:
//! - The canonical `Video` model and slug derivation
//! - Cache implementation with SQLite backend
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod slug;

pub use cache::{CacheDb, Video};
pub use config::AppConfig;
pub use error::Error;
pub use slug::slugify;
