//! Live-source client for streambox.
//!
//! This crate provides the adapter around the external content
//! provider: endpoint URL construction and an opaque fetch that
//! degrades every failure mode to "no live data".

pub mod source;

pub use source::{Endpoints, HttpLiveSource, LiveSource, RawCandidate, SourceConfig};
