//! Query resolution: live-source first, cache fallback.
//!
//! One module per query kind. Every resolver follows the same shape:
//! ask the live source for a batch, branch on "did anything come back",
//! reconcile live candidates into the cache, and fall back to cache
//! reads (with presentation shuffling) when the live source yields
//! nothing usable.

pub mod category;
pub mod details;
pub mod paging;
pub mod reconcile;
pub mod search;
pub mod streams;
pub mod trending;
pub mod variants;

use std::sync::Arc;

use streambox_client::{Endpoints, LiveSource};
use streambox_core::{CacheDb, Video};

/// Default page size for trending queries.
pub const DEFAULT_TRENDING_COUNT: usize = 30;

/// Default page size for search queries.
pub const DEFAULT_SEARCH_COUNT: usize = 10;

/// Fixed page size for category browsing.
pub const CATEGORY_PAGE_SIZE: usize = 50;

/// Live batch size fetched when resolving a details query.
pub const DETAILS_BATCH: usize = 60;

/// Live batch size fetched when resolving a streams query.
pub const STREAMS_BATCH: usize = 100;

/// Maximum number of suggested videos on a details payload.
pub const SUGGESTED_LIMIT: usize = 200;

/// The query orchestrator.
///
/// Holds the long-lived cache handle and the live source behind its
/// capability trait; both are injected at bootstrap.
#[derive(Clone)]
pub struct Resolver {
    pub(crate) db: CacheDb,
    pub(crate) source: Arc<dyn LiveSource>,
    pub(crate) endpoints: Endpoints,
}

impl Resolver {
    pub fn new(db: CacheDb, source: Arc<dyn LiveSource>, endpoints: Endpoints) -> Self {
        Self { db, source, endpoints }
    }
}

/// Resolve a requested id against normalized candidates: exact match
/// first, else the first candidate in source order whose id contains
/// the requested id. No ranking — first match wins, so the result is
/// deliberately order-sensitive.
pub(crate) fn first_match(videos: &[Video], target: &str) -> Option<Video> {
    videos
        .iter()
        .find(|v| v.id == target)
        .or_else(|| videos.iter().find(|v| v.id.contains(target)))
        .cloned()
}


#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use streambox_client::RawCandidate;

    /// Live source stub returning a fixed batch.
    pub struct StaticSource {
        pub items: Vec<RawCandidate>,
    }

    impl StaticSource {
        pub fn of(items: &[(&str, &str, &str)]) -> Self {
            Self {
                items: items
                    .iter()
                    .map(|(title, poster, video)| RawCandidate {
                        title: title.to_string(),
                        poster: poster.to_string(),
                        video: video.to_string(),
                    })
                    .collect(),
            }
        }

        pub fn empty() -> Self {
            Self { items: Vec::new() }
        }
    }

    #[async_trait]
    impl LiveSource for StaticSource {
        async fn fetch(&self, _url: &str) -> Vec<RawCandidate> {
            self.items.clone()
        }
    }

    pub async fn resolver_with(source: StaticSource) -> Resolver {
        let db = CacheDb::open_in_memory().await.unwrap();
        let endpoints = Endpoints::new("https://example.com/catalog", "https://example.com/search");
        Resolver::new(db, Arc::new(source), endpoints)
    }
}
