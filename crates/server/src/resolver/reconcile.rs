//! Reconciliation of live candidates into the cache.
//!
//! Normalizes a live batch, probes which ids the cache already holds
//! in a single set-membership query, and conditionally inserts the
//! rest. Write failures are logged and swallowed: the caller still
//! gets the full normalized sequence, and a degraded cache never
//! breaks a live response. Concurrency safety comes from the store's
//! atomic conditional insert, not from any in-process lock — two
//! requests discovering the same new item both succeed and exactly one
//! row lands.

use streambox_client::RawCandidate;
use streambox_core::{Video, slugify};

use super::Resolver;

/// Assign slug identities to a raw live batch, preserving order.
pub(crate) fn normalize(candidates: Vec<RawCandidate>) -> Vec<Video> {
    candidates
        .into_iter()
        .map(|c| Video::new(slugify(&c.title), c.title, c.poster, c.video))
        .collect()
}

impl Resolver {
    /// Normalize candidates, persist the ones the cache is missing,
    /// and return the full normalized sequence in candidate order.
    pub(crate) async fn reconcile(&self, candidates: Vec<RawCandidate>) -> Vec<Video> {
        let videos = normalize(candidates);

        let ids: Vec<String> = videos.iter().map(|v| v.id.clone()).collect();
        let missing: Vec<Video> = match self.db.existing_ids(&ids).await {
            Ok(present) => videos.iter().filter(|v| !present.contains(&v.id)).cloned().collect(),
            Err(e) => {
                // Conditional inserts tolerate duplicates, so a failed
                // probe just means offering the whole batch.
                tracing::warn!("cache probe failed: {e}");
                videos.clone()
            }
        };

        match self.db.insert_missing(&missing).await {
            Ok(written) if written > 0 => tracing::info!("cached {written} new videos"),
            Ok(_) => {}
            Err(e) => tracing::warn!("cache write failed: {e}"),
        }

        videos
    }

    /// Persist a single resolved video if the cache doesn't hold it.
    pub(crate) async fn reconcile_one(&self, video: &Video) {
        match self.db.insert_if_absent(video).await {
            Ok(true) => tracing::debug!("cached {}", video.id),
            Ok(false) => {}
            Err(e) => tracing::warn!("cache write failed for {}: {e}", video.id),
        }
    }
}
