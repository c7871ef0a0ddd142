//! Keyword search resolution.
//!
//! The live URL carries the term, page offset, and count; the cache
//! fallback filters titles by case-insensitive substring. Both paths
//! shuffle before returning — the fixed policy for this query kind.

use streambox_core::{Error, Video};

use super::paging::shuffle;
use super::Resolver;

impl Resolver {
    /// Resolve a search page for `term`.
    ///
    /// An empty term is a caller-input fault, rejected before any
    /// fetch or cache work.
    pub async fn search(&self, term: &str, page: usize, count: usize) -> Result<Vec<Video>, Error> {
        if term.trim().is_empty() {
            return Err(Error::InvalidInput("search term is required".into()));
        }

        let page = page.max(1);
        let count = count.max(1);
        let skip = (page - 1) * count;

        tracing::debug!("resolving search: {term:?}, page {page}");

        let url = self.endpoints.search(term, count, skip);
        let live = self.source.fetch(&url).await;

        if live.is_empty() {
            tracing::debug!("live source empty, serving search from cache");
            let cached = self.db.find_title_like(term, skip, count).await?;
            return Ok(shuffle(cached));
        }

        let videos = self.reconcile(live).await;
        Ok(shuffle(videos))
    }
}
