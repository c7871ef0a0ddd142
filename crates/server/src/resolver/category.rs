//! Category browse resolution.
//!
//! Category pages are fixed-size. A live page comes back reconciled
//! and unsliced in live order; the fallback filters cached titles by
//! the genre string and shuffles.

use streambox_core::{Error, Video};

use super::paging::shuffle;
use super::{CATEGORY_PAGE_SIZE, Resolver};

impl Resolver {
    /// Resolve a category page for `genre`.
    pub async fn category(&self, genre: &str) -> Result<Vec<Video>, Error> {
        if genre.trim().is_empty() {
            return Err(Error::InvalidInput("genre is required".into()));
        }

        tracing::debug!("resolving category: {genre:?}");

        let url = self.endpoints.category(genre, CATEGORY_PAGE_SIZE);
        let live = self.source.fetch(&url).await;

        if live.is_empty() {
            tracing::debug!("live source empty, serving category from cache");
            let cached = self.db.find_title_like(genre, 0, CATEGORY_PAGE_SIZE).await?;
            return Ok(shuffle(cached));
        }

        Ok(self.reconcile(live).await)
    }
}
