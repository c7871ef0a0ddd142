//! Trending query resolution.
//!
//! Fetches a live batch large enough to cover the requested page and
//! slices it in live order; the cache is a fallback only, never merged
//! into a live page.

use streambox_core::{Error, Video};

use super::paging::{paginate, shuffle};
use super::Resolver;

impl Resolver {
    /// Resolve a trending page.
    ///
    /// On live success the returned page is the `[skip, skip + count)`
    /// slice of the live batch in live order; on live failure it is a
    /// shuffled cache page.
    pub async fn trending(&self, page: usize, count: usize) -> Result<Vec<Video>, Error> {
        let page = page.max(1);
        let count = count.max(1);
        let skip = (page - 1) * count;

        tracing::debug!("resolving trending: page {page}, count {count}");

        // Batch sized to cover every page up to the requested one.
        let url = self.endpoints.catalog(count * page);
        let live = self.source.fetch(&url).await;

        if live.is_empty() {
            tracing::debug!("live source empty, serving trending from cache");
            let cached = self.db.find_page(skip, count).await?;
            return Ok(shuffle(cached));
        }

        let videos = self.reconcile(live).await;
        Ok(paginate(videos, skip, count))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{StaticSource, resolver_with};
    use streambox_core::Video;

    fn batch(n: usize) -> Vec<(String, String, String)> {
        (0..n)
            .map(|i| (format!("Show {i:02}"), format!("p{i}"), format!("v{i}")))
            .collect()
    }

    fn source_of(n: usize) -> StaticSource {
        let owned = batch(n);
        let refs: Vec<(&str, &str, &str)> =
            owned.iter().map(|(t, p, v)| (t.as_str(), p.as_str(), v.as_str())).collect();
        StaticSource::of(&refs)
    }

    #[tokio::test]
    async fn test_trending_live_page_is_sliced_in_live_order() {
        let resolver = resolver_with(source_of(25)).await;

        let page = resolver.trending(2, 10).await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].id, "show-10");
        assert_eq!(page[9].id, "show-19");
    }

    #[tokio::test]
    async fn test_trending_live_populates_cache() {
        let resolver = resolver_with(source_of(5)).await;

        resolver.trending(1, 5).await.unwrap();

        let cached = resolver.db.find_page(0, 100).await.unwrap();
        assert_eq!(cached.len(), 5);
    }

    #[tokio::test]
    async fn test_trending_falls_back_to_cache() {
        let resolver = resolver_with(StaticSource::empty()).await;
        for i in 0..8 {
            let v = Video::new(format!("cached-{i}"), format!("Cached {i}"), "", "");
            resolver.db.insert_if_absent(&v).await.unwrap();
        }

        let page = resolver.trending(1, 5).await.unwrap();
        assert_eq!(page.len(), 5);
        assert!(page.iter().all(|v| v.id.starts_with("cached-")));
    }

    #[tokio::test]
    async fn test_trending_empty_everywhere() {
        let resolver = resolver_with(StaticSource::empty()).await;
        let page = resolver.trending(3, 10).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_trending_short_live_batch_clamps() {
        let resolver = resolver_with(source_of(12)).await;

        let page = resolver.trending(2, 10).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, "show-10");
    }
}
