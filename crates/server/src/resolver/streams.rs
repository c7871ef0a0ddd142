//! Streams query resolution.
//!
//! Cache-first: streams are requested right after details, so the
//! target is usually already cached. The live source is consulted only
//! on a cache miss, with the same exact-then-substring policy, and the
//! matched item is persisted for next time.

use serde::Serialize;

use streambox_core::Error;

use super::variants::{StreamVariant, synthesize};
use super::{Resolver, STREAMS_BATCH, first_match};
use super::reconcile::normalize;

/// Result of a streams query: either the synthesized variants, or the
/// structured not-found payload.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum StreamsPayload {
    Found(Vec<StreamVariant>),
    NotFound {
        id: String,
        title: String,
        poster: String,
        streams: Vec<StreamVariant>,
        #[serde(rename = "type")]
        kind: &'static str,
    },
}

impl StreamsPayload {
    fn not_found(id: &str) -> Self {
        Self::NotFound {
            id: id.to_string(),
            title: "Not Found".into(),
            poster: String::new(),
            streams: Vec::new(),
            kind: "movie",
        }
    }
}

impl Resolver {
    /// Resolve stream variants for a requested id.
    pub async fn streams(&self, id: &str) -> Result<StreamsPayload, Error> {
        if id.trim().is_empty() {
            return Err(Error::InvalidInput("id is required".into()));
        }
        let target = id.to_lowercase();

        tracing::debug!("resolving streams for {target}");

        let mut video = self.db.find_by_id(&target).await?;
        if video.is_none() {
            video = self.db.find_id_containing(&target).await?;
        }

        if video.is_none() {
            let live = self.source.fetch(&self.endpoints.catalog(STREAMS_BATCH)).await;
            if !live.is_empty() {
                video = first_match(&normalize(live), &target);
                if let Some(matched) = &video {
                    self.reconcile_one(matched).await;
                }
            }
        }

        let Some(video) = video else {
            tracing::debug!("no live or cached match for {target}");
            return Ok(StreamsPayload::not_found(id));
        };

        Ok(StreamsPayload::Found(synthesize(&video.video)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{StaticSource, resolver_with};
    use super::*;
    use streambox_core::Video;

    #[tokio::test]
    async fn test_streams_empty_id_rejected() {
        let resolver = resolver_with(StaticSource::empty()).await;
        let result = resolver.streams(" ").await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_streams_from_cache() {
        let resolver = resolver_with(StaticSource::empty()).await;
        resolver
            .db
            .insert_if_absent(&Video::new("cached-show", "Cached Show", "", "https://x/y.mp4"))
            .await
            .unwrap();

        let payload = resolver.streams("cached-show").await.unwrap();
        let StreamsPayload::Found(variants) = payload else {
            panic!("expected stream variants");
        };
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].url, "https://x/y.mp4?quality=1080P");
    }

    #[tokio::test]
    async fn test_streams_cache_substring_match() {
        let resolver = resolver_with(StaticSource::empty()).await;
        resolver
            .db
            .insert_if_absent(&Video::new("the-cached-show-hd", "The Cached Show", "", "https://x/z.mp4"))
            .await
            .unwrap();

        let payload = resolver.streams("cached-show").await.unwrap();
        assert!(matches!(payload, StreamsPayload::Found(_)));
    }

    #[tokio::test]
    async fn test_streams_live_fallback_persists_match() {
        let source = StaticSource::of(&[("Live Only", "", "https://live/m.mp4?sig=1")]);
        let resolver = resolver_with(source).await;

        let payload = resolver.streams("live-only").await.unwrap();
        let StreamsPayload::Found(variants) = payload else {
            panic!("expected stream variants");
        };
        assert_eq!(variants[0].url, "https://live/m.mp4?sig=1&quality=1080P");

        assert!(resolver.db.find_by_id("live-only").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_streams_not_found_payload() {
        let resolver = resolver_with(StaticSource::empty()).await;

        let payload = resolver.streams("ghost").await.unwrap();
        let StreamsPayload::NotFound { id, title, streams, kind, .. } = payload else {
            panic!("expected not-found payload");
        };
        assert_eq!(id, "ghost");
        assert_eq!(title, "Not Found");
        assert!(streams.is_empty());
        assert_eq!(kind, "movie");
    }

    #[tokio::test]
    async fn test_streams_empty_media_url_still_synthesizes() {
        let resolver = resolver_with(StaticSource::empty()).await;
        resolver
            .db
            .insert_if_absent(&Video::new("no-media", "No Media", "", ""))
            .await
            .unwrap();

        let payload = resolver.streams("no-media").await.unwrap();
        let StreamsPayload::Found(variants) = payload else {
            panic!("expected stream variants");
        };
        assert_eq!(variants.len(), 3);
        assert_eq!(variants[0].url, "?quality=1080P");
    }
}
