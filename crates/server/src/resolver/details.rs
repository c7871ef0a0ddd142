//! Details query resolution.
//!
//! Resolves one video by id against a broad live batch (exact id
//! first, then substring containment in received order), falling back
//! to the cache, and assembles the details payload with shuffled
//! suggestions. A total miss is not an error — it produces the
//! structured not-found payload.

use serde::Serialize;
use streambox_core::{Error, Video};

use super::paging::shuffle;
use super::reconcile::normalize;
use super::{DETAILS_BATCH, Resolver, SUGGESTED_LIMIT, first_match};

/// Details payload for a resolved (or unresolved) video.
#[derive(Debug, Clone, Serialize)]
pub struct DetailsPayload {
    pub id: String,
    pub title: String,
    pub poster: String,

    #[serde(rename = "suggestedVideo")]
    pub suggested_video: Vec<Video>,

    pub seasons: Vec<Season>,

    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Season {
    pub title: String,
    pub poster: String,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub video: String,
}

impl DetailsPayload {
    fn found(video: &Video, suggested: Vec<Video>) -> Self {
        Self {
            id: video.id.clone(),
            title: video.title.clone(),
            poster: video.poster.clone(),
            suggested_video: suggested,
            seasons: vec![Season {
                title: "Video".into(),
                poster: video.poster.clone(),
                episodes: vec![Episode {
                    id: video.id.clone(),
                    title: video.title.clone(),
                    video: video.video.clone(),
                }],
            }],
            kind: "movie",
        }
    }

    fn not_found(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: "Not Found".into(),
            poster: String::new(),
            suggested_video: Vec::new(),
            seasons: vec![Season {
                title: "Video".into(),
                poster: String::new(),
                episodes: vec![Episode {
                    id: String::new(),
                    title: "Not Found".into(),
                    video: String::new(),
                }],
            }],
            kind: "movie",
        }
    }
}

impl Resolver {
    /// Resolve the details payload for a requested id.
    pub async fn details(&self, id: &str) -> Result<DetailsPayload, Error> {
        if id.trim().is_empty() {
            return Err(Error::InvalidInput("id is required".into()));
        }
        let target = id.to_lowercase();

        tracing::debug!("resolving details for {target}");

        let live = self.source.fetch(&self.endpoints.catalog(DETAILS_BATCH)).await;

        let mut chosen: Option<Video> = None;
        if !live.is_empty() {
            chosen = first_match(&normalize(live), &target);
            if let Some(video) = &chosen {
                self.reconcile_one(video).await;
            }
        }

        if chosen.is_none() {
            chosen = self.db.find_by_id(&target).await?;
        }
        if chosen.is_none() {
            chosen = self.db.find_id_containing(&target).await?;
        }

        let Some(video) = chosen else {
            tracing::debug!("no live or cached match for {target}");
            return Ok(DetailsPayload::not_found(id));
        };

        // Suggestions are best-effort: a failed read degrades to an
        // empty list rather than failing the resolved item.
        let suggested = match self.db.find_suggested(&video.id, SUGGESTED_LIMIT).await {
            Ok(items) => shuffle(items),
            Err(e) => {
                tracing::warn!("suggested lookup failed: {e}");
                Vec::new()
            }
        };

        Ok(DetailsPayload::found(&video, suggested))
    }
}
