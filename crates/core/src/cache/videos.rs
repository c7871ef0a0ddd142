//! Video store operations.
//!
//! Provides the typed query and conditional-insert operations the
//! resolver runs against the cache. Rows are keyed by slug id and are
//! append-only: `insert_if_absent`/`insert_missing` never overwrite an
//! existing row, so the first write for an id wins and later candidates
//! carrying different fields are ignored wholesale.
//!
//! Read ordering is `created_at, id` — arbitrary from the caller's
//! point of view but stable across repeated queries, which is what the
//! pagination math relies on.

use std::collections::HashSet;

use super::connection::CacheDb;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A cached video.
///
/// The `id` is the slug derived from `title` and acts as the natural
/// key. `created_at` is set once at first persistence and never
/// updated; it is storage metadata and stays off the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub poster: String,
    pub video: String,

    #[serde(skip_serializing, default)]
    pub created_at: String,
}

impl Video {
    /// Build a video with `created_at` stamped to now.
    pub fn new(
        id: impl Into<String>, title: impl Into<String>, poster: impl Into<String>, video: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster: poster.into(),
            video: video.into(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

fn row_to_video(row: &rusqlite::Row<'_>) -> rusqlite::Result<Video> {
    Ok(Video {
        id: row.get(0)?,
        title: row.get(1)?,
        poster: row.get(2)?,
        video: row.get(3)?,
        created_at: row.get(4)?,
    })
}

const SELECT_COLUMNS: &str = "id, title, poster, video, created_at";

impl CacheDb {
    /// Read a page of videos in store order.
    ///
    /// Out-of-range skips are not an error; fewer (or zero) rows come back.
    pub async fn find_page(&self, skip: usize, limit: usize) -> Result<Vec<Video>, Error> {
        self.conn
            .call(move |conn| -> Result<Vec<Video>, Error> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM videos ORDER BY created_at, id LIMIT ?1 OFFSET ?2"
                ))?;
                let rows = stmt.query_map(params![limit as i64, skip as i64], row_to_video)?;
                Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
            })
            .await
            .map_err(Error::from)
    }

    /// Find videos whose title contains the fragment, case-insensitively.
    pub async fn find_title_like(&self, fragment: &str, skip: usize, limit: usize) -> Result<Vec<Video>, Error> {
        let pattern = format!("%{fragment}%");
        self.conn
            .call(move |conn| -> Result<Vec<Video>, Error> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM videos WHERE title LIKE ?1 ORDER BY created_at, id LIMIT ?2 OFFSET ?3"
                ))?;
                let rows = stmt.query_map(params![pattern, limit as i64, skip as i64], row_to_video)?;
                Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
            })
            .await
            .map_err(Error::from)
    }

    /// Get a video by exact id.
    ///
    /// Returns None if the id doesn't exist in the cache.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Video>, Error> {
        let id = id.to_string();
        self.conn
            .call(move |conn| -> Result<Option<Video>, Error> {
                let mut stmt = conn.prepare(&format!("SELECT {SELECT_COLUMNS} FROM videos WHERE id = ?1"))?;

                let result = stmt.query_row(params![id], row_to_video);

                match result {
                    Ok(v) => Ok(Some(v)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Get the first video in store order whose id contains the fragment.
    ///
    /// Case-insensitive substring containment; used as the fuzzy
    /// fallback after an exact id lookup misses.
    pub async fn find_id_containing(&self, fragment: &str) -> Result<Option<Video>, Error> {
        let pattern = format!("%{fragment}%");
        self.conn
            .call(move |conn| -> Result<Option<Video>, Error> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM videos WHERE id LIKE ?1 ORDER BY created_at, id LIMIT 1"
                ))?;

                let result = stmt.query_row(params![pattern], row_to_video);

                match result {
                    Ok(v) => Ok(Some(v)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Read up to `limit` videos with an id other than `exclude_id`.
    ///
    /// Backs the "suggested videos" list on the details payload.
    pub async fn find_suggested(&self, exclude_id: &str, limit: usize) -> Result<Vec<Video>, Error> {
        let exclude_id = exclude_id.to_string();
        self.conn
            .call(move |conn| -> Result<Vec<Video>, Error> {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {SELECT_COLUMNS} FROM videos WHERE id != ?1 ORDER BY created_at, id LIMIT ?2"
                ))?;
                let rows = stmt.query_map(params![exclude_id, limit as i64], row_to_video)?;
                Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
            })
            .await
            .map_err(Error::from)
    }

    /// Probe which of the given ids are already present.
    ///
    /// Single set-membership query so the reconciler can diff a whole
    /// live batch in one round trip.
    pub async fn existing_ids(&self, ids: &[String]) -> Result<HashSet<String>, Error> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids = ids.to_vec();
        self.conn
            .call(move |conn| -> Result<HashSet<String>, Error> {
                let placeholders = vec!["?"; ids.len()].join(", ");
                let mut stmt =
                    conn.prepare(&format!("SELECT id FROM videos WHERE id IN ({placeholders})"))?;
                let rows = stmt.query_map(rusqlite::params_from_iter(ids.iter()), |row| row.get::<_, String>(0))?;
                Ok(rows.collect::<rusqlite::Result<HashSet<_>>>()?)
            })
            .await
            .map_err(Error::from)
    }

    /// Insert a video only if its id is not already present.
    ///
    /// Single conditional write (`ON CONFLICT DO NOTHING`), atomic at
    /// the store boundary: losing a check-then-act race against another
    /// writer is a no-op, not a constraint fault. Returns whether a row
    /// was actually written.
    pub async fn insert_if_absent(&self, video: &Video) -> Result<bool, Error> {
        let video = video.clone();
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let written = conn.execute(
                    "INSERT INTO videos (id, title, poster, video, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(id) DO NOTHING",
                    params![&video.id, &video.title, &video.poster, &video.video, &video.created_at],
                )?;
                Ok(written > 0)
            })
            .await
            .map_err(Error::from)
    }

    /// Insert every video whose id is not already present.
    ///
    /// Same conditional-write semantics as [`CacheDb::insert_if_absent`],
    /// applied per item. Existing rows are never touched. Returns the
    /// number of rows written.
    pub async fn insert_missing(&self, videos: &[Video]) -> Result<u64, Error> {
        if videos.is_empty() {
            return Ok(0);
        }

        let videos = videos.to_vec();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let mut stmt = conn.prepare(
                    "INSERT INTO videos (id, title, poster, video, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(id) DO NOTHING",
                )?;
                let mut written = 0u64;
                for v in &videos {
                    written += stmt.execute(params![&v.id, &v.title, &v.poster, &v.video, &v.created_at])? as u64;
                }
                Ok(written)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_video(id: &str, title: &str) -> Video {
        Video::new(id, title, format!("https://img.test/{id}.jpg"), format!("https://cdn.test/{id}.mp4"))
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let video = make_video("demon-slayer", "Demon Slayer");

        assert!(db.insert_if_absent(&video).await.unwrap());

        let found = db.find_by_id("demon-slayer").await.unwrap().unwrap();
        assert_eq!(found.title, "Demon Slayer");
        assert_eq!(found.video, "https://cdn.test/demon-slayer.mp4");
    }

    #[tokio::test]
    async fn test_find_missing() {
        let db = CacheDb::open_in_memory().await.unwrap();
        assert!(db.find_by_id("nope").await.unwrap().is_none());
        assert!(db.find_id_containing("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_first_write_wins() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let original = make_video("same-id", "Original Title");
        let imposter = Video::new("same-id", "Different Title", "other.jpg", "other.mp4");

        assert!(db.insert_if_absent(&original).await.unwrap());
        assert!(!db.insert_if_absent(&imposter).await.unwrap());

        let stored = db.find_by_id("same-id").await.unwrap().unwrap();
        assert_eq!(stored.title, "Original Title");
    }

    #[tokio::test]
    async fn test_concurrent_insert_same_id() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let a = make_video("raced", "Raced");
        let b = make_video("raced", "Raced");

        let (db1, db2) = (db.clone(), db.clone());
        let (ra, rb) = tokio::join!(
            tokio::spawn(async move { db1.insert_if_absent(&a).await }),
            tokio::spawn(async move { db2.insert_if_absent(&b).await }),
        );

        // Neither writer sees a fault; exactly one row lands.
        let wrote_a = ra.unwrap().unwrap();
        let wrote_b = rb.unwrap().unwrap();
        assert_ne!(wrote_a, wrote_b);
        assert!(db.find_by_id("raced").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_insert_missing_skips_existing() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.insert_if_absent(&make_video("kept", "Kept")).await.unwrap();

        let batch = vec![make_video("kept", "Overwrite Attempt"), make_video("fresh", "Fresh")];
        let written = db.insert_missing(&batch).await.unwrap();
        assert_eq!(written, 1);

        let kept = db.find_by_id("kept").await.unwrap().unwrap();
        assert_eq!(kept.title, "Kept");
    }

    #[tokio::test]
    async fn test_existing_ids() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.insert_if_absent(&make_video("one", "One")).await.unwrap();
        db.insert_if_absent(&make_video("two", "Two")).await.unwrap();

        let probe = vec!["one".to_string(), "three".to_string()];
        let present = db.existing_ids(&probe).await.unwrap();
        assert!(present.contains("one"));
        assert!(!present.contains("three"));
        assert_eq!(present.len(), 1);

        assert!(db.existing_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_page_clamps() {
        let db = CacheDb::open_in_memory().await.unwrap();
        for i in 0..5 {
            db.insert_if_absent(&make_video(&format!("v{i}"), &format!("V {i}"))).await.unwrap();
        }

        assert_eq!(db.find_page(0, 3).await.unwrap().len(), 3);
        assert_eq!(db.find_page(3, 10).await.unwrap().len(), 2);
        assert!(db.find_page(100, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_title_like_case_insensitive() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.insert_if_absent(&make_video("demon-slayer", "Demon Slayer")).await.unwrap();
        db.insert_if_absent(&make_video("other-show", "Other Show")).await.unwrap();

        let hits = db.find_title_like("SLAYER", 0, 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "demon-slayer");
    }

    #[tokio::test]
    async fn test_find_id_containing_first_in_store_order() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let mut early = make_video("demon-slayer-2", "Demon Slayer 2");
        early.created_at = "2020-01-01T00:00:00+00:00".to_string();
        let mut late = make_video("demon-slayer-movie", "Demon Slayer Movie");
        late.created_at = "2021-01-01T00:00:00+00:00".to_string();

        db.insert_if_absent(&late).await.unwrap();
        db.insert_if_absent(&early).await.unwrap();

        let hit = db.find_id_containing("demon-slayer").await.unwrap().unwrap();
        assert_eq!(hit.id, "demon-slayer-2");
    }

    #[tokio::test]
    async fn test_find_suggested_excludes_id() {
        let db = CacheDb::open_in_memory().await.unwrap();
        for i in 0..4 {
            db.insert_if_absent(&make_video(&format!("v{i}"), &format!("V {i}"))).await.unwrap();
        }

        let suggested = db.find_suggested("v2", 10).await.unwrap();
        assert_eq!(suggested.len(), 3);
        assert!(suggested.iter().all(|v| v.id != "v2"));
    }
}
