//! Video catalog records and the user-interaction snapshot.
//!
//! Both arrive from outside the app: the video manager hands over the
//! catalog, the interaction store hands over likes / saves / watch history.
//! Here they are read from JSON files.  Malformed entries are tolerated:
//! `null` fields fall back to defaults and `null` items are dropped.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

// ───────────────────────────────────────── errors ────────────

/// Failures while reading or writing catalog / interaction files.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ───────────────────────────────────────── video item ────────

/// Which shelf a video belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VideoType {
    #[serde(rename = "Shorts")]
    Shorts,
    #[serde(rename = "Long Video", alias = "Long")]
    Long,
    /// Any tag we don't know; such videos appear in neither typed list.
    #[default]
    #[serde(other)]
    Other,
}

/// A single catalog entry.  Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoItem {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub poster_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_type: VideoType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_trending: bool,
}

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

impl VideoItem {
    /// Items without a source URL are never laid out.
    pub fn is_playable(&self) -> bool {
        !self.video_url.is_empty()
    }

    /// A manually added external link, if one is set.
    pub fn redirect(&self) -> Option<&str> {
        self.redirect_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// What the external player should open: the redirect link when
    /// present, otherwise the formatted source.
    pub fn launch_target(&self) -> String {
        match self.redirect() {
            Some(url) => url.to_string(),
            None => format_video_source(self),
        }
    }
}

/// Prepare a video's source URL for preview.
///
/// R2 / workers buckets get a `#t=0.1` media fragment so the first frame is
/// fetched straight away.  Videos with a redirect keep their raw URL.
pub fn format_video_source(video: &VideoItem) -> String {
    if video.redirect().is_some() {
        return video.video_url.clone();
    }

    let url = &video.video_url;
    if url.contains("r2.dev") || url.contains("workers.dev") {
        if url.contains("#t=") {
            return url.clone();
        }
        return format!("{url}#t=0.1");
    }

    url.clone()
}

// ───────────────────────────────────────── catalog ───────────

/// On-disk catalog: either a bare array of videos or an object with an
/// explicit category list.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Bare(Vec<Option<VideoItem>>),
    Full {
        #[serde(default)]
        categories: Vec<String>,
        #[serde(default)]
        videos: Vec<Option<VideoItem>>,
    },
}

/// The full video list plus the category names shown in the nav strip.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub videos: Vec<VideoItem>,
    pub categories: Vec<String>,
}

impl Catalog {
    pub fn new(videos: Vec<VideoItem>, categories: Vec<String>) -> Self {
        let categories = if categories.is_empty() {
            distinct_categories(&videos)
        } else {
            categories
        };
        Self { videos, categories }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let (videos, categories) = match serde_json::from_str::<CatalogFile>(text)? {
            CatalogFile::Bare(videos) => (videos, Vec::new()),
            CatalogFile::Full { categories, videos } => (videos, categories),
        };
        Ok(Self::new(videos.into_iter().flatten().collect(), categories))
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Videos of one type, in catalog order.
    pub fn of_type(&self, video_type: VideoType) -> Vec<VideoItem> {
        self.videos
            .iter()
            .filter(|v| v.video_type == video_type)
            .cloned()
            .collect()
    }
}

/// Category names in first-appearance order, empty names skipped.
fn distinct_categories(videos: &[VideoItem]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for video in videos {
        if !video.category.is_empty() && !out.contains(&video.category) {
            out.push(video.category.clone());
        }
    }
    out
}

// ───────────────────────────────────────── interactions ──────

/// How far the user got through one video (0.0 – 1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchEntry {
    pub id: String,
    #[serde(default)]
    pub progress: f64,
}

/// Snapshot of the user's likes, saves, downloads and watch history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInteractions {
    pub liked_ids: Vec<String>,
    pub saved_ids: Vec<String>,
    pub downloaded_ids: Vec<String>,
    pub watch_history: Vec<WatchEntry>,
    /// Fraction of the download currently running, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_progress: Option<f64>,
}

impl UserInteractions {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let write_err = |source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        };
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        std::fs::write(path, text).map_err(write_err)
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.liked_ids.iter().any(|l| l == id)
    }

    pub fn is_saved(&self, id: &str) -> bool {
        self.saved_ids.iter().any(|s| s == id)
    }

    /// The heart is lit for liked *or* saved videos.
    pub fn heart_active(&self, id: &str) -> bool {
        self.is_liked(id) || self.is_saved(id)
    }

    /// Progress of the first history entry for `id`, 0.0 when unwatched.
    pub fn progress_of(&self, id: &str) -> f64 {
        self.watch_history
            .iter()
            .find(|h| h.id == id)
            .map_or(0.0, |h| h.progress)
    }

    pub fn has_downloads(&self) -> bool {
        !self.downloaded_ids.is_empty()
    }

    pub fn is_downloading(&self) -> bool {
        self.download_progress.is_some()
    }

    /// Flip the like flag for `id`; returns the new state.
    pub fn toggle_like(&mut self, id: &str) -> bool {
        if self.is_liked(id) {
            self.liked_ids.retain(|l| l != id);
            false
        } else {
            self.liked_ids.push(id.to_string());
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::video;

    #[test]
    fn redirect_keeps_raw_source() {
        let mut v = video("a", "https://x.r2.dev/a.mp4", VideoType::Shorts);
        v.redirect_url = Some("https://youtu.be/abc".into());
        assert_eq!(format_video_source(&v), "https://x.r2.dev/a.mp4");
        assert_eq!(v.launch_target(), "https://youtu.be/abc");
    }

    #[test]
    fn blank_redirect_is_ignored() {
        let mut v = video("a", "https://x.r2.dev/a.mp4", VideoType::Shorts);
        v.redirect_url = Some("   ".into());
        assert_eq!(format_video_source(&v), "https://x.r2.dev/a.mp4#t=0.1");
    }

    #[test]
    fn r2_source_gets_time_fragment_once() {
        let v = video("a", "https://x.workers.dev/a.mp4", VideoType::Long);
        assert_eq!(format_video_source(&v), "https://x.workers.dev/a.mp4#t=0.1");

        let v = video("b", "https://x.r2.dev/b.mp4#t=3", VideoType::Long);
        assert_eq!(format_video_source(&v), "https://x.r2.dev/b.mp4#t=3");

        let v = video("c", "https://cdn.example.com/c.mp4", VideoType::Long);
        assert_eq!(format_video_source(&v), "https://cdn.example.com/c.mp4");
    }

    #[test]
    fn parses_bare_array_with_nulls() {
        let json = r#"[
            {"id": "1", "title": "Door", "category": "Ghosts", "video_url": "u1",
             "poster_url": "p1", "video_type": "Shorts", "is_trending": true},
            null,
            {"id": "2", "title": null, "category": "Dolls", "video_url": null,
             "video_type": "Long Video"},
            {"id": "3", "category": "Ghosts", "video_url": "u3", "video_type": "Clip"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.videos.len(), 3);
        assert_eq!(catalog.videos[0].video_type, VideoType::Shorts);
        assert!(catalog.videos[0].is_trending);
        assert_eq!(catalog.videos[1].title, "");
        assert!(!catalog.videos[1].is_playable());
        assert_eq!(catalog.videos[1].video_type, VideoType::Long);
        assert_eq!(catalog.videos[2].video_type, VideoType::Other);
        assert_eq!(catalog.categories, vec!["Ghosts", "Dolls"]);
    }

    #[test]
    fn explicit_categories_win() {
        let json = r#"{"categories": ["A", "B"], "videos": [
            {"id": "1", "category": "Z", "video_url": "u", "video_type": "Long"}
        ]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.categories, vec!["A", "B"]);
        assert_eq!(catalog.of_type(VideoType::Long).len(), 1);
        assert!(catalog.of_type(VideoType::Shorts).is_empty());
    }

    #[test]
    fn load_reports_path_on_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("catalog.json"));
    }

    #[test]
    fn interactions_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interactions.json");
        std::fs::write(
            &path,
            r#"{"likedIds": ["a"], "watchHistory": [{"id": "b", "progress": 0.4}]}"#,
        )
        .unwrap();

        let mut inter = UserInteractions::load(&path).unwrap();
        assert!(inter.is_liked("a"));
        assert_eq!(inter.progress_of("b"), 0.4);
        assert_eq!(inter.progress_of("zzz"), 0.0);
        assert!(!inter.has_downloads());

        assert!(!inter.toggle_like("a"));
        assert!(inter.toggle_like("c"));
        inter.save(&path).unwrap();

        let reloaded = UserInteractions::load(&path).unwrap();
        assert!(!reloaded.is_liked("a"));
        assert!(reloaded.is_liked("c"));
    }

    #[test]
    fn saved_video_lights_the_heart() {
        let inter = UserInteractions {
            saved_ids: vec!["s".into()],
            ..Default::default()
        };
        assert!(inter.heart_active("s"));
        assert!(!inter.is_liked("s"));
    }

    #[test]
    fn download_progress_is_optional_in_snapshots() {
        let idle: UserInteractions =
            serde_json::from_str(r#"{"downloadedIds": ["a"]}"#).unwrap();
        assert!(idle.has_downloads());
        assert!(!idle.is_downloading());
        assert!(!serde_json::to_string(&idle).unwrap().contains("downloadProgress"));

        let busy: UserInteractions =
            serde_json::from_str(r#"{"downloadProgress": 0.4}"#).unwrap();
        assert!(busy.is_downloading());
        assert!(!busy.has_downloads());
    }
}
