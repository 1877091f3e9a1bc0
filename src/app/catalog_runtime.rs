//! Background catalog reloads to keep the UI thread responsive.
//!
//! A reload parses the catalog file and rebuilds the search index on a
//! worker thread, reporting progress as it indexes.  Every job carries the
//! generation it was started with; updates from superseded generations are
//! dropped when they arrive.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use crate::core::search::{build_index, SearchEntry};
use crate::core::video::{Catalog, CatalogError};

use super::state::{AppState, SyncStatus};

/// Videos indexed between two progress reports.
const PROGRESS_CHUNK: usize = 64;

/// A parsed catalog with its search index.
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub index: Vec<SearchEntry>,
}

pub enum CatalogUpdate {
    Progress {
        generation: u64,
        current: usize,
        total: usize,
    },
    Loaded {
        generation: u64,
        result: Result<LoadedCatalog, CatalogError>,
    },
}

/// Parse `path` and index it, calling `progress(done, total)` as it goes.
pub fn load_catalog(
    path: &Path,
    mut progress: impl FnMut(usize, usize),
) -> Result<LoadedCatalog, CatalogError> {
    let catalog = Catalog::load(path)?;
    let total = catalog.videos.len();
    progress(0, total);

    let mut index = Vec::with_capacity(total);
    for (chunk_no, chunk) in catalog.videos.chunks(PROGRESS_CHUNK).enumerate() {
        let base = chunk_no * PROGRESS_CHUNK;
        index.extend(build_index(chunk).into_iter().map(|mut entry| {
            entry.index += base;
            entry
        }));
        progress(base + chunk.len(), total);
    }

    Ok(LoadedCatalog { catalog, index })
}

pub fn spawn_catalog_reload(tx: mpsc::UnboundedSender<CatalogUpdate>, generation: u64, path: PathBuf) {
    std::thread::spawn(move || {
        let progress_tx = tx.clone();
        let result = load_catalog(&path, |current, total| {
            let _ = progress_tx.send(CatalogUpdate::Progress {
                generation,
                current,
                total,
            });
        });
        let _ = tx.send(CatalogUpdate::Loaded { generation, result });
    });
}

/// Fold one update into the state.  Stale generations are ignored.
pub fn apply_update(state: &mut AppState, update: CatalogUpdate) {
    match update {
        CatalogUpdate::Progress {
            generation,
            current,
            total,
        } => {
            if generation == state.reload_generation && state.loading {
                state.sync_status = Some(SyncStatus { current, total });
            }
        }
        CatalogUpdate::Loaded { generation, result } => {
            if generation != state.reload_generation {
                tracing::debug!(generation, current = state.reload_generation, "dropping stale catalog reload");
                return;
            }
            state.loading = false;
            state.sync_status = None;
            match result {
                Ok(loaded) => {
                    let count = loaded.catalog.videos.len();
                    tracing::info!(videos = count, "catalog reloaded");
                    state.apply_catalog(loaded.catalog, loaded.index);
                    state.status_message = Some(format!("Vault synced: {count} videos"));
                }
                Err(err) => {
                    tracing::warn!(error = %err, "catalog reload failed");
                    state.status_message = Some(format!("Refresh failed: {err}"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;
    use crate::core::test_support::items;
    use crate::core::video::VideoType;

    fn write_catalog(dir: &Path, count: usize) -> PathBuf {
        let path = dir.join("catalog.json");
        let videos = items(count, VideoType::Shorts);
        std::fs::write(&path, serde_json::to_string(&videos).unwrap()).unwrap();
        path
    }

    #[test]
    fn load_reports_progress_and_offsets_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(dir.path(), 130);
        let mut reports = Vec::new();
        let loaded = load_catalog(&path, |c, t| reports.push((c, t))).unwrap();
        assert_eq!(reports, vec![(0, 130), (64, 130), (128, 130), (130, 130)]);
        assert_eq!(loaded.index.len(), 130);
        assert_eq!(loaded.index[129].index, 129);
        assert_eq!(loaded.index[70].title_lower, "title v70");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_catalog(&dir.path().join("nope.json"), |_, _| {});
        assert!(matches!(result, Err(CatalogError::Read { .. })));
    }

    #[test]
    fn stale_generations_are_dropped() {
        let mut state = test_state(3, 0);
        state.loading = true;
        state.reload_generation = 2;

        apply_update(
            &mut state,
            CatalogUpdate::Progress {
                generation: 1,
                current: 1,
                total: 5,
            },
        );
        assert_eq!(state.sync_status, None);

        apply_update(
            &mut state,
            CatalogUpdate::Progress {
                generation: 2,
                current: 1,
                total: 5,
            },
        );
        assert_eq!(state.sync_status, Some(SyncStatus { current: 1, total: 5 }));

        let dir = tempfile::tempdir().unwrap();
        let stale = load_catalog(&write_catalog(dir.path(), 9), |_, _| {});
        apply_update(&mut state, CatalogUpdate::Loaded { generation: 1, result: stale });
        assert!(state.loading);
        assert_eq!(state.catalog.videos.len(), 3);
    }

    #[test]
    fn loaded_catalog_replaces_feed() {
        let mut state = test_state(3, 0);
        state.loading = true;
        state.reload_generation = 1;
        let dir = tempfile::tempdir().unwrap();
        let result = load_catalog(&write_catalog(dir.path(), 20), |_, _| {});
        apply_update(&mut state, CatalogUpdate::Loaded { generation: 1, result });

        assert!(!state.loading);
        assert_eq!(state.sync_status, None);
        assert_eq!(state.catalog.videos.len(), 20);
        assert_eq!(state.lists.shorts.len(), 20);
        assert_eq!(state.sections[0].items.len(), 12);
        assert_eq!(state.status_message.as_deref(), Some("Vault synced: 20 videos"));

        // Same ids with new sources: the marquee must pick up the new urls.
        let mut moved = items(20, VideoType::Shorts);
        for video in &mut moved {
            video.video_url = format!("https://new.r2.dev/{}.mp4", video.id);
        }
        let path = dir.path().join("moved.json");
        std::fs::write(&path, serde_json::to_string(&moved).unwrap()).unwrap();
        state.reload_generation = 2;
        let result = load_catalog(&path, |_, _| {});
        apply_update(&mut state, CatalogUpdate::Loaded { generation: 2, result });

        let marquee = state.sections[0].marquee.as_ref().unwrap();
        assert!(marquee.display().iter().all(|v| v.video_url.starts_with("https://new.r2.dev/")));
        assert_eq!(marquee.display()[0].video_url, "https://new.r2.dev/v0.mp4");
    }

    #[test]
    fn failed_reload_keeps_catalog() {
        let mut state = test_state(3, 0);
        state.loading = true;
        state.reload_generation = 1;
        let dir = tempfile::tempdir().unwrap();
        let result = load_catalog(&dir.path().join("gone.json"), |_, _| {});
        apply_update(&mut state, CatalogUpdate::Loaded { generation: 1, result });

        assert!(!state.loading);
        assert_eq!(state.catalog.videos.len(), 3);
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Refresh failed"));
    }
}
