//! Host actions: what the feed asks its surroundings to do.
//!
//! Input handling only queues these; the event loop drains and dispatches
//! them after each event, so handlers stay free of I/O.

use std::process::{Command, Stdio};

use tokio::sync::mpsc;

use super::catalog_runtime::{spawn_catalog_reload, CatalogUpdate};
use super::state::AppState;
use crate::core::feed::FeedLists;
use crate::core::video::{VideoItem, VideoType};

#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    PlayShort {
        video: VideoItem,
        playlist: Vec<VideoItem>,
    },
    PlayLong {
        video: VideoItem,
        playlist: Vec<VideoItem>,
    },
    SelectCategory(String),
    HardRefresh,
    OpenOffline,
    ToggleLike(String),
}

impl HostAction {
    /// Playback request for `video`, routed by its type.
    pub fn play(video: VideoItem, lists: &FeedLists) -> Self {
        let playlist = lists.playlist_for(&video).to_vec();
        match video.video_type {
            VideoType::Shorts => Self::PlayShort { video, playlist },
            _ => Self::PlayLong { video, playlist },
        }
    }
}

pub fn dispatch(
    state: &mut AppState,
    action: HostAction,
    reload_tx: &mpsc::UnboundedSender<CatalogUpdate>,
) {
    match action {
        HostAction::PlayShort { video, playlist } | HostAction::PlayLong { video, playlist } => {
            play(state, &video, &playlist);
        }
        HostAction::SelectCategory(name) => {
            tracing::info!(category = %name, "category selected");
            state.status_message = Some(format!("Category: {name}"));
        }
        HostAction::HardRefresh => start_reload(state, reload_tx),
        HostAction::OpenOffline => {
            let count = state.interactions.downloaded_ids.len();
            tracing::info!(downloads = count, "offline vault opened");
            state.status_message = Some(if count == 0 {
                "Offline vault is empty".to_string()
            } else {
                format!("Offline vault: {count} downloaded")
            });
        }
        HostAction::ToggleLike(id) => toggle_like(state, &id),
    }
}

fn start_reload(state: &mut AppState, reload_tx: &mpsc::UnboundedSender<CatalogUpdate>) {
    state.reload_generation = state.reload_generation.wrapping_add(1);
    state.loading = true;
    state.sync_status = None;
    tracing::info!(
        generation = state.reload_generation,
        path = %state.catalog_path.display(),
        "hard refresh"
    );
    spawn_catalog_reload(
        reload_tx.clone(),
        state.reload_generation,
        state.catalog_path.clone(),
    );
}

fn toggle_like(state: &mut AppState, id: &str) {
    let liked = state.interactions.toggle_like(id);
    tracing::debug!(id, liked, "like toggled");
    if let Some(path) = &state.interactions_path {
        if let Err(err) = state.interactions.save(path) {
            tracing::warn!(error = %err, "failed to persist interactions");
            state.status_message = Some(format!("Could not save like: {err}"));
        }
    }
}

fn play(state: &mut AppState, video: &VideoItem, playlist: &[VideoItem]) {
    let position = playlist.iter().position(|v| v.id == video.id).map_or(0, |p| p + 1);
    let target = video.launch_target();
    tracing::info!(id = %video.id, %target, position, of = playlist.len(), "play");

    let mut parts = state.config.player.split_whitespace();
    let Some(program) = parts.next() else {
        state.status_message = Some(format!("▶ {} ({position}/{}) {target}", video.title, playlist.len()));
        return;
    };

    let spawned = Command::new(program)
        .args(parts)
        .arg(&target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match spawned {
        Ok(mut child) => {
            // Reap in the background so the player never lingers as a zombie.
            std::thread::spawn(move || {
                let _ = child.wait();
            });
            state.status_message = Some(format!("▶ {}", video.title));
        }
        Err(err) => {
            tracing::warn!(error = %err, program, "failed to start player");
            state.status_message = Some(format!("Could not start {program}: {err}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;
    use crate::core::video::UserInteractions;

    fn channel() -> (
        mpsc::UnboundedSender<CatalogUpdate>,
        mpsc::UnboundedReceiver<CatalogUpdate>,
    ) {
        mpsc::unbounded_channel()
    }

    #[test]
    fn play_without_player_reports_target() {
        let mut state = test_state(3, 0);
        let (tx, _rx) = channel();
        let video = state.lists.shorts[1].clone();
        let action = HostAction::play(video, &state.lists);
        dispatch(&mut state, action, &tx);
        let status = state.status_message.unwrap();
        assert!(status.contains("title v1 (2/3)"), "{status}");
        assert!(status.contains("https://cdn.example/v1.mp4"));
    }

    #[test]
    fn missing_player_is_reported_not_fatal() {
        let mut state = test_state(1, 0);
        state.config.player = "/definitely/not/a/player --fullscreen".into();
        let (tx, _rx) = channel();
        let action = HostAction::play(state.lists.shorts[0].clone(), &state.lists);
        dispatch(&mut state, action, &tx);
        assert!(state.status_message.unwrap().starts_with("Could not start"));
    }

    #[test]
    fn like_toggles_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("interactions.json");
        let mut state = test_state(2, 0);
        state.interactions_path = Some(path.clone());
        let (tx, _rx) = channel();

        dispatch(&mut state, HostAction::ToggleLike("v0".into()), &tx);
        assert!(state.interactions.is_liked("v0"));
        assert!(UserInteractions::load(&path).unwrap().is_liked("v0"));

        dispatch(&mut state, HostAction::ToggleLike("v0".into()), &tx);
        assert!(!UserInteractions::load(&path).unwrap().is_liked("v0"));
    }

    #[test]
    fn hard_refresh_bumps_generation_and_reports_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "[]").unwrap();

        let mut state = test_state(2, 0);
        state.catalog_path = path;
        let (tx, mut rx) = channel();
        dispatch(&mut state, HostAction::HardRefresh, &tx);
        assert!(state.loading);
        assert_eq!(state.reload_generation, 1);

        let mut loaded = false;
        while let Some(update) = rx.blocking_recv() {
            if let CatalogUpdate::Loaded { generation, result } = update {
                assert_eq!(generation, 1);
                assert!(result.is_ok());
                loaded = true;
                break;
            }
        }
        assert!(loaded);
    }

    #[test]
    fn offline_and_category_set_status() {
        let mut state = test_state(1, 0);
        let (tx, _rx) = channel();
        dispatch(&mut state, HostAction::OpenOffline, &tx);
        assert_eq!(state.status_message.as_deref(), Some("Offline vault is empty"));
        dispatch(&mut state, HostAction::SelectCategory("ghosts".into()), &tx);
        assert_eq!(state.status_message.as_deref(), Some("Category: ghosts"));
    }
}
