//! Core algorithms: catalog model, rotation, marquee physics, stats.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Every
//! type is plain data so the event loop and tests can drive it directly.

pub mod feed;
pub mod marquee;
pub mod playback;
pub mod pull;
pub mod rotation;
pub mod search;
pub mod stats;
pub mod video;

#[cfg(test)]
pub(crate) mod test_support {
    use super::video::{VideoItem, VideoType};

    pub fn video(id: &str, url: &str, video_type: VideoType) -> VideoItem {
        VideoItem {
            id: id.to_string(),
            title: format!("title {id}"),
            category: "ghosts".to_string(),
            video_url: url.to_string(),
            poster_url: String::new(),
            redirect_url: None,
            video_type,
            is_trending: false,
        }
    }

    /// `count` playable videos with ids `v0`, `v1`, …
    pub fn items(count: usize, video_type: VideoType) -> Vec<VideoItem> {
        (0..count)
            .map(|i| video(&format!("v{i}"), &format!("https://cdn.example/v{i}.mp4"), video_type))
            .collect()
    }
}
