//! Feed composition: which lists feed which section.
//!
//! The catalog is split into a shorts shelf and a long-video shelf; each
//! section shows a rotating window of one shelf.  A "continue watching"
//! section is fed from the watch history instead and only appears when
//! there is something unfinished.

use super::marquee::StripGeometry;
use super::rotation::RotationClock;
use super::stats::Accent;
use super::video::{Catalog, UserInteractions, VideoItem, VideoType};

/// Watch progress strictly between these counts as "unfinished".
const UNFINISHED_MIN: f64 = 0.05;
const UNFINISHED_MAX: f64 = 0.95;

// ───────────────────────────────────────── shelves ───────────

/// Where a section draws its items from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shelf {
    Shorts,
    Long,
    Unfinished,
}

/// The typed lists every section is cut from.
#[derive(Debug, Clone, Default)]
pub struct FeedLists {
    pub shorts: Vec<VideoItem>,
    pub longs: Vec<VideoItem>,
    pub unfinished: Vec<VideoItem>,
}

impl FeedLists {
    pub fn build(catalog: &Catalog, interactions: &UserInteractions) -> Self {
        Self {
            shorts: catalog.of_type(VideoType::Shorts),
            longs: catalog.of_type(VideoType::Long),
            unfinished: unfinished_videos(&catalog.videos, interactions),
        }
    }

    /// The list handed to the player alongside a chosen video.
    pub fn playlist_for(&self, video: &VideoItem) -> &[VideoItem] {
        match video.video_type {
            VideoType::Shorts => &self.shorts,
            _ => &self.longs,
        }
    }
}

/// Partially watched videos, most recent history entry first.
pub fn unfinished_videos(videos: &[VideoItem], interactions: &UserInteractions) -> Vec<VideoItem> {
    let mut out: Vec<VideoItem> = interactions
        .watch_history
        .iter()
        .filter(|h| h.progress > UNFINISHED_MIN && h.progress < UNFINISHED_MAX)
        .filter_map(|h| videos.iter().find(|v| v.id == h.id))
        .filter(|v| v.is_playable())
        .cloned()
        .collect();
    out.reverse();
    out
}

// ───────────────────────────────────────── sections ──────────

/// How a section lays out its window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionLayout {
    Marquee {
        geometry: StripGeometry,
        reverse: bool,
    },
    Grid {
        columns: u16,
    },
}

/// Static description of one feed section.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    pub title: &'static str,
    pub accent: Accent,
    pub shelf: Shelf,
    pub layout: SectionLayout,
    /// Window size for rotating shelves (ignored for `Unfinished`).
    pub window: usize,
    /// Per-section rotation offset so sections on the same shelf diverge.
    pub rotation_offset: u64,
}

impl SectionSpec {
    /// Items this section shows at the given rotation.
    pub fn items(&self, lists: &FeedLists, clock: &RotationClock) -> Vec<VideoItem> {
        match self.shelf {
            Shelf::Shorts => clock.select(&lists.shorts, self.window, self.rotation_offset),
            Shelf::Long => clock.select(&lists.longs, self.window, self.rotation_offset),
            Shelf::Unfinished => lists.unfinished.clone(),
        }
    }

    pub fn is_visible(&self, lists: &FeedLists) -> bool {
        self.shelf != Shelf::Unfinished || !lists.unfinished.is_empty()
    }
}

const fn marquee(
    title: &'static str,
    accent: Accent,
    shelf: Shelf,
    window: usize,
    rotation_offset: u64,
    reverse: bool,
) -> SectionSpec {
    let geometry = match shelf {
        Shelf::Shorts => StripGeometry::SHORTS,
        _ => StripGeometry::LONG,
    };
    SectionSpec {
        title,
        accent,
        shelf,
        layout: SectionLayout::Marquee { geometry, reverse },
        window,
        rotation_offset,
    }
}

const fn grid(
    title: &'static str,
    accent: Accent,
    shelf: Shelf,
    window: usize,
    rotation_offset: u64,
) -> SectionSpec {
    let columns = match shelf {
        Shelf::Shorts => 2,
        _ => 1,
    };
    SectionSpec {
        title,
        accent,
        shelf,
        layout: SectionLayout::Grid { columns },
        window,
        rotation_offset,
    }
}

/// Feed sections, top to bottom.
pub static SECTIONS: &[SectionSpec] = &[
    marquee("Quick Horror Flashes", Accent::Red, Shelf::Shorts, 12, 0, false),
    marquee("Long Legends", Accent::Cyan, Shelf::Long, 8, 0, false),
    grid("Picked From the Crypt", Accent::Yellow, Shelf::Shorts, 4, 0),
    grid("Exclusive Horrors", Accent::Red, Shelf::Long, 2, 0),
    marquee("Continue the Tale", Accent::Purple, Shelf::Unfinished, 0, 0, false),
    marquee("Flashes From Hell", Accent::Orange, Shelf::Shorts, 12, 2, true),
    marquee("Grave Tales", Accent::Emerald, Shelf::Long, 8, 2, true),
    grid("Whispers of the Dark", Accent::Indigo, Shelf::Shorts, 4, 1),
    marquee("Last Archive of Horrors", Accent::Blue, Shelf::Shorts, 12, 3, false),
    marquee("Leaving the Crypt", Accent::White, Shelf::Long, 8, 3, false),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{items, video};
    use crate::core::video::WatchEntry;

    fn history(entries: &[(&str, f64)]) -> UserInteractions {
        UserInteractions {
            watch_history: entries
                .iter()
                .map(|(id, progress)| WatchEntry {
                    id: id.to_string(),
                    progress: *progress,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn shelves_split_strictly_by_type() {
        let mut videos = items(3, VideoType::Shorts);
        videos.push(video("L1", "u", VideoType::Long));
        videos.push(video("O1", "u", VideoType::Other));
        let catalog = Catalog::new(videos, Vec::new());
        let lists = FeedLists::build(&catalog, &UserInteractions::default());
        assert_eq!(lists.shorts.len(), 3);
        assert_eq!(lists.longs.len(), 1);
        assert!(lists.unfinished.is_empty());
    }

    #[test]
    fn unfinished_filters_maps_and_reverses() {
        let mut videos = items(4, VideoType::Shorts);
        videos[3].video_url.clear();
        let inter = history(&[
            ("v0", 0.5),
            ("v1", 0.05), // boundary: excluded
            ("gone", 0.5),
            ("v2", 0.94),
            ("v3", 0.5), // unplayable
            ("v0", 0.96),
        ]);
        let got: Vec<String> = unfinished_videos(&videos, &inter)
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(got, vec!["v2", "v0"]);
    }

    #[test]
    fn unfinished_section_hidden_when_empty() {
        let lists = FeedLists::default();
        let continue_section = SECTIONS
            .iter()
            .find(|s| s.shelf == Shelf::Unfinished)
            .unwrap();
        assert!(!continue_section.is_visible(&lists));
        assert!(SECTIONS[0].is_visible(&lists));
    }

    #[test]
    fn sections_on_same_shelf_diverge() {
        let lists = FeedLists {
            shorts: items(48, VideoType::Shorts),
            ..Default::default()
        };
        let clock = RotationClock::new();
        let first = SECTIONS[0].items(&lists, &clock);
        let hell = SECTIONS[5].items(&lists, &clock);
        assert_eq!(first.len(), 12);
        assert_ne!(first[0].id, hell[0].id);
    }

    #[test]
    fn playlist_follows_video_type() {
        let lists = FeedLists {
            shorts: items(2, VideoType::Shorts),
            longs: vec![video("L", "u", VideoType::Long)],
            ..Default::default()
        };
        assert_eq!(lists.playlist_for(&lists.shorts[0].clone()).len(), 2);
        assert_eq!(lists.playlist_for(&lists.longs[0].clone()).len(), 1);
    }
}
