//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::path::PathBuf;
use std::time::Instant;

use ratatui::layout::Rect;

use super::host::HostAction;
use crate::config::AppConfig;
use crate::core::feed::{FeedLists, SectionLayout, SectionSpec, SECTIONS};
use crate::core::marquee::Marquee;
use crate::core::pull::PullToRefresh;
use crate::core::rotation::RotationClock;
use crate::core::search::{self, SearchEntry, RESULT_LIMIT};
use crate::core::video::{Catalog, UserInteractions, VideoItem};
use crate::ui::layout::AppLayout;
use crate::ui::nav;
use crate::ui::smooth_scroll::SmoothScroll;
use crate::ui::ROW_UNITS;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Feed,
    Search,
    SettingsMenu,
    ControlsSubmenu,
}

/// Keyboard focus row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The category strip.
    #[default]
    Nav,
    /// A feed section, by index into [`SECTIONS`].
    Section(usize),
}

/// Progress of a running catalog reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncStatus {
    pub current: usize,
    pub total: usize,
}

/// Live state of one feed section.
pub struct SectionState {
    pub spec: &'static SectionSpec,
    /// Current rotation window.  Grid sections keep playable items only.
    pub items: Vec<VideoItem>,
    pub marquee: Option<Marquee>,
    /// Selected card in grid sections.
    pub cursor: usize,
}

impl SectionState {
    fn new(spec: &'static SectionSpec) -> Self {
        let marquee = match spec.layout {
            SectionLayout::Marquee { geometry, reverse } => Some(Marquee::new(geometry, reverse)),
            SectionLayout::Grid { .. } => None,
        };
        Self {
            spec,
            items: Vec::new(),
            marquee,
            cursor: 0,
        }
    }

    fn set_items(&mut self, items: Vec<VideoItem>, now_ms: u64) {
        self.items = match &mut self.marquee {
            Some(marquee) => {
                marquee.set_items(&items, now_ms);
                items
            }
            None => items.into_iter().filter(VideoItem::is_playable).collect(),
        };
        self.cursor = self.cursor.min(self.items.len().saturating_sub(1));
    }

    pub fn columns(&self) -> u16 {
        match self.spec.layout {
            SectionLayout::Grid { columns } => columns.max(1),
            SectionLayout::Marquee { .. } => 1,
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchState {
    pub query: String,
    /// Catalog indices of the current matches.
    pub results: Vec<usize>,
    pub selected: usize,
}

/// What the left button went down on.  Clicks resolve on release, and only
/// when the pointer did not move in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCapture {
    Nav {
        index: usize,
        moved: bool,
    },
    Marquee {
        section: usize,
        moved: bool,
    },
    Grid {
        section: usize,
        index: usize,
        heart: bool,
        moved: bool,
    },
    Feed,
}

/// Top-level application state.
pub struct AppState {
    // ── data ───────────────────────────────────────────────────
    pub catalog: Catalog,
    pub catalog_path: PathBuf,
    pub search_index: Vec<SearchEntry>,
    pub interactions: UserInteractions,
    /// Where likes are persisted; `None` keeps them in memory only.
    pub interactions_path: Option<PathBuf>,
    pub lists: FeedLists,
    pub clock: RotationClock,
    pub sections: Vec<SectionState>,

    // ── view ───────────────────────────────────────────────────
    pub active_view: ActiveView,
    pub focus: Focus,
    pub nav_cursor: usize,
    /// Category train position in columns.
    pub nav_shift: f64,
    /// Logical feed scroll in rows.
    pub feed_scroll: u16,
    pub smooth: SmoothScroll,
    pub pull: PullToRefresh,
    pub search: SearchState,
    pub settings_selected: usize,
    pub controls_selected: usize,
    pub capture: Option<PointerCapture>,
    /// Last known terminal size, used for hit testing.
    pub terminal_area: Rect,

    // ── app ────────────────────────────────────────────────────
    pub config: AppConfig,
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// `true` while a background catalog reload is running.
    pub loading: bool,
    /// Monotonic generation id used to ignore stale reload updates.
    pub reload_generation: u64,
    pub sync_status: Option<SyncStatus>,
    /// Host actions queued by input handling, drained by the event loop.
    pub actions: Vec<HostAction>,
    pub started: Instant,
    pub frame: u64,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        catalog_path: PathBuf,
        interactions: UserInteractions,
        interactions_path: Option<PathBuf>,
        config: AppConfig,
    ) -> Self {
        let search_index = search::build_index(&catalog.videos);
        let lists = FeedLists::build(&catalog, &interactions);
        let mut state = Self {
            catalog,
            catalog_path,
            search_index,
            interactions,
            interactions_path,
            lists,
            clock: RotationClock::new(),
            sections: SECTIONS.iter().map(SectionState::new).collect(),
            active_view: ActiveView::default(),
            focus: Focus::default(),
            nav_cursor: 0,
            nav_shift: 0.0,
            feed_scroll: 0,
            smooth: SmoothScroll::default(),
            pull: PullToRefresh::default(),
            search: SearchState::default(),
            settings_selected: 0,
            controls_selected: 0,
            capture: None,
            terminal_area: Rect::default(),
            config,
            should_quit: false,
            status_message: None,
            loading: false,
            reload_generation: 0,
            sync_status: None,
            actions: Vec::new(),
            started: Instant::now(),
            frame: 0,
        };
        state.refresh_feed();
        state
    }

    /// Milliseconds since start-up; the clock every marquee runs on.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    // ── feed content ───────────────────────────────────────────

    /// Recompute every section's window from the lists and the clock.
    pub fn refresh_feed(&mut self) {
        let now = self.now_ms();
        for section in &mut self.sections {
            let items = section.spec.items(&self.lists, &self.clock);
            section.set_items(items, now);
        }
        if let Focus::Section(i) = self.focus {
            if !self.section_visible(i) {
                self.focus = Focus::Nav;
            }
        }
    }

    /// Re-derive the typed lists (after the catalog or history changed).
    pub fn rebuild_lists(&mut self) {
        self.lists = FeedLists::build(&self.catalog, &self.interactions);
        self.refresh_feed();
    }

    /// One rotation interval elapsed.
    pub fn rotate(&mut self) {
        self.clock.advance();
        tracing::debug!(counter = self.clock.counter(), "rotating feed windows");
        self.refresh_feed();
    }

    /// One animation frame elapsed.
    pub fn tick_frame(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        let now = self.now_ms();
        for section in &mut self.sections {
            if let Some(marquee) = &mut section.marquee {
                marquee.tick(now);
            }
        }
        self.smooth.tick();
        // The train holds still while the keyboard is on it.
        if self.focus != Focus::Nav {
            self.nav_shift = nav::advance_shift(self.nav_shift, &self.catalog.categories);
        }
    }

    pub fn apply_catalog(&mut self, catalog: Catalog, index: Vec<SearchEntry>) {
        self.catalog = catalog;
        self.search_index = index;
        self.nav_cursor = self
            .nav_cursor
            .min(self.catalog.categories.len().saturating_sub(1));
        self.rebuild_lists();
        self.refresh_search();
    }

    pub fn section_visible(&self, index: usize) -> bool {
        self.sections
            .get(index)
            .is_some_and(|s| s.spec.is_visible(&self.lists))
    }

    /// Screen regions for the last known terminal size.
    pub fn screen_layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area, self.sync_status.is_some())
    }

    /// Indices of the sections currently laid out, top to bottom.
    pub fn visible_sections(&self) -> Vec<usize> {
        (0..self.sections.len())
            .filter(|&i| self.section_visible(i))
            .collect()
    }

    // ── overlays ───────────────────────────────────────────────

    /// Anything covering the feed pauses grid previews.
    pub fn overlay_active(&self) -> bool {
        self.active_view != ActiveView::Feed
    }

    pub fn open_search(&mut self) {
        self.active_view = ActiveView::Search;
        self.refresh_search();
    }

    pub fn close_search(&mut self) {
        self.active_view = ActiveView::Feed;
    }

    pub fn refresh_search(&mut self) {
        self.search.results =
            search::search_entries(&self.search_index, &self.search.query, RESULT_LIMIT);
        self.search.selected = self
            .search
            .selected
            .min(self.search.results.len().saturating_sub(1));
    }

    pub fn search_results(&self) -> Vec<&VideoItem> {
        self.search
            .results
            .iter()
            .filter_map(|&i| self.catalog.videos.get(i))
            .collect()
    }

    // ── scrolling ──────────────────────────────────────────────

    /// Feed rows pushed down by an active pull gesture.
    pub fn pull_shift_rows(&self) -> i32 {
        (self.pull.content_shift() / ROW_UNITS).round() as i32
    }

    /// Row of feed content drawn at the top of the feed area.
    pub fn view_scroll(&self) -> i32 {
        i32::from(self.feed_scroll) - self.smooth.row_offset() - self.pull_shift_rows()
    }

    pub fn set_scroll(&mut self, row: u16, max: u16) {
        self.feed_scroll = row.min(max);
        self.smooth.set_target(self.feed_scroll);
    }

    pub fn is_refreshing(&self) -> bool {
        self.pull.is_refreshing(self.loading)
    }

    // ── host actions ───────────────────────────────────────────

    pub fn push_action(&mut self, action: HostAction) {
        self.actions.push(action);
    }

    pub fn take_actions(&mut self) -> Vec<HostAction> {
        std::mem::take(&mut self.actions)
    }

    /// Queue playback of `video` with the playlist of its type.
    pub fn play(&mut self, video: VideoItem) {
        let action = HostAction::play(video, &self.lists);
        self.push_action(action);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::test_support::{items, video};
    use crate::core::video::{VideoType, WatchEntry};

    /// State over `shorts` shorts (`v0…`) and `longs` long videos (`L0…`).
    pub fn test_state(shorts: usize, longs: usize) -> AppState {
        let mut videos = items(shorts, VideoType::Shorts);
        videos.extend((0..longs).map(|i| {
            video(&format!("L{i}"), &format!("https://cdn.example/L{i}.mp4"), VideoType::Long)
        }));
        let catalog = Catalog::new(videos, Vec::new());
        let mut state = AppState::new(
            catalog,
            PathBuf::from("catalog.json"),
            UserInteractions::default(),
            None,
            AppConfig::default(),
        );
        state.terminal_area = Rect::new(0, 0, 100, 60);
        state
    }

    #[test]
    fn sync_banner_takes_a_row_from_the_feed() {
        let mut state = test_state(3, 0);
        let before = state.screen_layout().feed_area;
        state.sync_status = Some(SyncStatus { current: 1, total: 4 });
        let after = state.screen_layout();
        assert_eq!(after.banner_area.y, before.y);
        assert_eq!(after.feed_area.y, before.y + 1);
        assert_eq!(after.feed_area.height, before.height - 1);
    }

    #[test]
    fn sections_get_rotating_windows() {
        let state = test_state(30, 20);
        assert_eq!(state.sections[0].items.len(), 12);
        assert_eq!(state.sections[1].items.len(), 8);
        assert_eq!(state.sections[2].items.len(), 4);
        assert_eq!(state.sections[3].items.len(), 2);
        assert!(state.sections[0].marquee.as_ref().is_some_and(|m| !m.is_empty()));
        assert!(state.sections[2].marquee.is_none());
    }

    #[test]
    fn rotate_moves_windows() {
        let mut state = test_state(30, 0);
        let before = state.sections[0].items[0].id.clone();
        state.rotate();
        assert_eq!(state.clock.counter(), 1);
        assert_ne!(state.sections[0].items[0].id, before);
    }

    #[test]
    fn continue_section_follows_history() {
        let mut state = test_state(6, 0);
        let continue_idx = SECTIONS.iter().position(|s| s.title == "Continue the Tale").unwrap();
        assert!(!state.section_visible(continue_idx));

        state.interactions.watch_history.push(WatchEntry {
            id: "v2".into(),
            progress: 0.4,
        });
        state.rebuild_lists();
        assert!(state.section_visible(continue_idx));
        assert_eq!(state.sections[continue_idx].items[0].id, "v2");
    }

    #[test]
    fn grid_sections_drop_unplayable_items() {
        let mut videos = items(4, VideoType::Shorts);
        videos[1].video_url.clear();
        let state = AppState::new(
            Catalog::new(videos, Vec::new()),
            PathBuf::new(),
            UserInteractions::default(),
            None,
            AppConfig::default(),
        );
        let grid = &state.sections[2];
        assert_eq!(grid.items.len(), 3);
        assert!(grid.items.iter().all(VideoItem::is_playable));
    }

    #[test]
    fn search_results_resolve_to_videos() {
        let mut state = test_state(20, 0);
        state.search.query = "v1".into();
        state.open_search();
        let ids: Vec<&str> = state.search_results().iter().map(|v| v.id.as_str()).collect();
        // "title v1", "title v10" … "title v19".
        assert_eq!(ids.len(), 11);
        assert_eq!(ids[0], "v1");
        assert!(state.overlay_active());
    }

    #[test]
    fn view_scroll_accounts_for_pull_and_smoothing() {
        let mut state = test_state(4, 0);
        state.set_scroll(10, 100);
        // Smoothing starts at the old position.
        assert_eq!(state.view_scroll(), 0);
        for _ in 0..40 {
            state.smooth.tick();
        }
        assert_eq!(state.view_scroll(), 10);
        state.set_scroll(500, 20);
        assert_eq!(state.feed_scroll, 20);
    }

    #[test]
    fn play_picks_playlist_by_type() {
        let mut state = test_state(3, 2);
        let long = state.lists.longs[0].clone();
        state.play(long);
        match state.take_actions().as_slice() {
            [HostAction::PlayLong { video, playlist }] => {
                assert_eq!(video.id, "L0");
                assert_eq!(playlist.len(), 2);
            }
            other => panic!("unexpected actions: {other:?}"),
        }
        assert!(state.actions.is_empty());
    }
}
