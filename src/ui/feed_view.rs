//! The scrolling feed: section titles, marquee strips, card grids, footer.
//!
//! Sections are stacked in a virtual column of rows.  [`FeedLayout`] maps
//! each visible section to its rows; rendering and mouse hit testing both
//! go through it so they always agree on where things are.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::state::{AppState, Focus, SectionState};
use crate::core::feed::{SectionLayout, Shelf};
use crate::core::playback::{preview_state, visible_ratio};
use crate::core::pull::REFRESH_TRIGGER;
use crate::ui::canvas::render_clipped;
use crate::ui::card::{heart_rect, VideoCard};
use crate::ui::marquee_strip::{strip_height, MarqueeStrip};
use crate::ui::point_in_rect;
use crate::ui::theme::{accent_color, Theme};

const TITLE_ROWS: u16 = 1;
const SECTION_GAP: u16 = 1;
const FOOTER_ROWS: u16 = 3;
const GRID_COL_GAP: u16 = 1;
const GRID_ROW_GAP: u16 = 1;
const SHORT_CARD_ROWS: u16 = 8;
const LONG_CARD_ROWS: u16 = 5;

pub const FOOTER_TEXT: &str = "Vault Secure System";

// ───────────────────────────────────────── layout ────────────

/// Rows one visible section occupies in the virtual feed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSlot {
    /// Index into `AppState::sections`.
    pub section: usize,
    /// Row of the section title.
    pub top: i32,
    pub content_top: i32,
    pub content_height: u16,
}

impl FeedSlot {
    pub fn bottom(&self) -> i32 {
        self.content_top + i32::from(self.content_height)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedLayout {
    pub slots: Vec<FeedSlot>,
    pub total_rows: u16,
}

impl FeedLayout {
    pub fn build(state: &AppState) -> Self {
        let mut y: i32 = 0;
        let mut slots = Vec::new();
        for index in state.visible_sections() {
            let content_height = content_height(&state.sections[index]);
            slots.push(FeedSlot {
                section: index,
                top: y,
                content_top: y + i32::from(TITLE_ROWS),
                content_height,
            });
            y += i32::from(TITLE_ROWS + content_height + SECTION_GAP);
        }
        let total_rows = (y + i32::from(FOOTER_ROWS)).clamp(0, i32::from(u16::MAX)) as u16;
        Self { slots, total_rows }
    }

    pub fn slot(&self, section: usize) -> Option<&FeedSlot> {
        self.slots.iter().find(|s| s.section == section)
    }

    pub fn max_scroll(&self, view_height: u16) -> u16 {
        self.total_rows.saturating_sub(view_height)
    }
}

fn card_rows(section: &SectionState) -> u16 {
    match section.spec.shelf {
        Shelf::Shorts => SHORT_CARD_ROWS,
        _ => LONG_CARD_ROWS,
    }
}

fn content_height(section: &SectionState) -> u16 {
    match section.spec.layout {
        SectionLayout::Marquee { geometry, .. } => strip_height(geometry),
        SectionLayout::Grid { .. } => {
            let columns = usize::from(section.columns());
            let rows = section.items.len().div_ceil(columns) as u16;
            if rows == 0 {
                return 0;
            }
            rows * card_rows(section) + (rows - 1) * GRID_ROW_GAP
        }
    }
}

/// Position of grid card `index` relative to the section's content origin:
/// `(x, y, width, height)`.
pub fn grid_cell(section: &SectionState, width: u16, index: usize) -> (u16, u16, u16, u16) {
    let columns = section.columns();
    let card_w = width.saturating_sub(GRID_COL_GAP * (columns - 1)) / columns;
    let card_h = card_rows(section);
    let col = (index % usize::from(columns)) as u16;
    let row = (index / usize::from(columns)) as u16;
    (
        col * (card_w + GRID_COL_GAP),
        row * (card_h + GRID_ROW_GAP),
        card_w,
        card_h,
    )
}

/// Virtual rows that must be on screen when `section` has keyboard focus:
/// the selected card's row for grids, the whole section otherwise.
pub fn focus_span(state: &AppState, layout: &FeedLayout, section: usize, width: u16) -> Option<(i32, i32)> {
    let slot = layout.slot(section)?;
    let s = &state.sections[section];
    match s.spec.layout {
        SectionLayout::Grid { .. } if !s.items.is_empty() => {
            let (_, y, _, h) = grid_cell(s, width, s.cursor);
            let top = slot.content_top + i32::from(y);
            // Keep the title visible for the first row.
            let top = if y == 0 { slot.top } else { top };
            Some((top, slot.content_top + i32::from(y + h)))
        }
        _ => Some((slot.top, slot.bottom())),
    }
}

// ───────────────────────────────────────── hit testing ───────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedHit {
    /// Anywhere on a marquee strip, card or gap.
    Marquee { section: usize },
    GridCard {
        section: usize,
        index: usize,
        heart: bool,
    },
    Nothing,
}

pub fn hit_test(state: &AppState, area: Rect, col: u16, row: u16) -> FeedHit {
    if !point_in_rect(area, col, row) {
        return FeedHit::Nothing;
    }
    let layout = FeedLayout::build(state);
    let virtual_row = i32::from(row - area.y) + state.view_scroll();
    let Some(slot) = layout
        .slots
        .iter()
        .find(|s| virtual_row >= s.content_top && virtual_row < s.bottom())
    else {
        return FeedHit::Nothing;
    };

    let section = &state.sections[slot.section];
    match section.spec.layout {
        SectionLayout::Marquee { .. } => FeedHit::Marquee {
            section: slot.section,
        },
        SectionLayout::Grid { .. } => {
            let rel_x = col - area.x;
            let rel_y = (virtual_row - slot.content_top) as u16;
            (0..section.items.len())
                .find_map(|index| {
                    let (x, y, w, h) = grid_cell(section, area.width, index);
                    let card = Rect::new(x, y, w, h);
                    point_in_rect(card, rel_x, rel_y).then(|| FeedHit::GridCard {
                        section: slot.section,
                        index,
                        heart: point_in_rect(heart_rect(card), rel_x, rel_y),
                    })
                })
                .unwrap_or(FeedHit::Nothing)
        }
    }
}

// ───────────────────────────────────────── widget ────────────

pub struct FeedView<'a> {
    pub state: &'a AppState,
}

impl<'a> FeedView<'a> {
    fn screen_y(&self, area: Rect, virtual_row: i32) -> i32 {
        i32::from(area.y) + virtual_row - self.state.view_scroll()
    }

    fn render_title(&self, slot: &FeedSlot, area: Rect, buf: &mut Buffer) {
        let y = self.screen_y(area, slot.top);
        if y < i32::from(area.y) || y >= i32::from(area.bottom()) {
            return;
        }
        let spec = self.state.sections[slot.section].spec;
        let mut spans = vec![
            Span::styled("▍", Style::default().fg(accent_color(spec.accent))),
            Span::styled(format!(" {}", spec.title), Theme::section_title_style()),
        ];
        if self.state.focus == Focus::Section(slot.section) {
            spans.push(Span::styled("  ◂", Theme::dim_style()));
        }
        buf.set_line(area.x, y as u16, &Line::from(spans), area.width);
    }

    fn render_grid(&self, slot: &FeedSlot, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let section = &state.sections[slot.section];
        let focused = state.focus == Focus::Section(slot.section);
        for (index, video) in section.items.iter().enumerate() {
            let (x, y, w, h) = grid_cell(section, area.width, index);
            let top = self.screen_y(area, slot.content_top + i32::from(y));
            let ratio = visible_ratio(top, h, i32::from(area.y), area.height);
            let card = VideoCard::new(video)
                .liked(state.interactions.heart_active(&video.id))
                .progress(state.interactions.progress_of(&video.id))
                .preview(preview_state(
                    ratio,
                    state.overlay_active(),
                    state.config.autoplay_previews,
                ))
                .focused(focused && section.cursor == index);
            render_clipped(card, w, h, buf, i32::from(area.x + x), top, area);
        }
    }

    fn render_pull_hint(&self, area: Rect, buf: &mut Buffer) {
        let pull = self.state.pull.pull_offset();
        let rows = self.state.pull_shift_rows();
        if pull <= 0.0 || rows <= 0 {
            return;
        }
        let text = if pull > REFRESH_TRIGGER {
            "↻ release to refresh"
        } else {
            "↓ pull to refresh"
        };
        let style = Theme::logo_style(self.state.is_refreshing());
        Paragraph::new(Line::from(Span::styled(text, style)))
            .alignment(Alignment::Center)
            .render(Rect::new(area.x, area.y, area.width, 1), buf);
    }
}

impl<'a> Widget for FeedView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let state = self.state;
        if state.catalog.videos.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "The vault is empty.",
                Theme::dim_style(),
            )))
            .alignment(Alignment::Center)
            .render(area, buf);
            return;
        }

        let layout = FeedLayout::build(state);
        for slot in &layout.slots {
            self.render_title(slot, area, buf);
            let section = &state.sections[slot.section];
            match &section.marquee {
                Some(marquee) => {
                    let strip = MarqueeStrip::new(marquee, &state.interactions)
                        .focused(state.focus == Focus::Section(slot.section));
                    let top = self.screen_y(area, slot.content_top);
                    render_clipped(strip, area.width, slot.content_height, buf, i32::from(area.x), top, area);
                }
                None => self.render_grid(slot, area, buf),
            }
        }

        let footer_y = self.screen_y(area, i32::from(layout.total_rows) - 2);
        if footer_y >= i32::from(area.y) && footer_y < i32::from(area.bottom()) {
            Paragraph::new(Line::from(Span::styled(
                format!("── {FOOTER_TEXT} ──"),
                Theme::dim_style(),
            )))
            .alignment(Alignment::Center)
            .render(Rect::new(area.x, footer_y as u16, area.width, 1), buf);
        }

        self.render_pull_hint(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::test_state;
    use crate::core::feed::SECTIONS;
    use crate::ui::test_support::buffer_text;

    #[test]
    fn layout_stacks_visible_sections() {
        let state = test_state(30, 20);
        let layout = FeedLayout::build(&state);
        // Continue-watching is hidden without history.
        assert_eq!(layout.slots.len(), SECTIONS.len() - 1);

        let first = layout.slots[0];
        assert_eq!((first.top, first.content_top, first.content_height), (0, 1, 8));
        let second = layout.slots[1];
        assert_eq!(second.top, 10);
        assert_eq!(second.content_height, 5);
        // Shorts grid: 4 items in 2 columns → 2 rows of 8 plus a gap.
        assert_eq!(layout.slots[2].content_height, 17);
        // Long grid: 2 items in 1 column → 2 rows of 5 plus a gap.
        assert_eq!(layout.slots[3].content_height, 11);
        assert_eq!(layout.max_scroll(10), layout.total_rows - 10);
    }

    #[test]
    fn grid_cells_split_width_by_columns() {
        let state = test_state(30, 20);
        let grid = &state.sections[2];
        assert_eq!(grid_cell(grid, 41, 0), (0, 0, 20, 8));
        assert_eq!(grid_cell(grid, 41, 1), (21, 0, 20, 8));
        assert_eq!(grid_cell(grid, 41, 2), (0, 9, 20, 8));
    }

    #[test]
    fn hit_test_finds_strips_cards_and_hearts() {
        let state = test_state(30, 20);
        let area = Rect::new(0, 6, 41, 40);
        let layout = FeedLayout::build(&state);

        // Title row of the first section.
        assert_eq!(hit_test(&state, area, 5, 6), FeedHit::Nothing);
        assert_eq!(hit_test(&state, area, 5, 7), FeedHit::Marquee { section: 0 });

        let grid = layout.slot(2).unwrap();
        let row = area.y + grid.content_top as u16 + 2;
        assert_eq!(
            hit_test(&state, area, 25, row),
            FeedHit::GridCard {
                section: 2,
                index: 1,
                heart: false
            }
        );
        let heart = heart_rect(Rect::new(21, 0, 20, 8));
        let heart_row = area.y + grid.content_top as u16 + heart.y;
        assert_eq!(
            hit_test(&state, area, heart.x, heart_row),
            FeedHit::GridCard {
                section: 2,
                index: 1,
                heart: true
            }
        );
        // The gap column between the two cards.
        assert_eq!(hit_test(&state, area, 20, row), FeedHit::Nothing);
    }

    #[test]
    fn scrolled_feed_shifts_hits() {
        let mut state = test_state(30, 20);
        let area = Rect::new(0, 0, 40, 30);
        state.feed_scroll = 10;
        state.smooth = Default::default();
        state.smooth.set_target(10);
        for _ in 0..40 {
            state.smooth.tick();
        }
        // Virtual row 11 is the first long strip's content.
        assert_eq!(hit_test(&state, area, 3, 1), FeedHit::Marquee { section: 1 });
    }

    #[test]
    fn focus_span_of_grid_follows_cursor() {
        let mut state = test_state(30, 20);
        let layout = FeedLayout::build(&state);
        let slot = *layout.slot(2).unwrap();
        assert_eq!(focus_span(&state, &layout, 2, 40), Some((slot.top, slot.content_top + 8)));
        state.sections[2].cursor = 3;
        assert_eq!(
            focus_span(&state, &layout, 2, 40),
            Some((slot.content_top + 9, slot.content_top + 17))
        );
    }

    #[test]
    fn renders_titles_footer_and_paused_previews_under_overlay() {
        let mut state = test_state(6, 3);
        let area = Rect::new(0, 0, 60, 200);
        let mut buf = Buffer::empty(area);
        FeedView { state: &state }.render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Quick Horror Flashes"));
        assert!(text.contains("Leaving the Crypt"));
        assert!(text.contains(FOOTER_TEXT));
        assert!(!text.contains("❚❚"));

        state.active_view = crate::app::state::ActiveView::Search;
        let mut buf = Buffer::empty(area);
        FeedView { state: &state }.render(area, &mut buf);
        assert!(buffer_text(&buf).contains("❚❚"));
    }

    #[test]
    fn empty_catalog_shows_message() {
        let state = test_state(0, 0);
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        FeedView { state: &state }.render(area, &mut buf);
        assert!(buffer_text(&buf).contains("The vault is empty."));
    }
}
