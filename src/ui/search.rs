//! Search overlay widget (query input and matching videos).

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::core::search::RESULT_LIMIT;
use crate::core::video::{VideoItem, VideoType};
use crate::ui::popup::centered_fixed;
use crate::ui::theme::Theme;

const CLOSE_BUTTON: &str = "[x]";
/// Rows above the result list inside the border.
const RESULTS_OFFSET: u16 = 3;
const OVERLAY_WIDTH: u16 = 70;
const OVERLAY_HEIGHT: u16 = RESULTS_OFFSET + RESULT_LIMIT as u16 + 2;

/// Where the overlay sits on a screen of size `screen`.
pub fn overlay_area(screen: Rect) -> Rect {
    centered_fixed(OVERLAY_WIDTH, OVERLAY_HEIGHT, screen)
}

/// Clickable regions of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchGeometry {
    pub close: Rect,
    pub results: Rect,
}

impl SearchGeometry {
    pub fn from_area(area: Rect) -> Self {
        let inner = block().inner(area);
        let close = if area.width > 8 {
            Rect::new(area.right() - 5, area.y, 3, 1)
        } else {
            Rect::default()
        };
        let results = if inner.height > RESULTS_OFFSET {
            Rect::new(
                inner.x,
                inner.y + RESULTS_OFFSET,
                inner.width,
                inner.height - RESULTS_OFFSET,
            )
        } else {
            Rect::default()
        };
        Self { close, results }
    }

    /// Result index under `row`, if the row is inside the list.
    pub fn result_at(&self, col: u16, row: u16) -> Option<usize> {
        crate::ui::point_in_rect(self.results, col, row).then(|| (row - self.results.y) as usize)
    }
}

fn block() -> Block<'static> {
    Block::default()
        .title(" Search the Vault ")
        .title_style(Theme::logo_style(false))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_style())
}

pub struct SearchOverlay<'a> {
    pub query: &'a str,
    pub results: Vec<&'a VideoItem>,
    pub selected: usize,
}

impl<'a> Widget for SearchOverlay<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = block();
        let inner = block.inner(area);
        block.render(area, buf);

        let geometry = SearchGeometry::from_area(area);
        if !geometry.close.is_empty() {
            buf.set_string(geometry.close.x, geometry.close.y, CLOSE_BUTTON, Theme::logo_style(false));
        }
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        Paragraph::new(Line::from(vec![
            Span::styled("Search: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(self.query.to_string(), Theme::command_input_style()),
            Span::styled("▏", Theme::command_input_style()),
        ]))
        .render(Rect::new(inner.x, inner.y, inner.width, 1), buf);
        if inner.height < 2 {
            return;
        }
        Paragraph::new(Line::from(Span::styled(
            "title or category · Enter: play · Esc: close",
            Theme::dim_style(),
        )))
        .render(Rect::new(inner.x, inner.y + 1, inner.width, 1), buf);

        let list = geometry.results;
        if list.is_empty() {
            return;
        }

        if self.results.is_empty() {
            let empty = if self.query.trim().is_empty() {
                "Type to search the vault."
            } else {
                "Nothing in the vault matches."
            };
            Paragraph::new(Line::from(Span::styled(empty, Theme::dim_style())))
                .render(Rect::new(list.x, list.y, list.width, 1), buf);
            return;
        }

        for (row_idx, video) in self.results.iter().take(list.height as usize).enumerate() {
            let selected = self.selected == row_idx;
            let style = if selected {
                Theme::selected_style()
            } else {
                Theme::card_title_style()
            };
            let marker = if selected { "> " } else { "  " };
            let kind = match video.video_type {
                VideoType::Shorts => "short",
                _ => "long",
            };
            let line = Line::from(vec![
                Span::styled(format!("{marker}{}", video.title), style),
                Span::styled(format!("  {} · {kind}", video.category), Theme::dim_style()),
            ]);
            Paragraph::new(line).render(Rect::new(list.x, list.y + row_idx as u16, list.width, 1), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::video;
    use crate::ui::test_support::{buffer_text, row_text};

    #[test]
    fn geometry_maps_rows_to_results() {
        let g = SearchGeometry::from_area(Rect::new(0, 0, 40, 20));
        assert_eq!(g.close, Rect::new(35, 0, 3, 1));
        assert_eq!(g.results, Rect::new(1, 4, 38, 15));
        assert_eq!(g.result_at(5, 4), Some(0));
        assert_eq!(g.result_at(5, 6), Some(2));
        assert_eq!(g.result_at(5, 3), None);
    }

    #[test]
    fn overlay_fits_all_results_when_room_allows() {
        let area = overlay_area(Rect::new(0, 0, 100, 40));
        assert_eq!(area.width, 70);
        let g = SearchGeometry::from_area(area);
        assert_eq!(g.results.height as usize, RESULT_LIMIT);
        // Small terminals clamp.
        assert_eq!(overlay_area(Rect::new(0, 0, 30, 10)), Rect::new(0, 0, 30, 10));
    }

    #[test]
    fn shows_no_results_message_for_blank_and_unmatched() {
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        SearchOverlay {
            query: "zzz",
            results: Vec::new(),
            selected: 0,
        }
        .render(area, &mut buf);
        assert!(buffer_text(&buf).contains("Nothing in the vault matches."));
    }

    #[test]
    fn lists_results_with_selection_marker() {
        let a = video("a", "u", VideoType::Shorts);
        let b = video("b", "u", VideoType::Long);
        let area = Rect::new(0, 0, 50, 10);
        let mut buf = Buffer::empty(area);
        SearchOverlay {
            query: "title",
            results: vec![&a, &b],
            selected: 1,
        }
        .render(area, &mut buf);
        assert!(row_text(&buf, 4).contains("  title a  ghosts · short"));
        assert!(row_text(&buf, 5).contains("> title b  ghosts · long"));
    }
}
