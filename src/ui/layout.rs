//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: header, category strip, optional sync banner,
/// feed and a status bar.
pub struct AppLayout {
    pub header_area: Rect,
    pub nav_area: Rect,
    /// Zero height unless a reload is reporting progress.
    pub banner_area: Rect,
    pub feed_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, banner: bool) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Length(3), // category train
                Constraint::Length(u16::from(banner)),
                Constraint::Min(3),    // feed (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            header_area: chunks[0],
            nav_area: chunks[1],
            banner_area: chunks[2],
            feed_area: chunks[3],
            status_area: chunks[4],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_without_overlap() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 40), false);
        assert_eq!(layout.header_area, Rect::new(0, 0, 80, 3));
        assert_eq!(layout.nav_area, Rect::new(0, 3, 80, 3));
        assert_eq!(layout.banner_area.height, 0);
        assert_eq!(layout.feed_area, Rect::new(0, 6, 80, 33));
        assert_eq!(layout.status_area, Rect::new(0, 39, 80, 1));
    }

    #[test]
    fn banner_pushes_feed_down_one_row() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 40), true);
        assert_eq!(layout.banner_area, Rect::new(0, 6, 80, 1));
        assert_eq!(layout.feed_area, Rect::new(0, 7, 80, 32));
        assert_eq!(layout.status_area, Rect::new(0, 39, 80, 1));
    }
}
