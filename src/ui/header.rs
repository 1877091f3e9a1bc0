//! Top bar: logo, sync progress, search and offline-vault buttons, plus the
//! sync banner shown under the category train while a reload runs.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::app::state::SyncStatus;
use crate::ui::spinner::RefreshIndicator;
use crate::ui::theme::Theme;

const LOGO: &str = " ☠ VAULT ";
const SEARCH_BUTTON: &str = "[/ search]";
const OFFLINE_BUTTON: &str = "[↓ vault]";
const SYNC_BAR_CELLS: usize = 10;
const BANNER_TEXT: &str = "● loading content into the vault…";

/// Clickable regions of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderGeometry {
    pub logo: Rect,
    pub search: Rect,
    pub offline: Rect,
    /// Space between the logo and the buttons.
    pub status: Rect,
}

impl HeaderGeometry {
    pub fn from_area(area: Rect) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        if inner.is_empty() {
            return Self {
                logo: Rect::default(),
                search: Rect::default(),
                offline: Rect::default(),
                status: Rect::default(),
            };
        }
        let row = inner.y;
        let right = inner.right();

        let offline_w = width_of(OFFLINE_BUTTON).min(inner.width);
        let offline = Rect::new(right - offline_w, row, offline_w, 1);

        let search_w = width_of(SEARCH_BUTTON).min(offline.x.saturating_sub(inner.x + 1));
        let search = Rect::new(offline.x.saturating_sub(search_w + 1), row, search_w, 1);

        let logo_w = width_of(LOGO).min(search.x.saturating_sub(inner.x));
        let logo = Rect::new(inner.x, row, logo_w, 1);

        let status_x = logo.right() + 1;
        let status = Rect::new(
            status_x,
            row,
            search.x.saturating_sub(status_x + 1),
            1,
        );

        Self {
            logo,
            search,
            offline,
            status,
        }
    }
}

fn width_of(text: &str) -> u16 {
    Span::raw(text).width() as u16
}

pub struct HeaderWidget {
    pub refreshing: bool,
    pub sync: Option<SyncStatus>,
    pub has_downloads: bool,
    /// A download is running; outranks `has_downloads`.
    pub downloading: bool,
    pub tick: u64,
}

impl Widget for HeaderWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::logo_style(self.refreshing));
        block.render(area, buf);

        let geometry = HeaderGeometry::from_area(area);
        if geometry.logo.is_empty() {
            return;
        }

        buf.set_line(
            geometry.logo.x,
            geometry.logo.y,
            &Line::from(Span::styled(LOGO, Theme::logo_style(self.refreshing))),
            geometry.logo.width,
        );
        buf.set_line(
            geometry.search.x,
            geometry.search.y,
            &Line::from(Span::styled(SEARCH_BUTTON, Style::default())),
            geometry.search.width,
        );
        buf.set_line(
            geometry.offline.x,
            geometry.offline.y,
            &Line::from(Span::styled(
                OFFLINE_BUTTON,
                Theme::offline_style(self.downloading, self.has_downloads),
            )),
            geometry.offline.width,
        );

        if let Some(sync) = self.sync {
            let line = Line::from(vec![
                Span::styled(format!("sync {}/{} ", sync.current, sync.total), Theme::sync_style()),
                Span::styled(sync_bar(sync), Theme::sync_style()),
            ]);
            buf.set_line(
                geometry.status.x,
                geometry.status.y,
                &line,
                geometry.status.width,
            );
        }

        RefreshIndicator {
            visible: self.refreshing,
            tick: self.tick,
        }
        .render(area, buf);
    }
}

/// `▰▰▰▱▱▱▱▱▱▱` with one cell per tenth.
pub fn sync_bar(sync: SyncStatus) -> String {
    let filled = if sync.total == 0 {
        0
    } else {
        (sync.current.min(sync.total) * SYNC_BAR_CELLS) / sync.total
    };
    format!(
        "{}{}",
        "▰".repeat(filled),
        "▱".repeat(SYNC_BAR_CELLS - filled)
    )
}

/// Whole-number percentage, rounded; 0 when nothing is known yet.
pub fn sync_percent(sync: SyncStatus) -> usize {
    if sync.total == 0 {
        return 0;
    }
    (sync.current as f64 / sync.total as f64 * 100.0).round() as usize
}

/// One-row reload banner.
pub struct SyncBanner {
    pub sync: SyncStatus,
}

impl Widget for SyncBanner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let percent = format!("{}% ", sync_percent(self.sync));
        let percent_w = width_of(&percent).min(area.width);
        buf.set_style(area, Theme::banner_style());
        buf.set_line(
            area.x + 1,
            area.y,
            &Line::from(Span::styled(BANNER_TEXT, Theme::sync_style())),
            area.width.saturating_sub(percent_w + 1),
        );
        buf.set_string(area.right() - percent_w, area.y, percent, Theme::banner_style());
    }
}
