//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No catalog I/O happens here.
//!
//! Core geometry is expressed in units (roughly CSS pixels); one terminal
//! column covers [`COL_UNITS`] and one row covers [`ROW_UNITS`].

pub mod canvas;
pub mod card;
pub mod feed_view;
pub mod header;
pub mod layout;
pub mod marquee_strip;
pub mod nav;
pub mod popup;
pub mod search;
pub mod smooth_scroll;
pub mod spinner;
pub mod theme;

use ratatui::layout::Rect;

/// Horizontal units per terminal column.
pub const COL_UNITS: f64 = 8.0;
/// Vertical units per terminal row.
pub const ROW_UNITS: f64 = 16.0;

/// Convert a unit length to whole columns (at least one for non-zero input).
pub fn units_to_cols(units: f64) -> u16 {
    if units <= 0.0 {
        return 0;
    }
    ((units / COL_UNITS).round() as u16).max(1)
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
