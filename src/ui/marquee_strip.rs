//! Renders a [`Marquee`] as a horizontal strip of cards.
//!
//! The strip is drawn from the marquee's offset onward.  When the terminal
//! is wider than what is left of the content, the next cyclic copy follows
//! so the strip never shows a gap at the right edge.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::core::marquee::{Marquee, StripGeometry};
use crate::core::video::UserInteractions;
use crate::ui::canvas::render_clipped;
use crate::ui::card::VideoCard;
use crate::ui::{units_to_cols, COL_UNITS};

const SHORTS_ROWS: u16 = 8;
const LONG_ROWS: u16 = 5;

/// Rows a strip of this flavour occupies.
pub fn strip_height(geometry: StripGeometry) -> u16 {
    if geometry == StripGeometry::SHORTS {
        SHORTS_ROWS
    } else {
        LONG_ROWS
    }
}

/// Terminal columns (relative to the strip) where each drawn card starts,
/// in draw order.  Both rendering and hit testing go through this.
fn card_columns(marquee: &Marquee, area: Rect) -> Vec<(usize, i32)> {
    let total = marquee.total_width();
    if total <= 0.0 || area.is_empty() {
        return Vec::new();
    }
    let geometry = marquee.geometry();
    let card_cols = i32::from(units_to_cols(geometry.card_width));
    let offset = marquee.offset();
    let copies = ((offset + viewport_units(area)) / total).ceil().max(1.0) as usize;

    let mut placed = Vec::new();
    for copy in 0..copies {
        for index in 0..marquee.display().len() {
            let x_units = geometry.card_x(index) + copy as f64 * total - offset;
            let col = (x_units / COL_UNITS).floor() as i32;
            if col >= i32::from(area.width) {
                break;
            }
            if col + card_cols > 0 {
                placed.push((index, col));
            }
        }
    }
    placed
}

/// Display index of the card drawn at terminal column `col`.
pub fn card_at(marquee: &Marquee, area: Rect, col: u16) -> Option<usize> {
    let card_cols = i32::from(units_to_cols(marquee.geometry().card_width));
    let rel = i32::from(col) - i32::from(area.x);
    card_columns(marquee, area)
        .into_iter()
        .rev()
        .find(|&(_, start)| rel >= start && rel < start + card_cols)
        .map(|(index, _)| index)
}

/// Viewport width in units.
pub fn viewport_units(area: Rect) -> f64 {
    f64::from(area.width) * COL_UNITS
}

pub struct MarqueeStrip<'a> {
    marquee: &'a Marquee,
    interactions: &'a UserInteractions,
    focused: bool,
}

impl<'a> MarqueeStrip<'a> {
    pub fn new(marquee: &'a Marquee, interactions: &'a UserInteractions) -> Self {
        Self {
            marquee,
            interactions,
            focused: false,
        }
    }

    /// Highlight the card nearest the middle.
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> Widget for MarqueeStrip<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let geometry = self.marquee.geometry();
        let card_cols = units_to_cols(geometry.card_width);
        let highlighted = if self.focused {
            self.marquee.center_index(viewport_units(area))
        } else {
            None
        };

        for (index, col) in card_columns(self.marquee, area) {
            let video = &self.marquee.display()[index];
            let card = VideoCard::new(video)
                .liked(self.interactions.heart_active(&video.id))
                .progress(self.interactions.progress_of(&video.id))
                .focused(highlighted == Some(index));
            render_clipped(
                card,
                card_cols,
                area.height,
                buf,
                i32::from(area.x) + col,
                i32::from(area.y),
                area,
            );
        }
    }
}
