//! Category "train": the category list laid out twice in a row and slid
//! left continuously, so it reads as an endless loop.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::ui::canvas::blit;
use crate::ui::theme::Theme;

/// Columns between two category labels.
const GAP: u16 = 2;
/// Columns the train moves per frame.
pub const TRAIN_SPEED: f64 = 0.1;

fn label(name: &str) -> Span<'_> {
    Span::raw(name)
}

/// `(start column, width)` of each label within one copy of the train.
pub fn label_spans(categories: &[String]) -> Vec<(u16, u16)> {
    let mut x = 0u16;
    categories
        .iter()
        .map(|name| {
            let width = label(name).width() as u16 + 2;
            let span = (x, width);
            x = x.saturating_add(width + GAP);
            span
        })
        .collect()
}

/// Width of one copy of the train.
pub fn train_width(categories: &[String]) -> u16 {
    label_spans(categories)
        .last()
        .map_or(0, |&(x, w)| x.saturating_add(w + GAP))
}

/// Advance the train by one frame, wrapping after one full copy.
pub fn advance_shift(shift: f64, categories: &[String]) -> f64 {
    let width = f64::from(train_width(categories));
    if width <= 0.0 {
        return 0.0;
    }
    (shift + TRAIN_SPEED).rem_euclid(width)
}

/// Shift that brings label `index` to the left edge of the strip.
pub fn shift_for(categories: &[String], index: usize) -> f64 {
    label_spans(categories)
        .get(index)
        .map_or(0.0, |&(x, _)| f64::from(x))
}

/// Inner row of the nav area (inside the top/bottom rules).
pub fn inner_area(area: Rect) -> Rect {
    Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .inner(area)
}

/// Category under terminal column `col` of the nav area.
pub fn category_at(categories: &[String], shift: f64, area: Rect, col: u16, row: u16) -> Option<usize> {
    let inner = inner_area(area);
    if !crate::ui::point_in_rect(inner, col, row) {
        return None;
    }
    let width = f64::from(train_width(categories));
    if width <= 0.0 {
        return None;
    }
    let rel = (f64::from(col - inner.x) + shift.floor()).rem_euclid(width) as u16;
    label_spans(categories)
        .iter()
        .position(|&(x, w)| rel >= x && rel < x + w)
}

pub struct CategoryTrain<'a> {
    pub categories: &'a [String],
    pub shift: f64,
    /// Highlighted label while the strip has keyboard focus.
    pub cursor: Option<usize>,
}

impl<'a> Widget for CategoryTrain<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let width = train_width(self.categories);
        if inner.is_empty() || width == 0 {
            return;
        }

        let mut copy = Buffer::empty(Rect::new(0, 0, width, 1));
        for (i, (name, (x, w))) in self
            .categories
            .iter()
            .zip(label_spans(self.categories))
            .enumerate()
        {
            let style = if self.cursor == Some(i) {
                Theme::selected_style()
            } else {
                Theme::category_style()
            };
            copy.set_line(x, 0, &Line::from(Span::styled(format!(" {name} "), style)), w);
        }

        let mut x = i32::from(inner.x) - self.shift.floor() as i32;
        while x < i32::from(inner.right()) {
            blit(&copy, buf, x, i32::from(inner.y), inner);
            x += i32::from(width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::row_text;

    fn cats() -> Vec<String> {
        vec!["ghosts".into(), "cults".into(), "asylum".into()]
    }

    #[test]
    fn spans_and_width() {
        let c = cats();
        assert_eq!(label_spans(&c), vec![(0, 8), (10, 7), (19, 8)]);
        assert_eq!(train_width(&c), 29);
        assert_eq!(train_width(&[]), 0);
    }

    #[test]
    fn shift_wraps_after_one_copy() {
        let c = cats();
        let mut shift = 28.95;
        shift = advance_shift(shift, &c);
        assert!(shift < 1.0, "{shift}");
        assert_eq!(advance_shift(5.0, &[]), 0.0);
    }

    #[test]
    fn hit_test_follows_shift_and_wraps() {
        let c = cats();
        let area = Rect::new(0, 3, 40, 3);
        assert_eq!(category_at(&c, 0.0, area, 1, 4), Some(0));
        assert_eq!(category_at(&c, 0.0, area, 12, 4), Some(1));
        assert_eq!(category_at(&c, 0.0, area, 8, 4), None); // gap
        assert_eq!(category_at(&c, 10.0, area, 1, 4), Some(1));
        // Column 30 with no shift lands in the second copy.
        assert_eq!(category_at(&c, 0.0, area, 30, 4), Some(0));
        // Border rows never hit.
        assert_eq!(category_at(&c, 0.0, area, 1, 3), None);
    }

    #[test]
    fn renders_doubled_list() {
        let c = cats();
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        CategoryTrain {
            categories: &c,
            shift: 0.0,
            cursor: None,
        }
        .render(area, &mut buf);
        let row = row_text(&buf, 1);
        assert_eq!(row.matches("ghosts").count(), 2, "{row}");
    }
}
