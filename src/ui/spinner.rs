//! Refresh indicator: a small spinner + label rendered in the top-right
//! corner of a given area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frames per spinner step, so the glyph turns slower than the marquees.
const FRAMES_PER_STEP: u64 = 3;

/// A small "refreshing…" indicator with a spinning icon.
///
/// Render this on top of the header's border.  It picks its own position
/// (top-right of `area`) and is invisible when `visible` is false.
pub struct RefreshIndicator {
    pub visible: bool,
    /// Frame counter driving the spinner.
    pub tick: u64,
}

impl Widget for RefreshIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.width < 18 || area.height == 0 {
            return;
        }

        let step = (self.tick / FRAMES_PER_STEP) as usize;
        let frame = SPINNER_FRAMES[step % SPINNER_FRAMES.len()];
        let label = format!(" {frame} refreshing ");

        let label_width = Span::raw(label.as_str()).width() as u16;
        let x = area.x + area.width.saturating_sub(label_width + 2);

        let line = Line::from(Span::styled(
            label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));

        buf.set_line(x, area.y, &line, label_width);
    }
}
