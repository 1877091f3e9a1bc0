//! Video card widget shared by the grid sections and the marquee strips.
//!
//! ```text
//! ╭────────────────╮
//! │The Haunted Doll│
//! │ TRENDING       │
//! │       ▶        │
//! │    ghosts      │
//! │━━━━━━──────────│
//! │1.2M likes    ♥ │
//! ╰────────────────╯
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::core::playback::PreviewState;
use crate::core::stats::{deterministic_stats, format_big_number, neon_accent};
use crate::core::video::VideoItem;
use crate::ui::theme::{accent_color, Theme};

/// Progress bars only show for partially watched videos.
const PROGRESS_MAX: f64 = 0.99;

pub struct VideoCard<'a> {
    video: &'a VideoItem,
    liked: bool,
    progress: f64,
    preview: PreviewState,
    focused: bool,
}

impl<'a> VideoCard<'a> {
    pub fn new(video: &'a VideoItem) -> Self {
        Self {
            video,
            liked: false,
            progress: 0.0,
            preview: PreviewState::Playing,
            focused: false,
        }
    }

    pub fn liked(mut self, liked: bool) -> Self {
        self.liked = liked;
        self
    }

    pub fn progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    pub fn preview(mut self, preview: PreviewState) -> Self {
        self.preview = preview;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

/// Border colour: trending cards are always red, the rest pick a neon
/// accent from their id.
pub fn border_color(video: &VideoItem) -> Color {
    if video.is_trending {
        Color::Red
    } else {
        accent_color(neon_accent(&video.id))
    }
}

/// Clickable heart inside a card occupying `card`.
pub fn heart_rect(card: Rect) -> Rect {
    if card.width < 5 || card.height < 4 {
        return Rect::default();
    }
    Rect::new(card.x + card.width - 4, card.y + card.height - 2, 2, 1)
}

impl<'a> Widget for VideoCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color(self.video)));
        if self.focused {
            block = block
                .border_type(BorderType::Thick)
                .border_style(Theme::focused_border_style());
        }

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let title = Line::from(Span::styled(self.video.title.as_str(), Theme::card_title_style()));
        buf.set_line(inner.x, inner.y, &title, inner.width);
        if inner.height < 3 {
            return;
        }

        let bottom = inner.y + inner.height - 1;
        let mut body_bottom = bottom;

        // ── likes + heart ───────────────────────────────────────
        let likes = format_big_number(deterministic_stats(&self.video.video_url).likes);
        buf.set_line(
            inner.x,
            bottom,
            &Line::from(Span::styled(format!("{likes} likes"), Theme::likes_style())),
            inner.width.saturating_sub(3),
        );
        let heart = heart_rect(area);
        if !heart.is_empty() {
            let glyph = if self.liked { "♥" } else { "♡" };
            buf.set_string(heart.x + 1, heart.y, glyph, Theme::heart_style(self.liked));
        }

        // ── progress ────────────────────────────────────────────
        if self.progress > 0.0 && self.progress < PROGRESS_MAX && inner.height >= 4 {
            body_bottom = bottom - 1;
            let filled = (f64::from(inner.width) * self.progress).round() as u16;
            let bar = Line::from(vec![
                Span::styled("━".repeat(filled as usize), Theme::progress_style()),
                Span::styled(
                    "─".repeat(inner.width.saturating_sub(filled) as usize),
                    Theme::dim_style(),
                ),
            ]);
            buf.set_line(inner.x, body_bottom, &bar, inner.width);
        }

        // ── badge + preview glyph ───────────────────────────────
        let mut body_top = inner.y + 1;
        if self.video.is_trending && body_top < body_bottom {
            buf.set_string(inner.x, body_top, " TRENDING ", Theme::trending_style());
            body_top += 1;
        }
        if body_top >= body_bottom {
            return;
        }

        let glyph = match self.preview {
            PreviewState::Playing => "▶",
            PreviewState::Paused => "❚❚",
        };
        let mut lines = vec![Line::from(Span::styled(glyph, border_color_style(self.video)))];
        if !self.video.category.is_empty() {
            lines.push(Line::from(Span::styled(
                self.video.category.as_str(),
                Theme::dim_style(),
            )));
        }
        let body = Rect::new(inner.x, body_top, inner.width, body_bottom - body_top);
        let pad = body.height.saturating_sub(lines.len() as u16) / 2;
        let body = Rect::new(body.x, body.y + pad, body.width, body.height - pad);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(body, buf);
    }
}

fn border_color_style(video: &VideoItem) -> Style {
    Style::default().fg(border_color(video))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::video;
    use crate::core::video::VideoType;
    use crate::ui::test_support::{buffer_text, row_text};

    fn render(card: VideoCard<'_>, width: u16, height: u16) -> Buffer {
        let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
        card.render(buf.area, &mut buf);
        buf
    }

    #[test]
    fn shows_title_likes_and_heart() {
        let v = video("a", "https://cdn.example/a.mp4", VideoType::Shorts);
        let buf = render(VideoCard::new(&v).liked(true), 20, 8);
        assert!(row_text(&buf, 1).contains("title a"));
        let likes = format_big_number(deterministic_stats(&v.video_url).likes);
        let last = row_text(&buf, 6);
        assert!(last.contains(&format!("{likes} likes")), "{last}");
        assert!(last.contains('♥'));
    }

    #[test]
    fn paused_preview_and_trending_badge() {
        let mut v = video("a", "u", VideoType::Shorts);
        v.is_trending = true;
        let buf = render(VideoCard::new(&v).preview(PreviewState::Paused), 20, 8);
        let text = buffer_text(&buf);
        assert!(text.contains("TRENDING"));
        assert!(text.contains("❚❚"));
        assert_eq!(border_color(&v), Color::Red);
    }

    #[test]
    fn progress_bar_only_for_partial_progress() {
        let v = video("a", "u", VideoType::Long);
        let partial = buffer_text(&render(VideoCard::new(&v).progress(0.5), 20, 8));
        assert!(partial.contains('━'));
        let done = buffer_text(&render(VideoCard::new(&v).progress(0.99), 20, 8));
        assert!(!done.contains('━'));
    }

    #[test]
    fn heart_sits_on_last_inner_row() {
        let card = Rect::new(10, 5, 18, 8);
        assert_eq!(heart_rect(card), Rect::new(24, 11, 2, 1));
        assert!(heart_rect(Rect::new(0, 0, 3, 3)).is_empty());
    }
}
