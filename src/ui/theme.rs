//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::stats::Accent;

/// Central theme.  All colours are defined here.
pub struct Theme;

impl Theme {
    // ── feed ───────────────────────────────────────────────────
    pub fn section_title_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_title_style() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn likes_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn heart_style(active: bool) -> Style {
        if active {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn trending_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    }

    pub fn progress_style() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn focused_border_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn logo_style(refreshing: bool) -> Style {
        let fg = if refreshing { Color::Yellow } else { Color::Red };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }

    pub fn sync_style() -> Style {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    }

    pub fn offline_style(downloading: bool, has_downloads: bool) -> Style {
        if downloading {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else if has_downloads {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn banner_style() -> Style {
        Style::default().fg(Color::Gray).bg(Color::Rgb(8, 32, 40))
    }

    pub fn category_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn command_input_style() -> Style {
        Style::default().fg(Color::Yellow)
    }
}

/// Terminal colour for a named accent.
pub fn accent_color(accent: Accent) -> Color {
    match accent {
        Accent::Red => Color::Red,
        Accent::Cyan => Color::Cyan,
        Accent::Yellow => Color::Yellow,
        Accent::Purple => Color::Magenta,
        Accent::Green => Color::LightGreen,
        Accent::Blue => Color::Blue,
        Accent::Orange => Color::Rgb(249, 115, 22),
        Accent::Emerald => Color::Rgb(16, 185, 129),
        Accent::Indigo => Color::Rgb(99, 102, 241),
        Accent::White => Color::White,
    }
}
