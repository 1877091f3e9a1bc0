//! Popup overlay widgets for the settings menu and controls submenu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::{SettingsItem, SETTINGS_ITEMS};
use crate::app::state::AppState;
use crate::config::{Action, AppConfig};

fn popup_block(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn row_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
    pub selected: usize,
}

impl<'a> Widget for SettingsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered_fixed(46, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Settings ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let selected = i == self.selected;
            let prefix = if selected { " ▸ " } else { "   " };
            let style = row_style(selected);
            let label = format!("{prefix}{:<24}", item.label());

            let value = match item {
                SettingsItem::Submenu { .. } => Span::styled("›", Style::default().fg(Color::DarkGray)),
                SettingsItem::Toggle { get, .. } => {
                    if get(self.state) {
                        Span::styled("[ON]", Style::default().fg(Color::Green))
                    } else {
                        Span::styled("[OFF]", Style::default().fg(Color::DarkGray))
                    }
                }
                SettingsItem::Cycle { value, .. } => {
                    Span::styled(value(self.state), Style::default().fg(Color::Yellow))
                }
            };
            lines.push(Line::from(vec![Span::styled(label, style), value]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: change  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── controls popup ────

/// Read-only list of the current key bindings.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
}

impl<'a> Widget for ControlsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (Action::ALL.len() as u16) + 6;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Controls ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![Line::raw("")];
        for (i, &action) in Action::ALL.iter().enumerate() {
            let selected = i == self.selected;
            let prefix = if selected { " ▸ " } else { "   " };
            let label_col = format!("{prefix}{:<22}", action.label());
            let keys = self.config.display_bindings(action);
            let keys_width = (inner.width as usize).saturating_sub(label_col.chars().count()).max(1);

            let key_style = if selected {
                Style::default().fg(Color::Yellow).bg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Yellow)
            };
            lines.push(Line::from(vec![
                Span::styled(label_col, row_style(selected)),
                Span::styled(format!("{keys:>keys_width$}"), key_style),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Edit config.toml to rebind  ←: back  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::buffer_text;

    #[test]
    fn centered_rect_is_clamped() {
        assert_eq!(centered_fixed(10, 4, Rect::new(0, 0, 20, 10)), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_fixed(40, 40, Rect::new(2, 2, 20, 10)), Rect::new(2, 2, 20, 10));
    }

    #[test]
    fn controls_list_every_action() {
        let config = AppConfig::default();
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        ControlsPopup {
            config: &config,
            selected: 0,
        }
        .render(area, &mut buf);
        let text = buffer_text(&buf);
        for action in Action::ALL {
            assert!(text.contains(action.label()), "{}", action.label());
        }
        assert!(text.contains("↑/k"));
    }
}
