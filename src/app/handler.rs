//! Input handling: maps key/mouse events to state mutations.
//!
//! Handlers never perform I/O themselves; anything that leaves the feed
//! (playback, reloads, persistence) is queued as a [`HostAction`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::core::video::VideoItem;
use crate::ui::feed_view::{focus_span, hit_test, FeedHit, FeedLayout};
use crate::ui::header::HeaderGeometry;
use crate::ui::layout::AppLayout;
use crate::ui::marquee_strip::{card_at, viewport_units};
use crate::ui::search::{overlay_area, SearchGeometry};
use crate::ui::{nav, point_in_rect, COL_UNITS, ROW_UNITS};

use super::host::HostAction;
use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState, Focus, PointerCapture};

/// Rows moved per wheel notch.
const WHEEL_ROWS: u16 = 3;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Feed => handle_feed_key(state, key),
        ActiveView::Search => handle_search_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => handle_controls_key(state, key),
    }
}

fn feed_area(state: &AppState) -> Rect {
    state.screen_layout().feed_area
}

// ── Feed (configurable bindings) ────────────────────────────────

fn handle_feed_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::OpenSearch => state.open_search(),
        Action::HardRefresh => state.push_action(HostAction::HardRefresh),
        Action::OpenOffline => state.push_action(HostAction::OpenOffline),
        Action::MoveDown => {
            move_vertical(state, 1);
            scroll_focus_into_view(state);
        }
        Action::MoveUp => {
            move_vertical(state, -1);
            scroll_focus_into_view(state);
        }
        Action::MoveLeft => move_horizontal(state, -1),
        Action::MoveRight => move_horizontal(state, 1),
        Action::Activate => activate(state),
        Action::ToggleLike => {
            if let Some(id) = focused_video(state).map(|v| v.id.clone()) {
                state.push_action(HostAction::ToggleLike(id));
            }
        }
    }
}

/// Move focus one row.  Grids step through their own rows first.
fn move_vertical(state: &mut AppState, delta: i32) {
    let visible = state.visible_sections();
    match state.focus {
        Focus::Nav => {
            if delta > 0 {
                if let Some(&first) = visible.first() {
                    state.focus = Focus::Section(first);
                }
            }
        }
        Focus::Section(i) => {
            let section = &mut state.sections[i];
            let columns = usize::from(section.columns());
            if section.marquee.is_none() {
                if delta > 0 && section.cursor + columns < section.items.len() {
                    section.cursor += columns;
                    return;
                }
                if delta < 0 && section.cursor >= columns {
                    section.cursor -= columns;
                    return;
                }
            }
            let pos = visible.iter().position(|&s| s == i);
            state.focus = match (pos, delta > 0) {
                (Some(p), true) => Focus::Section(*visible.get(p + 1).unwrap_or(&i)),
                (Some(0), false) | (None, _) => Focus::Nav,
                (Some(p), false) => Focus::Section(visible[p - 1]),
            };
        }
    }
}

fn move_horizontal(state: &mut AppState, delta: i32) {
    match state.focus {
        Focus::Nav => {
            let count = state.catalog.categories.len();
            if count == 0 {
                return;
            }
            state.nav_cursor = (state.nav_cursor as i64 + i64::from(delta)).rem_euclid(count as i64) as usize;
            state.nav_shift = nav::shift_for(&state.catalog.categories, state.nav_cursor);
        }
        Focus::Section(i) => {
            let section = &mut state.sections[i];
            match &mut section.marquee {
                Some(marquee) => marquee.nudge(delta),
                None => {
                    let last = section.items.len().saturating_sub(1);
                    section.cursor = if delta < 0 {
                        section.cursor.saturating_sub(1)
                    } else {
                        (section.cursor + 1).min(last)
                    };
                }
            }
        }
    }
}

/// The card the keyboard is on: a marquee's middle card or a grid cursor.
fn focused_video(state: &AppState) -> Option<&VideoItem> {
    let Focus::Section(i) = state.focus else {
        return None;
    };
    let section = state.sections.get(i)?;
    match &section.marquee {
        Some(marquee) => {
            let index = marquee.center_index(viewport_units(feed_area(state)))?;
            marquee.click(index)
        }
        None => section.items.get(section.cursor),
    }
}

fn activate(state: &mut AppState) {
    if state.focus == Focus::Nav {
        if let Some(name) = state.catalog.categories.get(state.nav_cursor).cloned() {
            state.push_action(HostAction::SelectCategory(name));
        }
        return;
    }
    if let Some(video) = focused_video(state).cloned() {
        state.play(video);
    }
}

/// Adjust the scroll so the focused section (or grid row) is on screen.
fn scroll_focus_into_view(state: &mut AppState) {
    let Focus::Section(i) = state.focus else {
        return;
    };
    let area = feed_area(state);
    let layout = FeedLayout::build(state);
    let Some((top, bottom)) = focus_span(state, &layout, i, area.width) else {
        return;
    };
    let scroll = i32::from(state.feed_scroll);
    let height = i32::from(area.height);
    let target = if top < scroll {
        top
    } else if bottom > scroll + height {
        (bottom - height).min(top)
    } else {
        return;
    };
    state.set_scroll(target.max(0) as u16, layout.max_scroll(area.height));
}

fn scroll_by(state: &mut AppState, delta: i32) {
    let area = feed_area(state);
    let max = FeedLayout::build(state).max_scroll(area.height);
    let row = (i32::from(state.feed_scroll) + delta).max(0) as u16;
    state.set_scroll(row, max);
}

// ── Search overlay (hardcoded keys) ─────────────────────────────

fn handle_search_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.close_search(),
        KeyCode::Up => {
            state.search.selected = state.search.selected.saturating_sub(1);
        }
        KeyCode::Down => {
            if state.search.selected + 1 < state.search.results.len() {
                state.search.selected += 1;
            }
        }
        KeyCode::Enter => {
            let selected = state.search.selected;
            play_search_result(state, selected);
        }
        KeyCode::Backspace => {
            state.search.query.pop();
            state.search.selected = 0;
            state.refresh_search();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.search.query.push(c);
            state.search.selected = 0;
            state.refresh_search();
        }
        _ => {}
    }
}

fn play_search_result(state: &mut AppState, index: usize) {
    let Some(video) = state.search_results().get(index).map(|v| (*v).clone()) else {
        return;
    };
    state.close_search();
    state.play(video);
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Feed;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected < SETTINGS_ITEMS.len() - 1 {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Submenu { view, .. } => {
                        state.active_view = *view;
                        state.controls_selected = 0;
                    }
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => cycle(state),
                }
            }
        }
        _ => {}
    }
}

// ── Controls submenu (read-only list of bindings) ───────────────

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Feed;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < Action::ALL.len() - 1 {
                state.controls_selected += 1;
            }
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match state.active_view {
        ActiveView::Feed => handle_feed_mouse(state, mouse),
        ActiveView::Search => handle_search_mouse(state, mouse),
        ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => {}
    }
}

fn handle_search_mouse(state: &mut AppState, mouse: MouseEvent) {
    let area = overlay_area(state.terminal_area);
    let geometry = SearchGeometry::from_area(area);
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(geometry.close, col, row) || !point_in_rect(area, col, row) {
                state.close_search();
            } else if let Some(index) = geometry.result_at(col, row) {
                play_search_result(state, index);
            }
        }
        MouseEventKind::ScrollUp => {
            state.search.selected = state.search.selected.saturating_sub(1);
        }
        MouseEventKind::ScrollDown => {
            if state.search.selected + 1 < state.search.results.len() {
                state.search.selected += 1;
            }
        }
        _ => {}
    }
}

fn handle_feed_mouse(state: &mut AppState, mouse: MouseEvent) {
    let layout = state.screen_layout();
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => mouse_down(state, &layout, col, row),
        MouseEventKind::Drag(MouseButton::Left) => mouse_drag(state, &layout, col, row),
        MouseEventKind::Up(MouseButton::Left) => mouse_up(state, &layout, col),
        MouseEventKind::ScrollDown if point_in_rect(layout.feed_area, col, row) => {
            scroll_by(state, i32::from(WHEEL_ROWS));
        }
        MouseEventKind::ScrollUp if point_in_rect(layout.feed_area, col, row) => {
            scroll_by(state, -i32::from(WHEEL_ROWS));
        }
        _ => {}
    }
}

fn mouse_down(state: &mut AppState, layout: &AppLayout, col: u16, row: u16) {
    state.capture = None;

    let header = HeaderGeometry::from_area(layout.header_area);
    if point_in_rect(header.logo, col, row) {
        state.push_action(HostAction::HardRefresh);
        return;
    }
    if point_in_rect(header.search, col, row) {
        state.open_search();
        return;
    }
    if point_in_rect(header.offline, col, row) {
        state.push_action(HostAction::OpenOffline);
        return;
    }

    if let Some(index) = nav::category_at(
        &state.catalog.categories,
        state.nav_shift,
        layout.nav_area,
        col,
        row,
    ) {
        state.capture = Some(PointerCapture::Nav { index, moved: false });
        return;
    }

    if !point_in_rect(layout.feed_area, col, row) {
        return;
    }
    let now = state.now_ms();
    state.capture = Some(match hit_test(state, layout.feed_area, col, row) {
        FeedHit::Marquee { section } => {
            if let Some(marquee) = &mut state.sections[section].marquee {
                marquee.press(f64::from(col) * COL_UNITS, now);
            }
            PointerCapture::Marquee {
                section,
                moved: false,
            }
        }
        FeedHit::GridCard {
            section,
            index,
            heart,
        } => PointerCapture::Grid {
            section,
            index,
            heart,
            moved: false,
        },
        FeedHit::Nothing => PointerCapture::Feed,
    });
    if !matches!(state.capture, Some(PointerCapture::Marquee { .. })) {
        state.pull.press(f64::from(row) * ROW_UNITS, state.feed_scroll == 0);
    }
}

fn mouse_drag(state: &mut AppState, layout: &AppLayout, col: u16, row: u16) {
    let Some(capture) = state.capture else {
        return;
    };
    match capture {
        PointerCapture::Marquee { section, .. } => {
            let still_on_strip =
                hit_test(state, layout.feed_area, col, row) == FeedHit::Marquee { section };
            let now = state.now_ms();
            if let Some(marquee) = &mut state.sections[section].marquee {
                if still_on_strip {
                    marquee.drag_to(f64::from(col) * COL_UNITS, now);
                } else if marquee.is_dragging() {
                    marquee.leave();
                }
            }
            state.capture = Some(PointerCapture::Marquee {
                section,
                moved: true,
            });
        }
        PointerCapture::Nav { index, .. } => {
            state.capture = Some(PointerCapture::Nav { index, moved: true });
        }
        PointerCapture::Grid {
            section,
            index,
            heart,
            ..
        } => {
            state.capture = Some(PointerCapture::Grid {
                section,
                index,
                heart,
                moved: true,
            });
            state.pull.drag(f64::from(row) * ROW_UNITS);
        }
        PointerCapture::Feed => state.pull.drag(f64::from(row) * ROW_UNITS),
    }
}

fn mouse_up(state: &mut AppState, layout: &AppLayout, col: u16) {
    let capture = state.capture.take();
    if state.pull.release() {
        tracing::debug!("pull to refresh");
        state.push_action(HostAction::HardRefresh);
    }

    match capture {
        Some(PointerCapture::Marquee { section, moved }) => {
            let Some(marquee) = &mut state.sections[section].marquee else {
                return;
            };
            // A drag that left the strip already ended with `leave`.
            if marquee.is_dragging() {
                marquee.release();
            }
            if moved {
                return;
            }
            let clicked = card_at(marquee, layout.feed_area, col)
                .and_then(|index| marquee.click(index))
                .cloned();
            if let Some(video) = clicked {
                state.play(video);
            }
        }
        Some(PointerCapture::Grid {
            section,
            index,
            heart,
            moved: false,
        }) => {
            let Some(video) = state.sections[section].items.get(index).cloned() else {
                return;
            };
            state.focus = Focus::Section(section);
            state.sections[section].cursor = index;
            if heart {
                state.push_action(HostAction::ToggleLike(video.id));
            } else {
                state.play(video);
            }
        }
        Some(PointerCapture::Nav {
            index,
            moved: false,
        }) => {
            if let Some(name) = state.catalog.categories.get(index).cloned() {
                state.nav_cursor = index;
                state.push_action(HostAction::SelectCategory(name));
            }
        }
        _ => {}
    }
}
