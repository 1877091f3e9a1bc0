//! A horror video feed for the terminal.
//!
//! Run the binary with a catalog file to browse rotating shorts and long
//! video carousels.  Drag the marquees with the mouse, click a card to play
//! it through the configured player command.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Frame, Terminal};
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};

use crate::app::{
    catalog_runtime::{apply_update, CatalogUpdate},
    event::{spawn_event_reader, AppEvent},
    handler, host,
    state::{ActiveView, AppState, Focus},
};
use crate::config::AppConfig;
use crate::core::video::{Catalog, UserInteractions};
use crate::ui::{
    feed_view::FeedView,
    header::{HeaderWidget, SyncBanner},
    layout::AppLayout,
    nav::CategoryTrain,
    popup,
    search::{overlay_area, SearchOverlay},
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Horror video feed for the terminal")]
struct Cli {
    /// Catalog JSON: a list of videos, or `{ "categories": [...], "videos": [...] }`.
    catalog: PathBuf,

    /// Likes, saves, downloads and watch history.  Likes are written back.
    #[arg(long)]
    interactions: Option<PathBuf>,

    /// Animation frame interval in milliseconds (overrides config).
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Seconds between feed rotations (overrides config).
    #[arg(long)]
    rotation_secs: Option<u64>,
}

fn load_interactions(path: Option<&PathBuf>) -> Result<UserInteractions> {
    match path {
        Some(path) if path.exists() => Ok(UserInteractions::load(path)?),
        _ => Ok(UserInteractions::default()),
    }
}

// ───────────────────────────────────────── timers ────────────

fn frame_interval(config: &AppConfig) -> Interval {
    let mut frames = interval(Duration::from_millis(config.frame_ms));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    frames
}

/// First rotation fires one full period after arming.
fn rotation_interval(config: &AppConfig) -> Interval {
    let period = Duration::from_secs(config.rotation_secs);
    let mut rotation = interval_at(Instant::now() + period, period);
    rotation.set_missed_tick_behavior(MissedTickBehavior::Delay);
    rotation
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area(), state.sync_status.is_some());

    frame.render_widget(
        HeaderWidget {
            refreshing: state.is_refreshing(),
            sync: state.sync_status,
            has_downloads: state.interactions.has_downloads(),
            downloading: state.interactions.is_downloading(),
            tick: state.frame,
        },
        layout.header_area,
    );
    frame.render_widget(
        CategoryTrain {
            categories: &state.catalog.categories,
            shift: state.nav_shift,
            cursor: (state.focus == Focus::Nav).then_some(state.nav_cursor),
        },
        layout.nav_area,
    );
    if let Some(sync) = state.sync_status {
        frame.render_widget(SyncBanner { sync }, layout.banner_area);
    }
    frame.render_widget(FeedView { state }, layout.feed_area);

    let hint = state.config.status_bar_hint();
    let status_text = match state.active_view {
        ActiveView::Feed | ActiveView::Search => {
            state.status_message.as_deref().unwrap_or(&hint)
        }
        ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => "",
    };
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);

    match state.active_view {
        ActiveView::Search => {
            frame.render_widget(
                SearchOverlay {
                    query: &state.search.query,
                    results: state.search_results(),
                    selected: state.search.selected,
                },
                overlay_area(frame.area()),
            );
        }
        ActiveView::SettingsMenu => {
            frame.render_widget(
                popup::SettingsPopup {
                    state,
                    selected: state.settings_selected,
                },
                frame.area(),
            );
        }
        ActiveView::ControlsSubmenu => {
            frame.render_widget(
                popup::ControlsPopup {
                    config: &state.config,
                    selected: state.controls_selected,
                },
                frame.area(),
            );
        }
        ActiveView::Feed => {}
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── load data ─────────────────────────────────────────────
    let catalog = Catalog::load(&cli.catalog)?;
    let interactions = load_interactions(cli.interactions.as_ref())
        .context("failed to load interactions")?;
    tracing::info!(
        videos = catalog.videos.len(),
        categories = catalog.categories.len(),
        "catalog loaded"
    );

    let mut user_config = AppConfig::load();
    if let Some(ms) = cli.frame_ms {
        user_config.frame_ms = ms.clamp(8, 200);
    }
    if let Some(secs) = cli.rotation_secs {
        user_config.rotation_secs = secs.clamp(1, 3600);
    }
    let mut state = AppState::new(
        catalog,
        cli.catalog.clone(),
        interactions,
        cli.interactions.clone(),
        user_config,
    );

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels & timers ───────────────────────────────
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (reload_tx, mut reload_rx) = tokio::sync::mpsc::unbounded_channel::<CatalogUpdate>();
    let mut frames = frame_interval(&state.config);
    let mut rotation = rotation_interval(&state.config);
    let mut armed = (state.config.frame_ms, state.config.rotation_secs);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            draw(frame, &state);
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => {
                        state.terminal_area = ratatui::layout::Rect::new(0, 0, w, h);
                    }
                }
            }

            Some(update) = reload_rx.recv() => {
                // Drain everything queued before the next redraw.
                apply_update(&mut state, update);
                while let Ok(update) = reload_rx.try_recv() {
                    apply_update(&mut state, update);
                }
            }

            _ = frames.tick() => state.tick_frame(),

            _ = rotation.tick() => state.rotate(),
        }

        for action in state.take_actions() {
            host::dispatch(&mut state, action, &reload_tx);
        }

        // Settings changes take effect on the next tick.
        let wanted = (state.config.frame_ms, state.config.rotation_secs);
        if wanted != armed {
            tracing::debug!(frame_ms = wanted.0, rotation_secs = wanted.1, "re-arming timers");
            frames = frame_interval(&state.config);
            rotation = rotation_interval(&state.config);
            armed = wanted;
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
