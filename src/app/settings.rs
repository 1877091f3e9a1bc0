//! Items of the settings popup.  The handler changes them, the popup
//! renders them; every change is written to the config file at once.

use super::state::{ActiveView, AppState};

const FRAME_STEPS_MS: &[u64] = &[8, 16, 33, 50, 100];
const ROTATION_STEPS_SECS: &[u64] = &[5, 10, 15, 30, 60];

pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle, read and written via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }
}

/// Next value after `current` in `steps`, wrapping.  Values not in the list
/// restart from the first step.
fn next_step(steps: &[u64], current: u64) -> u64 {
    match steps.iter().position(|&s| s == current) {
        Some(idx) => steps[(idx + 1) % steps.len()],
        None => steps[0],
    }
}

fn persist(state: &mut AppState) {
    if let Err(err) = state.config.save() {
        tracing::warn!(error = %err, "failed to save config");
    }
}

/// Popup rows, top to bottom.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Toggle {
        label: "Autoplay Previews",
        get: |s| s.config.autoplay_previews,
        set: |s, v| {
            s.config.autoplay_previews = v;
            persist(s);
            s.status_message = Some(format!(
                "Autoplay previews: {}",
                if v { "on" } else { "off" }
            ));
        },
    },
    SettingsItem::Cycle {
        label: "Frame Rate",
        value: |s| format!("{}ms", s.config.frame_ms),
        cycle: |s| {
            s.config.frame_ms = next_step(FRAME_STEPS_MS, s.config.frame_ms);
            persist(s);
            s.status_message = Some(format!("Frame interval: {}ms", s.config.frame_ms));
        },
    },
    SettingsItem::Cycle {
        label: "Rotation Interval",
        value: |s| format!("{}s", s.config.rotation_secs),
        cycle: |s| {
            s.config.rotation_secs = next_step(ROTATION_STEPS_SECS, s.config.rotation_secs);
            persist(s);
            s.status_message = Some(format!("Rotation every {}s", s.config.rotation_secs));
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_wrap_and_recover() {
        assert_eq!(next_step(FRAME_STEPS_MS, 33), 50);
        assert_eq!(next_step(FRAME_STEPS_MS, 100), 8);
        assert_eq!(next_step(ROTATION_STEPS_SECS, 7), 5);
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<&str> = SETTINGS_ITEMS.iter().map(SettingsItem::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), SETTINGS_ITEMS.len());
    }
}
