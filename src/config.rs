//! User configuration: keybindings, feed timing and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/vault-feed/config.toml` (default
//! `~/.config/vault-feed/config.toml`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the feed view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Activate,
    ToggleLike,
    OpenSearch,
    HardRefresh,
    OpenOffline,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the config file).
    pub const ALL: &[Action] = &[
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::Activate,
        Action::ToggleLike,
        Action::OpenSearch,
        Action::HardRefresh,
        Action::OpenOffline,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::MoveUp => "Previous Row",
            Action::MoveDown => "Next Row",
            Action::MoveLeft => "Left",
            Action::MoveRight => "Right",
            Action::Activate => "Play / Select",
            Action::ToggleLike => "Like",
            Action::OpenSearch => "Search",
            Action::HardRefresh => "Refresh",
            Action::OpenOffline => "Offline Vault",
            Action::OpenSettings => "Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::Activate => "activate",
            Action::ToggleLike => "toggle_like",
            Action::OpenSearch => "open_search",
            Action::HardRefresh => "hard_refresh",
            Action::OpenOffline => "open_offline",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Named keys accepted in the config file.  The first spelling of each key
/// is the one written back.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("Enter", KeyCode::Enter),
    ("Return", KeyCode::Enter),
    ("Esc", KeyCode::Esc),
    ("Escape", KeyCode::Esc),
    ("Tab", KeyCode::Tab),
    ("Backspace", KeyCode::Backspace),
    ("Delete", KeyCode::Delete),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("Space", KeyCode::Char(' ')),
];

const MODIFIER_NAMES: &[(&str, KeyModifiers)] = &[
    ("Ctrl", KeyModifiers::CONTROL),
    ("Alt", KeyModifiers::ALT),
    ("Shift", KeyModifiers::SHIFT),
];

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only Ctrl, Alt and Shift take part in matching.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = MODIFIER_NAMES
            .iter()
            .fold(KeyModifiers::NONE, |acc, &(_, m)| acc | m);
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    fn with_prefix(&self, key: &str) -> String {
        MODIFIER_NAMES
            .iter()
            .filter(|(_, m)| self.modifiers.contains(*m))
            .map(|(name, _)| format!("{name}+"))
            .chain(std::iter::once(key.to_string()))
            .collect()
    }

    /// Status-bar form: arrows as glyphs, everything else by name.
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            _ => self.key_name(),
        };
        self.with_prefix(&key)
    }

    fn to_config_string(&self) -> String {
        self.with_prefix(&self.key_name())
    }

    fn key_name(&self) -> String {
        if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, code)| *code == self.code) {
            return name.to_string();
        }
        match self.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse `"q"`, `"Enter"`, `"Ctrl+c"`, `"Alt+Shift+F5"`.
    fn parse(s: &str) -> Option<Self> {
        let (prefixes, key) = match s.rsplit_once('+') {
            // A lone "+" is the plus key itself.
            Some((head, "")) if head.is_empty() => ("", "+"),
            Some((head, key)) => (head, key),
            None => ("", s),
        };

        let mut modifiers = KeyModifiers::NONE;
        for name in prefixes.split('+').filter(|p| !p.is_empty()) {
            let (_, m) = MODIFIER_NAMES
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))?;
            modifiers |= *m;
        }

        let code = if let Some((_, code)) = NAMED_KEYS.iter().find(|(n, _)| n.eq_ignore_ascii_case(key)) {
            *code
        } else if let Some(n) = key
            .strip_prefix(['f', 'F'])
            .filter(|rest| !rest.is_empty())
            .and_then(|rest| rest.parse::<u8>().ok())
        {
            KeyCode::F(n)
        } else {
            // Single characters keep their case (`?`, `/`, `Q`).
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

pub const DEFAULT_FRAME_MS: u64 = 33;
pub const DEFAULT_ROTATION_SECS: u64 = 15;

/// Application configuration: keybindings and feed settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Frame interval driving marquee motion.
    pub frame_ms: u64,
    /// How often the featured windows rotate.
    pub rotation_secs: u64,
    /// Whether visible grid cards show their preview as playing.
    pub autoplay_previews: bool,
    /// External player command line; the video URL is appended.  Empty
    /// means "don't launch anything".
    pub player: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            frame_ms: DEFAULT_FRAME_MS,
            rotation_secs: DEFAULT_ROTATION_SECS,
            autoplay_previews: true,
            player: String::new(),
        }
    }
}

impl AppConfig {
    /// Hard-coded default bindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(MoveUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(MoveDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(MoveLeft, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(MoveRight, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(Activate, vec![KeyBind::new(Enter, n)]);
        m.insert(ToggleLike, vec![KeyBind::new(Char('f'), n)]);
        m.insert(OpenSearch, vec![KeyBind::new(Char('/'), n)]);
        m.insert(HardRefresh, vec![KeyBind::new(Char('r'), n)]);
        m.insert(OpenOffline, vec![KeyBind::new(Char('o'), n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Format the binding list for a given action (e.g. `"↑/k"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}: rows | {}: play | {}: like | {}: search | {}: refresh | {}: settings",
            self.short_binding(Action::MoveUp),
            self.short_binding(Action::Activate),
            self.short_binding(Action::ToggleLike),
            self.short_binding(Action::OpenSearch),
            self.short_binding(Action::HardRefresh),
            self.short_binding(Action::OpenSettings),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();
        let entries = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with(['#', '[']))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim(), value.trim()));

        for (key, value) in entries {
            if config.apply_setting(key, value) {
                continue;
            }
            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!(key, "ignoring unknown config key");
                continue;
            };
            let binds: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !binds.is_empty() {
                config.bindings.insert(action, binds);
            }
        }
        config
    }

    /// Apply a feed setting line; `false` when `key` is not a setting.
    /// Unparseable values leave the default in place.
    fn apply_setting(&mut self, key: &str, value: &str) -> bool {
        match key {
            "frame_ms" => {
                if let Ok(ms) = value.parse::<u64>() {
                    self.frame_ms = ms.clamp(8, 200);
                }
            }
            "rotation_secs" => {
                if let Ok(secs) = value.parse::<u64>() {
                    self.rotation_secs = secs.clamp(1, 3600);
                }
            }
            "autoplay_previews" => self.autoplay_previews = value == "true",
            "player" => self.player = value.trim_matches('"').to_string(),
            _ => return false,
        }
        true
    }

    fn serialise(&self) -> String {
        let mut out = format!(
            "# vault-feed configuration\n\
             \n\
             # Feed settings\n\
             frame_ms = {}\n\
             rotation_secs = {}\n\
             autoplay_previews = {}\n\
             player = \"{}\"\n\
             \n\
             # Key bindings: action = Key1, Key2, ...\n\
             # Modifiers are prefixes (Ctrl+, Alt+, Shift+).  Named keys: Up, Down,\n\
             # Left, Right, Enter, Esc, Tab, Backspace, Delete, Home, End, PageUp,\n\
             # PageDown, Space, F1-F12.\n\
             \n",
            self.frame_ms, self.rotation_secs, self.autoplay_previews, self.player,
        );
        for &action in Action::ALL {
            let Some(binds) = self.bindings.get(&action) else {
                continue;
            };
            let keys: Vec<String> = binds.iter().map(KeyBind::to_config_string).collect();
            out.push_str(&format!("{} = {}\n", action.config_key(), keys.join(", ")));
        }
        out
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/vault-feed/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("vault-feed").join("config.toml")
}
