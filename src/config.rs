//! User configuration: key bindings, engine tunables and persistence.
//!
//! Stored as a simple `key = value` text file at
//! `$XDG_CONFIG_HOME/catalog-strips/config.toml`
//! (default `~/.config/catalog-strips/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::drag::DRAG_SENSITIVITY;
use crate::core::responsive::PAGING_BREAKPOINT;

// ───────────────────────────────────────── actions ───────────

/// Keyboard-driven actions on the strip list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    PageBackward,
    PageForward,
    FocusPrev,
    FocusNext,
    Reload,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::PageBackward,
        Action::PageForward,
        Action::FocusPrev,
        Action::FocusNext,
        Action::Reload,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::PageBackward => "page_backward",
            Action::PageForward => "page_forward",
            Action::FocusPrev => "focus_prev",
            Action::FocusNext => "focus_next",
            Action::Reload => "reload",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Config-file form, e.g. `"Ctrl+r"`, `"Left"`, `"h"`.
    pub fn to_config_string(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        });
        s
    }

    /// Parse `"Ctrl+c"`, `"Shift+Left"`, `"q"`, `"PageDown"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => KeyCode::F(s[1..].parse().ok()?),
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Pointer travel multiplier for drag scrolling.
    pub drag_sensitivity: f64,
    /// Minimum viewport width (px) that shows paging buttons.
    pub paging_breakpoint: f64,
    /// Pixels represented by one terminal column.
    pub cell_width: f64,
    /// Smooth-scroll damping per tick.
    pub scroll_speed: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            drag_sensitivity: DRAG_SENSITIVITY,
            paging_breakpoint: PAGING_BREAKPOINT,
            cell_width: 8.0,
            scroll_speed: 0.35,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(PageBackward, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(PageForward, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(FocusPrev, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(FocusNext, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Reload, vec![KeyBind::new(Char('r'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// The action bound to `event`; the binding with more modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, bind)| bind.matches(event))
            .max_by_key(|(_, bind)| bind.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].to_config_string(),
            _ => "?".into(),
        }
    }

    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: page | {}/{}: strip | drag: scroll | {}: reload | {}: quit",
            self.short_binding(Action::PageBackward),
            self.short_binding(Action::PageForward),
            self.short_binding(Action::FocusPrev),
            self.short_binding(Action::FocusNext),
            self.short_binding(Action::Reload),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk.  A missing file is seeded with the defaults so
    /// there is something to edit; any other read error falls back silently.
    pub fn load() -> Self {
        match std::fs::read_to_string(config_path()) {
            Ok(contents) => Self::parse_config(&contents),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                if let Err(err) = config.save() {
                    tracing::warn!(%err, "could not write default config");
                }
                config
            }
            Err(err) => {
                tracing::warn!(%err, "could not read config; using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            let number = || value.parse::<f64>().ok().filter(|v| v.is_finite());
            match key {
                "drag_sensitivity" => {
                    if let Some(v) = number() {
                        config.drag_sensitivity = v.clamp(0.5, 8.0);
                    }
                    continue;
                }
                "paging_breakpoint" => {
                    if let Some(v) = number() {
                        config.paging_breakpoint = v.max(0.0);
                    }
                    continue;
                }
                "cell_width" => {
                    if let Some(v) = number() {
                        config.cell_width = v.clamp(4.0, 32.0);
                    }
                    continue;
                }
                "scroll_speed" => {
                    if let Some(v) = number() {
                        config.scroll_speed = v.clamp(0.05, 0.95);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# catalog-strips configuration".to_string(),
            String::new(),
            "# Engine".to_string(),
            format!("drag_sensitivity = {}", self.drag_sensitivity),
            format!("paging_breakpoint = {}", self.paging_breakpoint),
            format!("cell_width = {}", self.cell_width),
            format!("scroll_speed = {}", self.scroll_speed),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(KeyBind::to_config_string).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("catalog-strips").join("config.toml")
}
