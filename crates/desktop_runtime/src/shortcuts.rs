//! Keyboard bindings routed through the same reducer entry points as pointer gestures.

use serde::Deserialize;

use crate::{apps::DesktopConfig, reducer::DesktopAction};

/// A key plus modifier set, parsed from strings such as `ctrl+alt+t`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct KeyChord {
    /// Lowercased `KeyboardEvent.key` value.
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_lowercase(),
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Parses `modifier+modifier+key`.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let mut parts: Vec<&str> = raw.split('+').map(str::trim).collect();
        let key = match parts.pop() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(format!("shortcut `{raw}` has no key")),
        };

        let mut chord = Self::new(key);
        for modifier in parts {
            chord = match modifier.to_lowercase().as_str() {
                "ctrl" | "control" => chord.ctrl(),
                "alt" | "option" => chord.alt(),
                "shift" => chord.shift(),
                "meta" | "cmd" | "super" => chord.meta(),
                other => return Err(format!("unknown modifier `{other}` in `{raw}`")),
            };
        }
        Ok(chord)
    }
}

impl TryFrom<String> for KeyChord {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopShortcut {
    /// `Escape`: minimize the focused window.
    MinimizeFocused,
    /// Configured chord: open the default app.
    OpenDefaultApp,
}

/// Matches a pressed chord against the desktop bindings.
pub fn match_shortcut(config: &DesktopConfig, pressed: &KeyChord) -> Option<DesktopShortcut> {
    if pressed == &config.default_app_shortcut {
        return Some(DesktopShortcut::OpenDefaultApp);
    }
    if pressed.key == "escape" && !pressed.ctrl && !pressed.alt && !pressed.meta {
        return Some(DesktopShortcut::MinimizeFocused);
    }
    None
}

impl DesktopShortcut {
    pub fn into_action(self, config: &DesktopConfig) -> DesktopAction {
        match self {
            Self::MinimizeFocused => DesktopAction::MinimizeFocused,
            Self::OpenDefaultApp => DesktopAction::Open {
                app_id: config.default_app.clone(),
                options: Default::default(),
            },
        }
    }
}
