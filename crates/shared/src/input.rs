//! Keyboard input model shared by the GUI, the CLI runner and the grid state
//! machine.
//!
//! Keys also have a textual form, `[modifier+]*name`, used by the headless
//! runner and by tests: `space`, `x`, `shift+ArrowDown`, `ctrl+a`, `cmd+A`.

use std::{fmt, str::FromStr};

use crate::error::GridError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
    Char(char),
    Other(String),
}

impl Key {
    fn parse_name(name: &str) -> Key {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return if ch == ' ' { Key::Space } else { Key::Char(ch) };
        }

        match name.to_ascii_lowercase().as_str() {
            "arrowup" | "up" => Key::ArrowUp,
            "arrowdown" | "down" => Key::ArrowDown,
            "arrowleft" | "left" => Key::ArrowLeft,
            "arrowright" | "right" => Key::ArrowRight,
            "space" | "spacebar" => Key::Space,
            "escape" | "esc" => Key::Escape,
            _ => Key::Other(name.to_string()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::ArrowUp => f.write_str("ArrowUp"),
            Key::ArrowDown => f.write_str("ArrowDown"),
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::Space => f.write_str("space"),
            Key::Escape => f.write_str("Escape"),
            Key::Char(ch) => write!(f, "{ch}"),
            Key::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        meta: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        meta: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        meta: false,
    };
    pub const META: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        meta: true,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn shifted(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::SHIFT)
    }
}

impl FromStr for KeyInput {
    type Err = GridError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.is_empty() {
            return Err(GridError::EmptyKey);
        }

        // A trailing "++" names the plus key itself.
        let (prefix, name) = match token.strip_suffix("++") {
            Some(prefix) => (prefix, "+"),
            None => match token.rsplit_once('+') {
                Some((prefix, name)) if !name.is_empty() => (prefix, name),
                _ => ("", token),
            },
        };

        let mut modifiers = Modifiers::NONE;
        for modifier in prefix.split('+').filter(|part| !part.is_empty()) {
            match modifier.to_ascii_lowercase().as_str() {
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "meta" | "cmd" | "command" | "super" => modifiers.meta = true,
                _ => {
                    return Err(GridError::UnknownModifier {
                        modifier: modifier.to_string(),
                        token: token.to_string(),
                    })
                }
            }
        }

        Ok(Self::with_modifiers(Key::parse_name(name), modifiers))
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.meta {
            f.write_str("meta+")?;
        }
        if self.modifiers.shift {
            f.write_str("shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Parses a comma- or whitespace-separated list of key tokens.
pub fn parse_key_sequence(raw: &str) -> Result<Vec<KeyInput>, GridError> {
    raw.split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
