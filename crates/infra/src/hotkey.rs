//! Pause hotkey chords
//!
//! Chords are written as `+`-separated names, modifiers first:
//! `ctrl+shift+p`, `alt+f9`, `cmd+option+space`. Parsing normalizes aliases so
//! a key listener can compare against lowercase key names.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing a hotkey chord
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HotkeyError {
    #[error("hotkey is empty")]
    Empty,

    #[error("hotkey '{0}' has no non-modifier key")]
    MissingKey(String),

    #[error("hotkey '{chord}' names more than one key ('{first}' and '{second}')")]
    MultipleKeys { chord: String, first: String, second: String },
}

/// Modifier keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Ctrl,
    Shift,
    Alt,
    Meta,
}

impl Modifier {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "ctrl" | "control" | "lcontrol" | "rcontrol" => Some(Self::Ctrl),
            "shift" | "lshift" | "rshift" => Some(Self::Shift),
            "alt" | "option" | "lalt" | "ralt" | "loption" | "roption" => Some(Self::Alt),
            "meta" | "cmd" | "command" | "super" | "win" | "lmeta" | "rmeta" => Some(Self::Meta),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Ctrl => "ctrl",
            Self::Shift => "shift",
            Self::Alt => "alt",
            Self::Meta => "meta",
        }
    }
}

/// A modifier set plus one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    modifiers: BTreeSet<Modifier>,
    key: String,
}

impl Hotkey {
    /// Modifiers that must be held with the key
    pub fn modifiers(&self) -> &BTreeSet<Modifier> {
        &self.modifiers
    }

    /// The non-modifier key, lowercase
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether exactly this chord is held, given the names of pressed keys
    ///
    /// Left/right variants of modifiers (`LShift`, `RControl`) count as the
    /// plain modifier. Extra modifiers make the chord not match.
    pub fn matches<'a>(&self, pressed: impl IntoIterator<Item = &'a str>) -> bool {
        let mut held_modifiers = BTreeSet::new();
        let mut key_held = false;
        for name in pressed {
            let name = name.trim().to_ascii_lowercase();
            match Modifier::from_name(&name) {
                Some(modifier) => {
                    held_modifiers.insert(modifier);
                }
                None => key_held |= name == self.key || name == format!("key{}", self.key),
            }
        }
        key_held && held_modifiers == self.modifiers
    }
}

impl FromStr for Hotkey {
    type Err = HotkeyError;

    fn from_str(chord: &str) -> Result<Self, Self::Err> {
        if chord.trim().is_empty() {
            return Err(HotkeyError::Empty);
        }

        let mut modifiers = BTreeSet::new();
        let mut key: Option<String> = None;
        for part in chord.split('+').map(|p| p.trim().to_ascii_lowercase()) {
            if part.is_empty() {
                continue;
            }
            if let Some(modifier) = Modifier::from_name(&part) {
                modifiers.insert(modifier);
                continue;
            }
            if let Some(first) = &key {
                return Err(HotkeyError::MultipleKeys {
                    chord: chord.to_string(),
                    first: first.clone(),
                    second: part,
                });
            }
            key = Some(part);
        }

        let key = key.ok_or_else(|| HotkeyError::MissingKey(chord.to_string()))?;
        Ok(Self { modifiers, key })
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier.as_str())?;
        }
        f.write_str(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_chord() {
        let hotkey: Hotkey = "ctrl+shift+p".parse().unwrap();

        assert_eq!(hotkey.key(), "p");
        assert_eq!(hotkey.modifiers(), &BTreeSet::from([Modifier::Ctrl, Modifier::Shift]));
        assert_eq!(hotkey.to_string(), "ctrl+shift+p");
    }

    #[test]
    fn test_aliases_normalize() {
        let hotkey: Hotkey = " Control + Option + F9 ".parse().unwrap();
        assert_eq!(hotkey.to_string(), "ctrl+alt+f9");

        let hotkey: Hotkey = "cmd+space".parse().unwrap();
        assert_eq!(hotkey.to_string(), "meta+space");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Hotkey>(), Err(HotkeyError::Empty));
        assert!(matches!("ctrl+shift".parse::<Hotkey>(), Err(HotkeyError::MissingKey(_))));
        assert!(matches!("ctrl+a+b".parse::<Hotkey>(), Err(HotkeyError::MultipleKeys { .. })));
    }

    #[test]
    fn test_matches_pressed_keys() {
        let hotkey: Hotkey = "ctrl+shift+p".parse().unwrap();

        assert!(hotkey.matches(["LControl", "RShift", "P"]));
        assert!(hotkey.matches(["ctrl", "shift", "KeyP"]));
        assert!(!hotkey.matches(["LControl", "P"]));
        assert!(!hotkey.matches(["LControl", "LShift", "LAlt", "P"]));
        assert!(!hotkey.matches(["LControl", "LShift", "O"]));
    }
}
