//! Key names as they appear in `config.toml`.
//!
//! A key is written as optional modifiers and a key name joined by `+`:
//! `q`, `Esc`, `ctrl+s`, `shift+Tab`, `F2`. Names are case-insensitive except
//! for single characters, where `G` and `g` are different keys.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Named keys. The first name of a code is the one shown to the user.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Space", KeyCode::Char(' ')),
    ("Enter", KeyCode::Enter),
    ("Return", KeyCode::Enter),
    ("Esc", KeyCode::Esc),
    ("Escape", KeyCode::Esc),
    ("Tab", KeyCode::Tab),
    ("BackTab", KeyCode::BackTab),
    ("Backspace", KeyCode::Backspace),
    ("Delete", KeyCode::Delete),
    ("Del", KeyCode::Delete),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PgUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("PgDn", KeyCode::PageDown),
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
];

/// Modifier prefixes, in display order.
const MODIFIER_NAMES: &[(&str, KeyModifiers)] = &[
    ("ctrl", KeyModifiers::CONTROL),
    ("control", KeyModifiers::CONTROL),
    ("alt", KeyModifiers::ALT),
    ("shift", KeyModifiers::SHIFT),
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub const fn with_ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        match (self.code, event.code) {
            // Terminals disagree on whether letters and BackTab carry SHIFT.
            (KeyCode::Char(_), KeyCode::Char(_)) | (KeyCode::BackTab, KeyCode::BackTab) => {
                self.code == event.code
                    && without_shift(self.modifiers) == without_shift(event.modifiers)
            }
            _ => self.code == event.code && self.modifiers == event.modifiers,
        }
    }

    pub fn display(&self) -> String {
        let mut shown = KeyModifiers::NONE;
        let mut parts: Vec<String> = Vec::new();
        for (name, modifier) in MODIFIER_NAMES {
            if self.modifiers.contains(*modifier) && !shown.contains(*modifier) {
                shown |= *modifier;
                parts.push((*name).to_string());
            }
        }
        parts.push(code_name(self.code));
        parts.join("+")
    }
}

fn code_name(code: KeyCode) -> String {
    if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, named)| *named == code) {
        return (*name).to_string();
    }
    match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F{n}"),
        _ => "?".to_string(),
    }
}

fn parse_code(name: &str) -> Result<KeyCode, String> {
    if let Some((_, code)) = NAMED_KEYS
        .iter()
        .find(|(named, _)| named.eq_ignore_ascii_case(name))
    {
        return Ok(*code);
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(KeyCode::Char(c)),
        (Some('f' | 'F'), Some(_)) => name[1..]
            .parse()
            .map(KeyCode::F)
            .map_err(|_| format!("Invalid function key: {name}")),
        _ => Err(format!("Unknown key: {name}")),
    }
}

const fn without_shift(modifiers: KeyModifiers) -> KeyModifiers {
    modifiers.difference(KeyModifiers::SHIFT)
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // The last segment is the key; "+" itself is a valid key name.
        let (prefix, key_name) = match s.rsplit_once('+') {
            Some((rest, "")) => (rest.strip_suffix('+').unwrap_or(rest), "+"),
            Some((rest, key)) => (rest, key),
            None => ("", s),
        };

        let modifiers = prefix
            .split('+')
            .filter(|part| !part.is_empty())
            .try_fold(KeyModifiers::NONE, |acc, part| {
                MODIFIER_NAMES
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(part))
                    .map(|(_, modifier)| acc | *modifier)
                    .ok_or_else(|| format!("Unknown modifier: {part}"))
            })?;

        Ok(Self {
            code: parse_code(key_name)?,
            modifiers,
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.display())
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// One or more keys bound to the same action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyBinding {
    Single(Key),
    Multiple(Vec<Key>),
}

impl KeyBinding {
    pub const fn single(key: Key) -> Self {
        Self::Single(key)
    }

    pub const fn multiple(keys: Vec<Key>) -> Self {
        Self::Multiple(keys)
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        match self {
            Self::Single(key) => key.matches(event),
            Self::Multiple(keys) => keys.iter().any(|k| k.matches(event)),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Single(key) => key.display(),
            Self::Multiple(keys) => keys.iter().map(Key::display).collect::<Vec<_>>().join("/"),
        }
    }
}

impl From<Key> for KeyBinding {
    fn from(key: Key) -> Self {
        Self::Single(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        assert_eq!(Key::from_str("q").unwrap(), Key::new(KeyCode::Char('q')));
        assert_eq!(Key::from_str("Enter").unwrap(), Key::new(KeyCode::Enter));
        assert_eq!(Key::from_str("Esc").unwrap(), Key::new(KeyCode::Esc));
        assert_eq!(Key::from_str("Space").unwrap(), Key::new(KeyCode::Char(' ')));
        assert_eq!(
            Key::from_str("ctrl+s").unwrap(),
            Key::with_ctrl(KeyCode::Char('s'))
        );
        assert_eq!(Key::from_str("F1").unwrap(), Key::new(KeyCode::F(1)));
        assert_eq!(Key::from_str("W").unwrap(), Key::new(KeyCode::Char('W')));
        assert_eq!(Key::from_str("+").unwrap(), Key::new(KeyCode::Char('+')));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(Key::from_str("hyper+q").is_err());
        assert!(Key::from_str("nope").is_err());
        assert!(Key::from_str("Fx").is_err());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::new(KeyCode::Char('q')).display(), "q");
        assert_eq!(Key::new(KeyCode::Tab).display(), "Tab");
        assert_eq!(Key::with_ctrl(KeyCode::Char('s')).display(), "ctrl+s");
        assert_eq!(
            KeyBinding::multiple(vec![Key::new(KeyCode::Tab), Key::new(KeyCode::Down)]).display(),
            "Tab/Down"
        );
    }

    #[test]
    fn test_key_matches() {
        let key = Key::new(KeyCode::Char('p'));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('P'), KeyModifiers::SHIFT)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_names_round_trip_through_display() {
        for name in ["Esc", "Space", "shift+Tab", "ctrl+alt+Delete", "F12", "G"] {
            assert_eq!(Key::from_str(name).unwrap().display(), name);
        }
        assert_eq!(Key::from_str("control+return").unwrap().display(), "ctrl+Enter");
    }

    #[test]
    fn test_backtab_ignores_shift() {
        let key = Key::new(KeyCode::BackTab);
        assert!(key.matches(&KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)));
        assert!(key.matches(&KeyEvent::new(KeyCode::BackTab, KeyModifiers::NONE)));
    }
}
