//! Key-binding table and alphabet.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The alphabet shown when nothing usable has been persisted.
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVXYZÆØÅ";

/// Errors raised when a settings value would break an invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// The alphabet must contain at least one character.
    #[error("alphabet must contain at least one character")]
    EmptyAlphabet,
    /// A binding must name a key.
    #[error("binding `{0}` must name a key")]
    EmptyBinding(SettingKey),
    /// The name does not match any setting.
    #[error("unknown setting `{0}`")]
    UnknownKey(String),
}

/// Names of the fields in [`Settings`].
///
/// The seven bindings plus the alphabet. The string forms match the field
/// names of the persisted JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// The characters the cursor sweeps across.
    Alphabet,
    /// Move the cursor one step left.
    Left,
    /// Move the cursor one step right.
    Right,
    /// Append the highlighted character.
    Pick,
    /// Append a space.
    Space,
    /// Remove the last character.
    Backspace,
    /// Remove all text.
    Clear,
    /// Append a newline.
    NewLine,
}

impl SettingKey {
    /// All settings in the order the settings dialog lists them.
    pub const ALL: [SettingKey; 8] = [
        SettingKey::Alphabet,
        SettingKey::Left,
        SettingKey::Right,
        SettingKey::Pick,
        SettingKey::Space,
        SettingKey::Backspace,
        SettingKey::NewLine,
        SettingKey::Clear,
    ];

    /// The seven key bindings, without the alphabet.
    pub const BINDINGS: [SettingKey; 7] = [
        SettingKey::Left,
        SettingKey::Right,
        SettingKey::Pick,
        SettingKey::Space,
        SettingKey::Backspace,
        SettingKey::NewLine,
        SettingKey::Clear,
    ];

    /// The persisted field name.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::Alphabet => "alphabet",
            SettingKey::Left => "left",
            SettingKey::Right => "right",
            SettingKey::Pick => "pick",
            SettingKey::Space => "space",
            SettingKey::Backspace => "backspace",
            SettingKey::Clear => "clear",
            SettingKey::NewLine => "newLine",
        }
    }

    /// A short human-readable label for legends and the settings dialog.
    pub fn label(self) -> &'static str {
        match self {
            SettingKey::Alphabet => "Alphabet",
            SettingKey::Left => "Left",
            SettingKey::Right => "Right",
            SettingKey::Pick => "Pick",
            SettingKey::Space => "Space",
            SettingKey::Backspace => "Backspace",
            SettingKey::Clear => "Clear",
            SettingKey::NewLine => "New line",
        }
    }

    /// Returns `true` for the seven key bindings.
    pub fn is_binding(self) -> bool {
        self != SettingKey::Alphabet
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| SettingsError::UnknownKey(s.to_string()))
    }
}

/// The key-binding table and the alphabet.
///
/// Each binding holds one physical key identifier in the browser
/// `KeyboardEvent.key` vocabulary (`"5"`, `"Enter"`, `"ArrowLeft"`, ...).
/// Bindings may collide; the translator resolves collisions by a fixed
/// priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub alphabet: String,
    pub left: String,
    pub right: String,
    pub pick: String,
    pub space: String,
    pub backspace: String,
    pub clear: String,
    pub new_line: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            left: "4".to_string(),
            right: "6".to_string(),
            pick: "5".to_string(),
            new_line: "2".to_string(),
            space: "3".to_string(),
            backspace: "1".to_string(),
            clear: "0".to_string(),
        }
    }
}

impl Settings {
    /// Read one field by name.
    pub fn get(&self, key: SettingKey) -> &str {
        match key {
            SettingKey::Alphabet => &self.alphabet,
            SettingKey::Left => &self.left,
            SettingKey::Right => &self.right,
            SettingKey::Pick => &self.pick,
            SettingKey::Space => &self.space,
            SettingKey::Backspace => &self.backspace,
            SettingKey::Clear => &self.clear,
            SettingKey::NewLine => &self.new_line,
        }
    }

    /// Return a copy with one field replaced.
    ///
    /// No validation happens here; values reach this point through
    /// [`KeyChange`](crate::KeyChange), which checks them on construction.
    pub fn with(&self, key: SettingKey, value: impl Into<String>) -> Settings {
        let mut next = self.clone();
        let value = value.into();
        match key {
            SettingKey::Alphabet => next.alphabet = value,
            SettingKey::Left => next.left = value,
            SettingKey::Right => next.right = value,
            SettingKey::Pick => next.pick = value,
            SettingKey::Space => next.space = value,
            SettingKey::Backspace => next.backspace = value,
            SettingKey::Clear => next.clear = value,
            SettingKey::NewLine => next.new_line = value,
        }
        next
    }

    /// Number of characters in the alphabet.
    pub fn alphabet_len(&self) -> usize {
        self.alphabet.chars().count()
    }

    /// The alphabet character at `index`, if any.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.alphabet.chars().nth(index)
    }

    /// Check a single value against the invariants for `key`.
    pub fn validate_value(key: SettingKey, value: &str) -> Result<(), SettingsError> {
        if !value.is_empty() {
            return Ok(());
        }
        match key {
            SettingKey::Alphabet => Err(SettingsError::EmptyAlphabet),
            binding => Err(SettingsError::EmptyBinding(binding)),
        }
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        SettingKey::ALL
            .into_iter()
            .try_for_each(|key| Settings::validate_value(key, self.get(key)))
    }
}
