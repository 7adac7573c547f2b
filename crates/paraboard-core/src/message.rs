use crate::settings::{SettingKey, Settings, SettingsError};

/// Direction of a cursor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// One step towards the start of the alphabet.
    Left,
    /// One step towards the end of the alphabet.
    Right,
}

impl Direction {
    /// The signed step applied to the cursor position.
    pub fn delta(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// A validated request to change one setting.
///
/// The only way to build one is [`KeyChange::new`], which refuses values that
/// would break the settings invariants (an empty alphabet in particular).
/// The reducer can therefore apply it without checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChange {
    key: SettingKey,
    value: String,
}

impl KeyChange {
    /// Validate `value` for `key`.
    pub fn new(key: SettingKey, value: impl Into<String>) -> Result<Self, SettingsError> {
        let value = value.into();
        Settings::validate_value(key, &value)?;
        Ok(Self { key, value })
    }

    /// The setting being changed.
    pub fn key(&self) -> SettingKey {
        self.key
    }

    /// The new value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Every state transition the keyboard supports.
///
/// Messages are the only way to change a [`Model`](crate::Model).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Step the cursor one position, wrapping at either end.
    Move(Direction),
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
    /// Replace one binding or the alphabet.
    ChangeKey(KeyChange),
}

impl Message {
    /// Shorthand for building a validated [`Message::ChangeKey`].
    pub fn change_key(key: SettingKey, value: impl Into<String>) -> Result<Self, SettingsError> {
        KeyChange::new(key, value).map(Message::ChangeKey)
    }
}
