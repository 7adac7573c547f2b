//! Maps physical key identifiers to [`Message`]s.

use crate::message::{Direction, Message};
use crate::settings::{SettingKey, Settings};

/// Order in which bindings are compared against a key. When two bindings
/// share a key the earlier one wins.
pub const PRIORITY: [SettingKey; 7] = [
    SettingKey::Pick,
    SettingKey::Space,
    SettingKey::Left,
    SettingKey::Right,
    SettingKey::Backspace,
    SettingKey::Clear,
    SettingKey::NewLine,
];

/// Outcome of translating one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// The key is bound. The caller should swallow the event.
    Handled(Message),
    /// No binding matches. The event is left alone.
    Unhandled,
}

impl Translation {
    /// The message, if any.
    pub fn into_message(self) -> Option<Message> {
        match self {
            Translation::Handled(msg) => Some(msg),
            Translation::Unhandled => None,
        }
    }

    /// Returns `true` when a binding matched.
    pub fn is_handled(&self) -> bool {
        matches!(self, Translation::Handled(_))
    }
}

/// Stateless key-to-message mapping.
///
/// The translator holds no copy of the bindings. Every call takes the
/// settings current at that moment, so a rebind applies to the very next
/// key and never reclassifies one that was already translated.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyTranslator;

impl KeyTranslator {
    pub fn new() -> Self {
        Self
    }

    /// Translate `key` against `settings`.
    pub fn translate(&self, settings: &Settings, key: &str) -> Translation {
        PRIORITY
            .into_iter()
            .find(|binding| settings.get(*binding) == key)
            .and_then(message_for)
            .map(Translation::Handled)
            .unwrap_or(Translation::Unhandled)
    }
}

fn message_for(binding: SettingKey) -> Option<Message> {
    match binding {
        SettingKey::Pick => Some(Message::Pick),
        SettingKey::Space => Some(Message::Space),
        SettingKey::Left => Some(Message::Move(Direction::Left)),
        SettingKey::Right => Some(Message::Move(Direction::Right)),
        SettingKey::Backspace => Some(Message::Backspace),
        SettingKey::Clear => Some(Message::Clear),
        SettingKey::NewLine => Some(Message::NewLine),
        SettingKey::Alphabet => None,
    }
}
