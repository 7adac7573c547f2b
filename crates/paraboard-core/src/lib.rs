//! Core state machine for **paraboard**, an on-screen keyboard driven by a
//! handful of switch inputs.
//!
//! A cursor sweeps across an alphabet strip. A few mapped keys move the
//! cursor, pick the highlighted character, insert a space or a newline,
//! delete the last character, or clear the composed text. Everything that
//! decides *what happens* lives in this crate; drawing and terminal I/O live
//! in `paraboard-widgets` and `paraboard`.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Settings`] | Key-binding table plus the alphabet |
//! | [`Model`] | Cursor position, composed text, and settings |
//! | [`Message`] | Closed set of state transitions |
//! | [`reduce`] | Pure `(model, message) -> (model, effects)` function |
//! | [`Store`] | Owns the model, dispatches messages, notifies subscribers |
//! | [`KeyTranslator`] | Maps key identifiers to messages using the live settings |
//! | [`KeyRepeatThrottle`] | Rate-limits held keys |
//! | [`SettingsStore`] | Loads and saves settings as JSON |
//!
//! # Data flow
//!
//! 1. A physical key-down passes through the [`KeyRepeatThrottle`].
//! 2. Accepted keys are translated by the [`KeyTranslator`] against the
//!    settings current at that moment.
//! 3. The resulting [`Message`] goes to [`Store::dispatch`], which runs
//!    [`reduce`], replaces the model and notifies every subscriber.
//! 4. Subscribers re-derive what they show (and [`SettingsPersister`] saves
//!    the settings when they changed).
//!
//! # Example
//!
//! ```
//! use paraboard_core::{Direction, Message, Model, Settings, Store};
//!
//! let mut store = Store::new(Model::new(Settings::default()));
//! store.dispatch(Message::Pick);
//! store.dispatch(Message::Move(Direction::Right));
//! store.dispatch(Message::Pick);
//! assert_eq!(store.state().text, "QR");
//! ```

pub mod command;
pub mod message;
pub mod model;
pub mod persist;
pub mod reducer;
pub mod settings;
pub mod store;
pub mod throttle;
pub mod translator;

pub use command::Command;
pub use message::{Direction, KeyChange, Message};
pub use model::{wrap, Model, INITIAL_CURSOR};
pub use persist::{
    JsonFileStore, MemoryStore, PersistError, SettingsPersister, SettingsStore, SETTINGS_KEY,
};
pub use reducer::{reduce, Transition};
pub use settings::{SettingKey, Settings, SettingsError, DEFAULT_ALPHABET};
pub use store::{Reducer, Store, SubscriberId};
pub use throttle::{throttle, KeyRepeatThrottle, KeySignal, DEFAULT_KEY_DELAY};
pub use translator::{KeyTranslator, Translation, PRIORITY};
