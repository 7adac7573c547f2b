//! Widgets that draw **paraboard** state with [`ratatui`].
//!
//! They hold no state of their own beyond presentation details. Each one is
//! built from the current [`paraboard_core::Model`] (or its settings) on
//! every frame.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`alphabet_strip`] | The alphabet spread over the full width, with the cursor marker |
//! | [`legend`] | One-line legend of the current key bindings |
//! | [`settings_dialog`] | Overlay for rebinding keys and editing the alphabet |
//! | [`text_panel`] | The composed text, scrolled to its last row |

pub mod alphabet_strip;
pub mod legend;
pub mod settings_dialog;
pub mod text_panel;

pub use alphabet_strip::{marker_offset, AlphabetStrip};
pub use legend::{display_key, Legend};
pub use settings_dialog::{DialogEvent, DialogMode, SettingsDialog};
pub use text_panel::{wrap_rows, TextPanel};
