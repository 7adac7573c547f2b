//! **paraboard** -- a switch-access on-screen keyboard for the terminal.
//!
//! A cursor sweeps across an alphabet strip. A handful of keys (by default
//! the digits of a numeric keypad) move it, pick the highlighted character,
//! and edit the composed text. Everything can be rebound from the settings
//! dialog (`F2`) and is saved as JSON between sessions.
//!
//! This crate is the terminal front end. It wires the state machine from
//! [`paraboard_core`] and the widgets from [`paraboard_widgets`] to a real
//! terminal through [`ratatui`] and [`crossterm`].
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`app`] | Store, throttle, translator, dialog, and the screen layout |
//! | [`event`] | Crossterm events to key names |
//! | [`runtime`] | Terminal setup, event loop, suspend, teardown |
//! | [`config`] | Command-line arguments |
//! | [`logging`] | Optional file logging |
//! | [`testing`] | Headless harness with a virtual clock |
//!
//! # Quick start
//!
//! ```ignore
//! use paraboard::{App, JsonFileStore, Program, ProgramOptions, DEFAULT_KEY_DELAY};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), paraboard::ProgramError> {
//!     let app = App::new(JsonFileStore::new("settings.json"), DEFAULT_KEY_DELAY);
//!     let app = Program::new(app, ProgramOptions::default())?.run().await?;
//!     println!("{}", app.model().text);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod event;
pub mod logging;
pub mod runtime;
pub mod testing;

pub use app::{App, Control};
pub use event::{key_name, Input};
pub use paraboard_core::*;
pub use runtime::{Program, ProgramError, ProgramOptions};

pub mod widgets {
    pub use paraboard_widgets::*;
}
