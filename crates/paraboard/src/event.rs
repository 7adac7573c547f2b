//! Terminal events mapped to application input.
//!
//! Keys are named with the browser `KeyboardEvent.key` vocabulary (`"a"`,
//! `"5"`, `" "`, `"Enter"`, `"ArrowLeft"`, `"F3"`, ...) because that is what
//! the persisted settings store.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use paraboard_core::KeySignal;

/// Input the application reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A key went down (press or autorepeat) or up.
    Key(KeySignal),
    /// `Ctrl+C`.
    Quit,
    /// `Ctrl+Z`.
    Suspend,
    /// `F2`.
    ToggleSettings,
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
}

impl Input {
    /// Map a crossterm event, or `None` for events the keyboard ignores.
    pub fn from_event(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) => Self::from_key(key),
            Event::Resize(w, h) => Some(Input::Resize(w, h)),
            _ => None,
        }
    }

    /// Map a key event. Release events only exist when the terminal
    /// reports event types.
    pub fn from_key(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return key_name(event.code).map(|name| Input::Key(KeySignal::Up(name)));
        }
        if let Some(shortcut) = shortcut(&event) {
            // Holding a shortcut must not fire it again.
            return (event.kind == KeyEventKind::Press).then_some(shortcut);
        }
        key_name(event.code).map(|name| Input::Key(KeySignal::Down(name)))
    }
}

fn shortcut(event: &KeyEvent) -> Option<Input> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        match event.code {
            KeyCode::Char('c') | KeyCode::Char('C') => return Some(Input::Quit),
            KeyCode::Char('z') | KeyCode::Char('Z') => return Some(Input::Suspend),
            _ => {}
        }
    }
    (event.code == KeyCode::F(2)).then_some(Input::ToggleSettings)
}

/// Name of a key code, or `None` for keys that cannot be bound.
pub fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(c) => return Some(c.to_string()),
        KeyCode::Enter => "Enter",
        KeyCode::Backspace => "Backspace",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::Esc => "Escape",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::F(n) => return Some(format!("F{n}")),
        _ => return None,
    };
    Some(name.to_string())
}
