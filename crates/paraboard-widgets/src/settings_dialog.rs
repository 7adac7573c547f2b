//! Settings overlay for rebinding keys and editing the alphabet.
//!
//! The dialog renders as a centered overlay on top of the keyboard and
//! captures all input while it is visible. It never changes settings
//! itself: edits come back as [`DialogEvent::Change`] and the caller turns
//! them into `ChangeKey` messages.
//!
//! Keys are identified the same way bindings are (`"Enter"`, `"ArrowUp"`,
//! `"a"`, ...):
//!
//! | Mode | Key | Effect |
//! |------|-----|--------|
//! | browse | `ArrowUp` / `ArrowDown` / `Tab` | move focus, wrapping |
//! | browse | `Enter` | capture a key for the focused binding, or edit the alphabet |
//! | browse | `Escape` | close |
//! | capture | any key but `Escape` | becomes the focused binding |
//! | edit | printable key / `Backspace` | change the alphabet draft |
//! | edit | `Enter` / `Escape` | stop editing |

use crate::legend::display_key;
use paraboard_core::{SettingKey, Settings};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

/// What the dialog is waiting for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogMode {
    /// Moving between rows.
    #[default]
    Browse,
    /// The next key becomes the focused binding.
    Capture,
    /// Typing into the alphabet.
    EditAlphabet { draft: String },
}

/// Something the caller has to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    /// The user asked to set `key` to `value`. Not yet validated.
    Change { key: SettingKey, value: String },
    /// The dialog was dismissed.
    Closed,
}

/// Style configuration for the dialog.
#[derive(Debug, Clone)]
pub struct DialogStyle {
    pub border: Style,
    pub title: Style,
    pub label: Style,
    pub value: Style,
    pub focused: Style,
    pub hint: Style,
    pub error: Style,
}

impl Default for DialogStyle {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::Cyan),
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),
            focused: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            hint: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
        }
    }
}

/// Rebinding overlay.
///
/// # Example
///
/// ```ignore
/// let mut dialog = SettingsDialog::new();
/// dialog.open();
/// if let Some(DialogEvent::Change { key, value }) = dialog.handle_key("Enter", &settings) {
///     // ...
/// }
/// ```
pub struct SettingsDialog {
    visible: bool,
    focused: usize,
    mode: DialogMode,
    error: Option<String>,
    style: DialogStyle,
    width: u16,
}

impl Default for SettingsDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsDialog {
    pub fn new() -> Self {
        Self {
            visible: false,
            focused: 0,
            mode: DialogMode::Browse,
            error: None,
            style: DialogStyle::default(),
            width: 48,
        }
    }

    pub fn with_style(mut self, style: DialogStyle) -> Self {
        self.style = style;
        self
    }

    /// Fixed width in columns, clamped to the area at render time.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the dialog in browse mode with the first row focused.
    pub fn open(&mut self) {
        self.visible = true;
        self.focused = 0;
        self.mode = DialogMode::Browse;
        self.error = None;
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.mode = DialogMode::Browse;
        self.error = None;
    }

    pub fn toggle(&mut self) {
        if self.visible {
            self.close();
        } else {
            self.open();
        }
    }

    /// The setting on the focused row.
    pub fn focused_key(&self) -> SettingKey {
        SettingKey::ALL[self.focused]
    }

    pub fn mode(&self) -> &DialogMode {
        &self.mode
    }

    /// Show (or clear) an error line, e.g. a rejected change.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Handle one key-down while visible. Returns `None` when hidden.
    pub fn handle_key(&mut self, key: &str, settings: &Settings) -> Option<DialogEvent> {
        if !self.visible {
            return None;
        }
        match std::mem::take(&mut self.mode) {
            DialogMode::Browse => self.browse(key, settings),
            DialogMode::Capture => {
                if key == "Escape" {
                    return None;
                }
                self.error = None;
                Some(DialogEvent::Change {
                    key: self.focused_key(),
                    value: key.to_string(),
                })
            }
            DialogMode::EditAlphabet { mut draft } => match key {
                "Enter" | "Escape" => {
                    self.error = None;
                    None
                }
                "Backspace" => {
                    draft.pop();
                    self.edited(draft)
                }
                printable if printable.chars().count() == 1 => {
                    draft.push_str(printable);
                    self.edited(draft)
                }
                _ => {
                    self.mode = DialogMode::EditAlphabet { draft };
                    None
                }
            },
        }
    }

    fn browse(&mut self, key: &str, settings: &Settings) -> Option<DialogEvent> {
        let rows = SettingKey::ALL.len();
        match key {
            "ArrowUp" => {
                self.focused = if self.focused == 0 {
                    rows - 1
                } else {
                    self.focused - 1
                };
                None
            }
            "ArrowDown" | "Tab" => {
                self.focused = (self.focused + 1) % rows;
                None
            }
            "Enter" => {
                self.error = None;
                self.mode = match self.focused_key() {
                    SettingKey::Alphabet => DialogMode::EditAlphabet {
                        draft: settings.alphabet.clone(),
                    },
                    _ => DialogMode::Capture,
                };
                None
            }
            "Escape" => {
                self.close();
                Some(DialogEvent::Closed)
            }
            _ => None,
        }
    }

    fn edited(&mut self, draft: String) -> Option<DialogEvent> {
        let event = DialogEvent::Change {
            key: SettingKey::Alphabet,
            value: draft.clone(),
        };
        self.mode = DialogMode::EditAlphabet { draft };
        Some(event)
    }

    fn value_for(&self, key: SettingKey, settings: &Settings) -> String {
        let focused = key == self.focused_key();
        match (&self.mode, key) {
            (DialogMode::EditAlphabet { draft }, SettingKey::Alphabet) => format!("{draft}▏"),
            (DialogMode::Capture, _) if focused => "press a key…".to_string(),
            (_, SettingKey::Alphabet) => settings.alphabet.clone(),
            (_, binding) => display_key(settings.get(binding)),
        }
    }

    fn hint(&self) -> &'static str {
        match self.mode {
            DialogMode::Browse => "↑/↓ select • Enter change • Esc close",
            DialogMode::Capture => "press the new key • Esc cancel",
            DialogMode::EditAlphabet { .. } => "type to edit • Enter/Esc done",
        }
    }

    /// Draw the overlay centered in `area`.
    pub fn render(&self, area: Rect, buf: &mut Buffer, settings: &Settings) {
        if !self.visible {
            return;
        }
        // rows + blank + hint + error + borders
        let height = SettingKey::ALL.len() as u16 + 5;
        let overlay = centered_fixed(self.width, height, area);
        Clear.render(overlay, buf);

        let mut lines: Vec<Line> = SettingKey::ALL
            .into_iter()
            .enumerate()
            .map(|(i, key)| {
                let focused = i == self.focused;
                let prefix = if focused { "▸ " } else { "  " };
                let label_style = if focused {
                    self.style.focused
                } else {
                    self.style.label
                };
                Line::from(vec![
                    Span::styled(format!("{prefix}{:<11}", key.label()), label_style),
                    Span::styled(self.value_for(key, settings), self.style.value),
                ])
            })
            .collect();
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(self.hint(), self.style.hint)));
        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(error.clone(), self.style.error)));
        }

        let block = Block::default()
            .title(" Settings ")
            .title_style(self.style.title)
            .borders(Borders::ALL)
            .border_style(self.style.border);

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(overlay, buf);
    }
}

/// A centered sub-rect with fixed dimensions, clamped to `area`.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
