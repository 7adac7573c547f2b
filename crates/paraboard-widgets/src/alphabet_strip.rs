//! The alphabet strip with its sweeping cursor marker. Stateless: a
//! ratatui `Widget` rebuilt from the model on every frame.

use paraboard_core::Model;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthChar;

/// Column of the marker for `cursor`, relative to the strip's left edge.
///
/// Every character gets an equal slot of `width / len` columns and the
/// marker sits at the start of the cursor's slot:
/// `cursor * (width / len)`, rounded down.
pub fn marker_offset(cursor: usize, width: u16, len: usize) -> u16 {
    if len == 0 {
        return 0;
    }
    let slot = f64::from(width) / len as f64;
    (cursor as f64 * slot).floor() as u16
}

/// Visual style for [`AlphabetStrip`].
#[derive(Debug, Clone)]
pub struct StripStyle {
    /// Unselected characters.
    pub letter: Style,
    /// The character under the cursor.
    pub current: Style,
    /// The marker row.
    pub marker: Style,
}

impl Default for StripStyle {
    fn default() -> Self {
        Self {
            letter: Style::default().fg(Color::White),
            current: Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            marker: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// The alphabet spread over the full width of its area.
///
/// The first row holds the characters, the second row (if there is one)
/// holds the marker under the highlighted character.
///
/// ```ignore
/// frame.render_widget(AlphabetStrip::from_model(store.state()), area);
/// ```
pub struct AlphabetStrip<'a> {
    alphabet: &'a str,
    cursor: usize,
    marker: &'a str,
    style: StripStyle,
}

impl<'a> AlphabetStrip<'a> {
    pub fn new(alphabet: &'a str, cursor: usize) -> Self {
        Self {
            alphabet,
            cursor,
            marker: "▲",
            style: StripStyle::default(),
        }
    }

    /// Build from the model's alphabet and cursor position.
    pub fn from_model(model: &'a Model) -> Self {
        Self::new(&model.settings.alphabet, model.cursor_position)
    }

    /// Replace the marker glyph.
    pub fn marker(mut self, marker: &'a str) -> Self {
        self.marker = marker;
        self
    }

    pub fn style(mut self, style: StripStyle) -> Self {
        self.style = style;
        self
    }
}

impl Widget for AlphabetStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let len = self.alphabet.chars().count();
        let right = area.right();

        let mut put = |index: usize, ch: char, style: Style| {
            let x = area.x + marker_offset(index, area.width, len);
            let width = ch.width().unwrap_or(0) as u16;
            if width > 0 && x + width <= right {
                buf.set_string(x, area.y, ch.to_string(), style);
            }
        };
        // Narrow strips give several letters the same column; the current
        // one goes last so it is never covered.
        for (index, ch) in self.alphabet.chars().enumerate() {
            if index != self.cursor {
                put(index, ch, self.style.letter);
            }
        }
        if let Some(ch) = self.alphabet.chars().nth(self.cursor) {
            put(self.cursor, ch, self.style.current);
        }

        if area.height > 1 && len > 0 {
            let x = area.x + marker_offset(self.cursor, area.width, len);
            if x < right {
                buf.set_string(x, area.y + 1, self.marker, self.style.marker);
            }
        }
    }
}
