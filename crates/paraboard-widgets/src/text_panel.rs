//! Bordered view of the composed text that keeps the newest line visible.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};
use unicode_width::UnicodeWidthChar;

/// Break `text` into display rows of at most `width` columns.
///
/// Every `\n` starts a new row, so a trailing newline yields a trailing
/// empty row. Long lines wrap at character boundaries.
pub fn wrap_rows(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width);
    if width == 0 {
        return Vec::new();
    }
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        for ch in line.chars() {
            let w = ch.width().unwrap_or(0);
            if row_width + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push(ch);
            row_width += w;
        }
        rows.push(row);
    }
    rows
}

/// The composed text, shown verbatim and scrolled so the last row is
/// always on screen.
///
/// ```ignore
/// frame.render_widget(TextPanel::new(&model.text).title(" Text "), area);
/// ```
pub struct TextPanel<'a> {
    text: &'a str,
    title: &'a str,
    style: Style,
}

impl<'a> TextPanel<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            title: "",
            style: Style::default(),
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for TextPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(self.title);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.is_empty() {
            return;
        }

        let rows = wrap_rows(self.text, inner.width);
        let skip = rows.len().saturating_sub(usize::from(inner.height));
        for (y, row) in (inner.y..).zip(rows.iter().skip(skip)) {
            buf.set_stringn(inner.x, y, row, usize::from(inner.width), self.style);
        }
    }
}
