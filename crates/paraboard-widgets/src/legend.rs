//! One-line legend of the current key bindings.

use paraboard_core::{SettingKey, Settings};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

/// Human-readable label for a key identifier.
///
/// Printable keys show as themselves, except the space bar. Arrow keys get
/// arrows; everything else keeps its name.
pub fn display_key(key: &str) -> String {
    match key {
        " " => "Space".to_string(),
        "ArrowLeft" => "←".to_string(),
        "ArrowRight" => "→".to_string(),
        "ArrowUp" => "↑".to_string(),
        "ArrowDown" => "↓".to_string(),
        "Escape" => "Esc".to_string(),
        other => other.to_string(),
    }
}

/// Visual style for [`Legend`].
#[derive(Debug, Clone)]
pub struct LegendStyle {
    /// Key labels.
    pub key: Style,
    /// Action names.
    pub action: Style,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            key: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            action: Style::default().fg(Color::Gray),
        }
    }
}

/// The seven bindings as `key action` pairs, truncated with an ellipsis
/// when a maximum width is set.
pub struct Legend {
    entries: Vec<(String, &'static str)>,
    separator: String,
    ellipsis: String,
    max_width: Option<u16>,
    style: LegendStyle,
}

impl Legend {
    /// Build from the current settings.
    pub fn new(settings: &Settings) -> Self {
        let entries = SettingKey::BINDINGS
            .into_iter()
            .map(|key| (display_key(settings.get(key)), key.label()))
            .collect();
        Self {
            entries,
            separator: " \u{2022} ".to_string(), // " • "
            ellipsis: "\u{2026}".to_string(), // "…"
            max_width: None,
            style: LegendStyle::default(),
        }
    }

    pub fn with_separator(mut self, s: impl Into<String>) -> Self {
        self.separator = s.into();
        self
    }

    /// Truncate the line to `w` columns.
    pub fn with_max_width(mut self, w: u16) -> Self {
        self.max_width = Some(w);
        self
    }

    pub fn with_style(mut self, style: LegendStyle) -> Self {
        self.style = style;
        self
    }

    /// The legend as a single styled line.
    pub fn line(&self) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut total_width = 0usize;
        let max = self.max_width.map(usize::from);

        for (idx, (key, action)) in self.entries.iter().enumerate() {
            let entry_width = key.width() + 1 + action.width();
            let sep_width = if idx > 0 { self.separator.width() } else { 0 };

            if let Some(max_w) = max {
                if total_width + sep_width + entry_width > max_w {
                    spans.push(Span::raw(self.ellipsis.clone()));
                    break;
                }
            }

            if idx > 0 {
                spans.push(Span::raw(self.separator.clone()));
                total_width += sep_width;
            }
            spans.push(Span::styled(key.clone(), self.style.key));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*action, self.style.action));
            total_width += entry_width;
        }
        Line::from(spans)
    }
}

impl Widget for Legend {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let legend = match self.max_width {
            Some(_) => self,
            None => self.with_max_width(area.width),
        };
        Paragraph::new(legend.line()).render(area, buf);
    }
}
