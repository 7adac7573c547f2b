use crate::app::{App, Control};
use crate::event::Input;
use paraboard_core::{KeySignal, MemoryStore, Message, Model, DEFAULT_KEY_DELAY};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::time::{Duration, Instant};

/// A headless test harness that drives an [`App`] without a real terminal.
///
/// Time is virtual: every input is stamped with the harness clock, which
/// only moves when you [`advance`](TestProgram::advance) it or
/// [`hold`](TestProgram::hold) a key. Settings go to a [`MemoryStore`] you
/// can inspect.
///
/// # Example
///
/// ```rust,ignore
/// use paraboard::testing::TestProgram;
///
/// let mut prog = TestProgram::new();
/// prog.tap("5");                                  // pick "Q"
/// prog.hold("6", 1600, 50);                       // move right 4 times
/// assert_eq!(prog.model().cursor_position, 20);
///
/// let output = prog.render_string(60, 12);
/// assert!(output.contains('Q'));
/// ```
pub struct TestProgram {
    app: App,
    store: MemoryStore,
    start: Instant,
    now: Instant,
}

impl Default for TestProgram {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProgram {
    /// Default settings and key delay.
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new(), DEFAULT_KEY_DELAY)
    }

    /// Start from `store` (which may hold a document) and a key delay.
    pub fn with_store(store: MemoryStore, key_delay: Duration) -> Self {
        let app = App::new(store.clone(), key_delay);
        let now = Instant::now();
        Self {
            app,
            store,
            start: now,
            now,
        }
    }

    /// Virtual time since the harness was created.
    pub fn elapsed(&self) -> Duration {
        self.now - self.start
    }

    /// Move the clock forward.
    pub fn advance(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
    }

    /// Feed any input at the current time.
    pub fn input(&mut self, input: Input) -> Control {
        self.app.handle(input, self.now)
    }

    pub fn press(&mut self, key: &str) -> Control {
        self.input(Input::Key(KeySignal::Down(key.to_string())))
    }

    pub fn release(&mut self, key: &str) {
        self.input(Input::Key(KeySignal::Up(key.to_string())));
    }

    /// Press and release without moving the clock.
    pub fn tap(&mut self, key: &str) {
        self.press(key);
        self.release(key);
    }

    /// Hold `key` for `duration_ms` with autorepeat every `repeat_ms`, then
    /// release it. The clock ends at the release.
    pub fn hold(&mut self, key: &str, duration_ms: u64, repeat_ms: u64) {
        let step = repeat_ms.max(1);
        let mut held = 0;
        while held < duration_ms {
            self.press(key);
            let next = (held + step).min(duration_ms);
            self.advance(next - held);
            held = next;
        }
        self.release(key);
    }

    /// Dispatch a message directly.
    pub fn send(&mut self, msg: Message) {
        self.app.dispatch(msg);
    }

    pub fn model(&self) -> &Model {
        self.app.model()
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// The settings store the app writes to.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Render the app to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let Ok(mut terminal) = Terminal::new(backend) else {
            return Buffer::empty(Rect::new(0, 0, width, height));
        };
        let _ = terminal.draw(|frame| self.app.view(frame));
        terminal.backend().buffer().clone()
    }

    /// Render and return the visible content as a plain string, rows
    /// separated by newlines.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(buf[(x, y)].symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paraboard_core::{SettingKey, SettingsStore};

    #[test]
    fn q_space_backspace_clear() {
        let mut prog = TestProgram::new();
        prog.tap("5");
        assert_eq!(prog.model().text, "Q");
        prog.tap("3");
        assert_eq!(prog.model().text, "Q ");
        prog.tap("1");
        assert_eq!(prog.model().text, "Q");
        prog.tap("0");
        assert_eq!(prog.model().text, "");
    }

    #[test]
    fn holding_right_for_1600ms_moves_four_times() {
        let mut prog = TestProgram::new();
        prog.hold("6", 1600, 50);
        // Initial press plus three repeats.
        assert_eq!(prog.model().cursor_position, 16 + 4);
        assert_eq!(prog.elapsed(), Duration::from_millis(1600));
    }

    #[test]
    fn repeat_boundary_is_inclusive() {
        let mut prog = TestProgram::new();
        prog.press("6");
        prog.advance(499);
        prog.press("6");
        assert_eq!(prog.model().cursor_position, 17);
        prog.advance(1);
        prog.press("6");
        assert_eq!(prog.model().cursor_position, 18);
    }

    #[test]
    fn release_lets_the_next_press_through() {
        let mut prog = TestProgram::new();
        prog.tap("4");
        prog.advance(10);
        prog.tap("4");
        assert_eq!(prog.model().cursor_position, 14);
    }

    #[test]
    fn rebinding_pick_while_held_stops_the_repeat() {
        let mut prog = TestProgram::new();
        prog.press("5");
        assert_eq!(prog.model().text, "Q");

        prog.send(Message::change_key(SettingKey::Pick, "p").unwrap());
        prog.advance(500);
        // Accepted by the throttle, but "5" is no longer bound.
        prog.press("5");
        assert_eq!(prog.model().text, "Q");
        assert_eq!(prog.app().throttle().held_key(), Some("5"));

        prog.release("5");
        prog.tap("p");
        assert_eq!(prog.model().text, "QQ");
    }

    #[test]
    fn wrapping_with_a_short_alphabet() {
        let mut prog = TestProgram::new();
        prog.send(Message::change_key(SettingKey::Alphabet, "AB").unwrap());
        assert_eq!(prog.model().cursor_position, 0);
        prog.tap("6");
        assert_eq!(prog.model().cursor_position, 1);
        prog.advance(1);
        prog.tap("6");
        assert_eq!(prog.model().cursor_position, 0);
    }

    #[test]
    fn settings_survive_a_restart() {
        let mut prog = TestProgram::new();
        prog.send(Message::change_key(SettingKey::NewLine, "Enter").unwrap());
        let store = prog.store().clone();
        assert_eq!(store.load().new_line, "Enter");

        let mut next = TestProgram::with_store(store, DEFAULT_KEY_DELAY);
        next.tap("5");
        next.tap("Enter");
        assert_eq!(next.model().text, "Q\n");
    }

    #[test]
    fn render_shows_marker_text_and_legend() {
        let mut prog = TestProgram::new();
        prog.tap("5");
        prog.tap("2");
        prog.tap("5");
        let screen = prog.render_string(56, 10);
        let rows: Vec<&str> = screen.lines().collect();

        // 56 columns over 28 characters: the marker sits at column 32.
        let marker_row: Vec<char> = rows[1].chars().collect();
        assert_eq!(marker_row[32], '▲');
        assert!(rows[0].starts_with("A B C"));

        // Text is shown verbatim, one line per newline.
        assert!(rows.iter().any(|row| row.contains("│Q ")));
        assert_eq!(rows.iter().filter(|row| row.contains("│Q")).count(), 2);

        assert!(rows[8].starts_with("4 Left • 6 Right"));
        assert!(rows[9].contains("F2 settings"));
    }

    #[test]
    fn text_taller_than_the_panel_keeps_the_last_row_visible() {
        let mut prog = TestProgram::new();
        for _ in 0..6 {
            prog.tap("2");
            prog.advance(1);
        }
        prog.tap("5");
        assert_eq!(prog.model().text, "\n\n\n\n\n\nQ");

        let screen = prog.render_string(56, 10);
        let rows: Vec<&str> = screen.lines().collect();
        // Panel spans rows 2..=7; its last inner row is 6.
        assert!(rows[6].starts_with("│Q "), "row was {:?}", rows[6]);
    }

    #[test]
    fn render_follows_the_cursor() {
        let mut prog = TestProgram::new();
        prog.tap("4");
        let screen = prog.render_string(56, 10);
        let marker_row: Vec<char> = screen.lines().nth(1).unwrap().chars().collect();
        assert_eq!(marker_row[30], '▲');
    }

    #[test]
    fn settings_dialog_overlays_the_keyboard() {
        let mut prog = TestProgram::new();
        prog.input(Input::ToggleSettings);
        let screen = prog.render_string(60, 20);
        assert!(screen.contains("Settings"));
        assert!(screen.contains("▸ Alphabet"));

        prog.input(Input::ToggleSettings);
        let screen = prog.render_string(60, 20);
        assert!(!screen.contains("▸ Alphabet"));
    }

    #[test]
    fn legend_tracks_rebinding() {
        let mut prog = TestProgram::new();
        prog.send(Message::change_key(SettingKey::Left, "ArrowLeft").unwrap());
        let screen = prog.render_string(80, 10);
        assert!(screen.contains("← Left"));
    }
}
