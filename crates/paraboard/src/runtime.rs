use crate::app::{App, Control};
use crate::event::Input;
use crossterm::{
    cursor,
    event::{
        EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use futures::StreamExt;
use paraboard_core::PersistError;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, rendering, or teardown.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Settings could not be written.
    #[error("settings error: {0}")]
    Settings(#[from] PersistError),
    /// The log file could not be opened.
    #[error("log file error: {0}")]
    Logging(#[from] tracing_appender::rolling::InitError),
}

/// Configuration options for a [`Program`].
///
/// Use struct update syntax to override only the options you need:
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     alt_screen: false,
///     ..ProgramOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ProgramOptions {
    /// Target frames per second (default: 60, max: 120).
    pub fps: u32,
    /// Start in alternate screen (default: true).
    pub alt_screen: bool,
    /// Whether to catch panics and restore terminal (default: true).
    pub catch_panics: bool,
    /// Whether to handle signals gracefully (default: true).
    pub handle_signals: bool,
    /// Ask the terminal for key-release events when it supports them
    /// (default: true).
    pub report_key_release: bool,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 60,
            alt_screen: true,
            catch_panics: true,
            handle_signals: true,
            report_key_release: true,
        }
    }
}

/// The terminal runtime. Owns the terminal and feeds events to an [`App`]
/// until the user quits.
///
/// Model changes only raise a flag. The frame tick draws when the flag is
/// set, so bursts of input cost one redraw and the draw always sees the
/// final terminal size.
///
/// ```rust,ignore
/// let app = App::new(JsonFileStore::new(path), DEFAULT_KEY_DELAY);
/// let app = Program::new(app, ProgramOptions::default())?.run().await?;
/// ```
pub struct Program {
    app: App,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    options: ProgramOptions,
}

impl Program {
    /// Take over the terminal.
    pub fn new(app: App, options: ProgramOptions) -> Result<Self, ProgramError> {
        let terminal = init_terminal(&options)?;
        info!(target: "paraboard::runtime", "terminal initialized");
        Ok(Self {
            app,
            terminal,
            options,
        })
    }

    /// Run until quit, restore the terminal, and hand the app back.
    pub async fn run(mut self) -> Result<App, ProgramError> {
        let result = self.event_loop().await;
        info!(target: "paraboard::runtime", "shutting down");
        let restored = restore_terminal(&self.options);
        result?;
        restored?;
        Ok(self.app)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.app.take_redraw();
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frame_interval = tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let handle_signals = self.options.handle_signals;
        let mut events = EventStream::new();

        loop {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    debug!(target: "paraboard::runtime", "received ctrl+c signal");
                    return Ok(());
                }

                event = events.next() => {
                    let Some(event) = event else {
                        return Ok(());
                    };
                    let Some(input) = Input::from_event(event?) else {
                        continue;
                    };
                    match self.app.handle(input, Instant::now()) {
                        Control::Continue => {}
                        Control::Quit => return Ok(()),
                        Control::Suspend => {
                            if !self.suspend() {
                                return Ok(());
                            }
                            // The stream was reading from a terminal that
                            // has since been reset.
                            events = EventStream::new();
                        }
                    }
                }

                _ = frame_interval.tick() => {
                    if self.app.take_redraw() {
                        self.render()?;
                    }
                }
            }
        }
    }

    /// Returns `false` if the terminal could not be taken back.
    fn suspend(&mut self) -> bool {
        restore_terminal(&self.options).ok();

        #[cfg(unix)]
        {
            unsafe {
                libc::raise(libc::SIGTSTP);
            }
        }

        match init_terminal(&self.options) {
            Ok(terminal) => {
                self.terminal = terminal;
                self.app.take_redraw();
                self.render().is_ok()
            }
            Err(err) => {
                error!(target: "paraboard::runtime", %err, "cannot re-initialize terminal after suspend");
                false
            }
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        let app = &self.app;
        self.terminal.draw(|frame| app.view(frame))?;
        Ok(())
    }
}

fn init_terminal(
    options: &ProgramOptions,
) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    // Installed once so repeated suspends do not stack hooks.
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal_minimal(alt_screen);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = stdout();

    if options.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    if options.report_key_release {
        if supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                writer,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            KEYBOARD_ENHANCEMENT.pushed();
            info!(target: "paraboard::runtime", "key release events enabled");
        } else {
            info!(target: "paraboard::runtime", "terminal does not report key releases");
        }
    }
    execute!(writer, cursor::Hide)?;

    let backend = CrosstermBackend::new(writer);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(options: &ProgramOptions) -> Result<(), ProgramError> {
    restore_terminal_minimal(options.alt_screen)?;
    Ok(())
}

/// Whether keyboard enhancement flags are currently pushed. Shared with the
/// panic hook, so it lives in a static.
static KEYBOARD_ENHANCEMENT: EnhancementState = EnhancementState::new();

struct EnhancementState(AtomicBool);

impl EnhancementState {
    const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    fn pushed(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns `true` exactly once per push.
    fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

fn restore_terminal_minimal(alt_screen: bool) -> Result<(), std::io::Error> {
    // Best effort: keep restoring even if a step fails.
    let raw = disable_raw_mode();
    let mut writer = stdout();
    if KEYBOARD_ENHANCEMENT.take() {
        execute!(writer, PopKeyboardEnhancementFlags).ok();
    }
    execute!(writer, cursor::Show).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    raw
}
