//! The keyboard application: store, throttle, translator, and the views
//! that project the model onto the screen.

use crate::event::Input;
use paraboard_core::{
    KeyChange, KeyRepeatThrottle, KeySignal, KeyTranslator, Message, Model, Settings,
    SettingsPersister, SettingsStore, Store, Translation,
};
use paraboard_widgets::{AlphabetStrip, DialogEvent, Legend, SettingsDialog, TextPanel};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// What the runtime should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
    Suspend,
}

/// Application state around the [`Store`].
///
/// Key-downs pass through the [`KeyRepeatThrottle`] first and are
/// translated against the settings current at that moment. While the
/// settings dialog is open every key goes to the dialog instead.
pub struct App {
    store: Store,
    throttle: KeyRepeatThrottle,
    translator: KeyTranslator,
    dialog: SettingsDialog,
    dirty: Arc<AtomicBool>,
}

impl App {
    /// Load settings from `persist` and subscribe the persister and the
    /// redraw flag to the store.
    pub fn new<S>(persist: S, key_delay: Duration) -> Self
    where
        S: SettingsStore + Send + 'static,
    {
        let mut store = Store::new(Model::new(persist.load()));

        let mut persister = SettingsPersister::new(persist);
        store.subscribe(move |model| persister.observe(model));

        let dirty = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&dirty);
        store.subscribe(move |_| flag.store(true, Ordering::Release));

        Self {
            store,
            throttle: KeyRepeatThrottle::new(key_delay),
            translator: KeyTranslator::new(),
            dialog: SettingsDialog::new(),
            dirty,
        }
    }

    pub fn model(&self) -> &Model {
        self.store.state()
    }

    pub fn settings(&self) -> &Settings {
        &self.store.state().settings
    }

    pub fn dialog(&self) -> &SettingsDialog {
        &self.dialog
    }

    pub fn throttle(&self) -> &KeyRepeatThrottle {
        &self.throttle
    }

    /// Dispatch a message directly, bypassing throttle and translator.
    pub fn dispatch(&mut self, msg: Message) {
        self.store.dispatch(msg);
    }

    /// React to one input received at `now`.
    pub fn handle(&mut self, input: Input, now: Instant) -> Control {
        match input {
            Input::Quit => return Control::Quit,
            Input::Suspend => return Control::Suspend,
            Input::ToggleSettings => {
                self.dialog.toggle();
                self.mark_dirty();
            }
            Input::Resize(..) => self.mark_dirty(),
            Input::Key(KeySignal::Up(key)) => self.throttle.key_up(&key),
            Input::Key(KeySignal::Down(key)) => {
                if self.dialog.is_visible() {
                    self.dialog_key(&key);
                } else {
                    self.keyboard_key(&key, now);
                }
            }
        }
        Control::Continue
    }

    fn keyboard_key(&mut self, key: &str, now: Instant) {
        if !self.throttle.key_down(key, now) {
            return;
        }
        match self.translator.translate(self.settings(), key) {
            Translation::Handled(msg) => self.store.dispatch(msg),
            Translation::Unhandled => debug!(target: "paraboard::app", key, "unbound key"),
        }
    }

    fn dialog_key(&mut self, key: &str) {
        let event = self.dialog.handle_key(key, &self.store.state().settings);
        if let Some(DialogEvent::Change { key, value }) = event {
            match KeyChange::new(key, value) {
                Ok(change) => {
                    self.dialog.set_error(None);
                    self.store.dispatch(Message::ChangeKey(change));
                }
                Err(err) => {
                    warn!(target: "paraboard::app", %err, "rejected settings change");
                    self.dialog.set_error(Some(err.to_string()));
                }
            }
        }
        self.mark_dirty();
    }

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Returns `true` once per change since the last call.
    pub fn take_redraw(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    /// Draw the whole screen.
    pub fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        let [strip, text, legend, hints] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let model = self.store.state();
        frame.render_widget(AlphabetStrip::from_model(model), strip);
        frame.render_widget(TextPanel::new(&model.text).title(" Text "), text);
        frame.render_widget(Legend::new(&model.settings), legend);
        frame.render_widget(
            Line::from(Span::styled(
                "F2 settings • Ctrl+C quit",
                Style::default().fg(Color::DarkGray),
            )),
            hints,
        );

        self.render_dialog(area, frame);
    }

    fn render_dialog(&self, area: Rect, frame: &mut Frame) {
        self.dialog
            .render(area, frame.buffer_mut(), &self.store.state().settings);
    }
}
