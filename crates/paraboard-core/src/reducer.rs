//! The pure state-transition function.

use crate::command::Command;
use crate::message::Message;
use crate::model::{wrap, Model};
use crate::settings::SettingKey;

/// Result of one reducer step: the replacement model plus follow-up messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub model: Model,
    pub effects: Command,
}

impl Transition {
    /// A transition with no follow-up messages.
    pub fn new(model: Model) -> Self {
        Self {
            model,
            effects: Command::none(),
        }
    }

    /// Attach follow-up messages.
    pub fn with_effects(mut self, effects: Command) -> Self {
        self.effects = effects;
        self
    }
}

/// Compute the next model for `msg`.
///
/// Never mutates `model`. Text is only ever appended to or trimmed at the
/// end. A `ChangeKey` that shrinks the alphabet below the cursor wraps the
/// cursor back into range.
pub fn reduce(model: &Model, msg: Message) -> Transition {
    let next = match msg {
        Message::Move(direction) => Model {
            cursor_position: wrap(
                model.cursor_position as i64 + direction.delta(),
                model.settings.alphabet_len(),
            ),
            ..model.clone()
        },
        Message::Pick => {
            let mut text = model.text.clone();
            if let Some(ch) = model.current_char() {
                text.push(ch);
            }
            Model {
                text,
                ..model.clone()
            }
        }
        Message::Space => append(model, ' '),
        Message::NewLine => append(model, '\n'),
        Message::Backspace => {
            let mut text = model.text.clone();
            text.pop();
            Model {
                text,
                ..model.clone()
            }
        }
        Message::Clear => Model {
            text: String::new(),
            ..model.clone()
        },
        Message::ChangeKey(change) => {
            let settings = model.settings.with(change.key(), change.value());
            let cursor_position = if change.key() == SettingKey::Alphabet {
                wrap(model.cursor_position as i64, settings.alphabet_len())
            } else {
                model.cursor_position
            };
            Model {
                cursor_position,
                settings,
                ..model.clone()
            }
        }
    };
    Transition::new(next)
}

fn append(model: &Model, ch: char) -> Model {
    let mut text = model.text.clone();
    text.push(ch);
    Model {
        text,
        ..model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Direction;
    use crate::settings::Settings;

    fn model() -> Model {
        Model::new(Settings::default())
    }

    fn run(start: Model, msgs: impl IntoIterator<Item = Message>) -> Model {
        msgs.into_iter()
            .fold(start, |state, msg| reduce(&state, msg).model)
    }

    #[test]
    fn pick_space_backspace_clear_sequence() {
        let start = model();
        assert_eq!(start.cursor_position, 16);

        let picked = reduce(&start, Message::Pick).model;
        assert_eq!(picked.text, "Q");
        let spaced = reduce(&picked, Message::Space).model;
        assert_eq!(spaced.text, "Q ");
        let trimmed = reduce(&spaced, Message::Backspace).model;
        assert_eq!(trimmed.text, "Q");
        let cleared = reduce(&trimmed, Message::Clear).model;
        assert_eq!(cleared.text, "");
    }

    #[test]
    fn move_wraps_at_both_ends() {
        let mut start = model();
        start.cursor_position = 0;
        let left = reduce(&start, Message::Move(Direction::Left)).model;
        assert_eq!(left.cursor_position, 27);
        let right = reduce(&left, Message::Move(Direction::Right)).model;
        assert_eq!(right.cursor_position, 0);
    }

    #[test]
    fn move_leaves_text_and_settings_alone() {
        let start = Model {
            text: "HI".into(),
            ..model()
        };
        let next = reduce(&start, Message::Move(Direction::Right)).model;
        assert_eq!(next.text, "HI");
        assert_eq!(next.settings, start.settings);
        assert_eq!(next.cursor_position, 17);
    }

    #[test]
    fn clear_is_idempotent() {
        let start = Model {
            text: "HELLO".into(),
            ..model()
        };
        let once = reduce(&start, Message::Clear).model;
        let twice = reduce(&once, Message::Clear).model;
        assert_eq!(once, twice);
        assert_eq!(twice.text, "");
    }

    #[test]
    fn backspace_on_empty_text_is_noop() {
        let start = model();
        assert_eq!(reduce(&start, Message::Backspace).model, start);
    }

    #[test]
    fn backspace_removes_a_whole_character() {
        let start = Model {
            text: "BLÅ".into(),
            ..model()
        };
        assert_eq!(reduce(&start, Message::Backspace).model.text, "BL");
    }

    #[test]
    fn newline_is_appended_verbatim() {
        let text = run(model(), [Message::Pick, Message::NewLine, Message::Pick]).text;
        assert_eq!(text, "Q\nQ");
    }

    #[test]
    fn pick_uses_multibyte_characters() {
        let mut start = model();
        start.cursor_position = 25;
        assert_eq!(reduce(&start, Message::Pick).model.text, "Æ");
    }

    #[test]
    fn change_alphabet_then_move_wraps_on_new_length() {
        let mut start = model();
        start.cursor_position = 0;
        let changed = reduce(
            &start,
            Message::change_key(SettingKey::Alphabet, "AB").unwrap(),
        )
        .model;
        assert_eq!(changed.settings.alphabet, "AB");
        assert_eq!(changed.cursor_position, 0);

        let once = reduce(&changed, Message::Move(Direction::Right)).model;
        assert_eq!(once.cursor_position, 1);
        let twice = reduce(&once, Message::Move(Direction::Right)).model;
        assert_eq!(twice.cursor_position, 0);
    }

    #[test]
    fn shrinking_alphabet_pulls_cursor_into_range() {
        let start = model();
        assert_eq!(start.cursor_position, 16);
        let changed = reduce(
            &start,
            Message::change_key(SettingKey::Alphabet, "XYZ").unwrap(),
        )
        .model;
        assert!(changed.cursor_position < 3);
    }

    #[test]
    fn change_binding_keeps_cursor_and_text() {
        let start = Model {
            text: "AB".into(),
            ..model()
        };
        let next = reduce(
            &start,
            Message::change_key(SettingKey::Pick, "Enter").unwrap(),
        )
        .model;
        assert_eq!(next.settings.pick, "Enter");
        assert_eq!(next.cursor_position, start.cursor_position);
        assert_eq!(next.text, "AB");
    }

    #[test]
    fn no_message_emits_effects() {
        let msgs = [
            Message::Move(Direction::Left),
            Message::Pick,
            Message::Space,
            Message::Backspace,
            Message::Clear,
            Message::NewLine,
            Message::change_key(SettingKey::Clear, "c").unwrap(),
        ];
        for msg in msgs {
            assert!(reduce(&model(), msg).effects.is_none());
        }
    }

    #[test]
    fn reduce_does_not_touch_its_input() {
        let start = model();
        let snapshot = start.clone();
        let _ = reduce(&start, Message::Pick);
        assert_eq!(start, snapshot);
    }
}
