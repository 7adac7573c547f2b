use crate::settings::Settings;

/// Where the cursor starts when the program launches (the letter `Q` in the
/// default alphabet).
pub const INITIAL_CURSOR: usize = 16;

/// Cyclic index arithmetic.
///
/// Stepping past either end continues from the opposite end: `x < 0` gives
/// `length - 1`, `x >= length` gives `0`, anything else is returned as is.
/// Callers guarantee `length >= 1`; the settings boundary refuses empty
/// alphabets.
pub fn wrap(x: i64, length: usize) -> usize {
    debug_assert!(length > 0, "wrap called with an empty alphabet");
    if x < 0 {
        length.saturating_sub(1)
    } else if x as u64 >= length as u64 {
        0
    } else {
        x as usize
    }
}

/// The whole application state.
///
/// Owned by the [`Store`](crate::Store) and replaced wholesale on every
/// dispatched message. `cursor_position` always indexes into
/// `settings.alphabet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Index of the highlighted alphabet character.
    pub cursor_position: usize,
    /// The text composed so far.
    pub text: String,
    /// Current bindings and alphabet.
    pub settings: Settings,
}

impl Model {
    /// Start with empty text and the cursor on [`INITIAL_CURSOR`], wrapped
    /// into range for alphabets shorter than that.
    pub fn new(settings: Settings) -> Self {
        let cursor_position = wrap(INITIAL_CURSOR as i64, settings.alphabet_len());
        Self {
            cursor_position,
            text: String::new(),
            settings,
        }
    }

    /// The highlighted character.
    pub fn current_char(&self) -> Option<char> {
        self.settings.char_at(self.cursor_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingKey;

    #[test]
    fn wrap_is_cyclic_for_every_position() {
        for length in 1..=30usize {
            for p in 0..length as i64 {
                assert!(wrap(p - 1, length) < length);
                assert!(wrap(p + 1, length) < length);
            }
            assert_eq!(wrap(length as i64 - 1 + 1, length), 0);
            assert_eq!(wrap(-1, length), length - 1);
        }
    }

    #[test]
    fn wrap_leaves_in_range_values_alone() {
        assert_eq!(wrap(0, 3), 0);
        assert_eq!(wrap(2, 3), 2);
    }

    #[test]
    fn single_character_alphabet_stays_on_zero() {
        assert_eq!(wrap(1, 1), 0);
        assert_eq!(wrap(-1, 1), 0);
    }

    #[test]
    fn new_model_starts_on_q() {
        let model = Model::new(Settings::default());
        assert_eq!(model.cursor_position, 16);
        assert_eq!(model.current_char(), Some('Q'));
        assert!(model.text.is_empty());
    }

    #[test]
    fn new_model_with_short_alphabet_starts_in_range() {
        let settings = Settings::default().with(SettingKey::Alphabet, "ABC");
        let model = Model::new(settings);
        assert!(model.cursor_position < 3);
    }
}
