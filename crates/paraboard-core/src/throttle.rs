//! Key-repeat throttling for held switches.
//!
//! A switch held down makes the terminal (or the OS) emit a key-down every
//! few tens of milliseconds. Left alone that floods the store with `Move`
//! messages. [`KeyRepeatThrottle`] lets the first key-down through, then
//! drops repeats of the same key until either the interval has elapsed or
//! the key is released, whichever comes first.
//!
//! Time is passed in by the caller, so the policy can be driven by a
//! virtual clock in tests.

use std::time::{Duration, Instant};

/// Default repeat interval of a held key.
pub const DEFAULT_KEY_DELAY: Duration = Duration::from_millis(500);

/// A raw key transition, identified by its key name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeySignal {
    Down(String),
    Up(String),
}

impl KeySignal {
    /// The key this signal refers to.
    pub fn key(&self) -> &str {
        match self {
            KeySignal::Down(key) | KeySignal::Up(key) => key,
        }
    }
}

#[derive(Debug, Clone)]
struct Gate {
    key: String,
    accepted_at: Instant,
}

/// Throttle state machine.
///
/// At most one key is gated at a time. A key-down is accepted when:
///
/// * nothing is gated, or
/// * it is a different key than the gated one (a new press), or
/// * at least `interval` has passed since the gated key was last accepted
///   (the boundary is inclusive).
///
/// A key-up of the gated key opens the gate immediately, so releasing and
/// pressing again restarts the cadence.
#[derive(Debug, Clone)]
pub struct KeyRepeatThrottle {
    interval: Duration,
    gate: Option<Gate>,
}

impl Default for KeyRepeatThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_DELAY)
    }
}

impl KeyRepeatThrottle {
    /// Create a throttle with the given repeat interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            gate: None,
        }
    }

    /// The configured repeat interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record a key-down at `now`. Returns `true` if it should be acted on.
    pub fn key_down(&mut self, key: &str, now: Instant) -> bool {
        if self.is_gated(key, now) {
            return false;
        }
        self.gate = Some(Gate {
            key: key.to_string(),
            accepted_at: now,
        });
        true
    }

    /// Record a key-up. Opens the gate if `key` is the gated key.
    pub fn key_up(&mut self, key: &str) {
        if self.gate.as_ref().is_some_and(|gate| gate.key == key) {
            self.gate = None;
        }
    }

    /// Feed one signal. Returns `true` for an accepted key-down.
    pub fn signal(&mut self, signal: &KeySignal, now: Instant) -> bool {
        match signal {
            KeySignal::Down(key) => self.key_down(key, now),
            KeySignal::Up(key) => {
                self.key_up(key);
                false
            }
        }
    }

    /// Returns `true` if a key-down of `key` at `now` would be dropped.
    pub fn is_gated(&self, key: &str, now: Instant) -> bool {
        self.gate.as_ref().is_some_and(|gate| {
            gate.key == key && now.saturating_duration_since(gate.accepted_at) < self.interval
        })
    }

    /// The key currently holding the gate, if any.
    pub fn held_key(&self) -> Option<&str> {
        self.gate.as_ref().map(|gate| gate.key.as_str())
    }

    /// Forget the gated key.
    pub fn reset(&mut self) {
        self.gate = None;
    }
}

/// Run a timestamped sequence of key signals through a fresh throttle and
/// return the accepted key-downs.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use paraboard_core::{throttle, KeySignal};
///
/// let t0 = Instant::now();
/// let ms = |n| t0 + Duration::from_millis(n);
/// let accepted = throttle(
///     Duration::from_millis(500),
///     vec![
///         (ms(0), KeySignal::Down("6".into())),
///         (ms(100), KeySignal::Down("6".into())),
///         (ms(200), KeySignal::Up("6".into())),
///         (ms(250), KeySignal::Down("6".into())),
///     ],
/// );
/// assert_eq!(accepted, vec![(ms(0), "6".to_string()), (ms(250), "6".to_string())]);
/// ```
pub fn throttle(
    interval: Duration,
    signals: impl IntoIterator<Item = (Instant, KeySignal)>,
) -> Vec<(Instant, String)> {
    let mut throttle = KeyRepeatThrottle::new(interval);
    signals
        .into_iter()
        .filter_map(|(at, signal)| match signal {
            KeySignal::Down(key) => throttle.key_down(&key, at).then_some((at, key)),
            KeySignal::Up(key) => {
                throttle.key_up(&key);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> impl Fn(u64) -> Instant {
        let t0 = Instant::now();
        move |ms| t0 + Duration::from_millis(ms)
    }

    fn hold(
        at: &impl Fn(u64) -> Instant,
        key: &str,
        from_ms: u64,
        until_ms: u64,
        repeat_ms: u64,
    ) -> Vec<(Instant, KeySignal)> {
        let mut signals: Vec<_> = (from_ms..until_ms)
            .step_by(repeat_ms as usize)
            .map(|t| (at(t), KeySignal::Down(key.to_string())))
            .collect();
        signals.push((at(until_ms), KeySignal::Up(key.to_string())));
        signals
    }

    fn offsets(at: &impl Fn(u64) -> Instant, accepted: &[(Instant, String)]) -> Vec<u64> {
        accepted
            .iter()
            .map(|(t, _)| t.duration_since(at(0)).as_millis() as u64)
            .collect()
    }

    #[test]
    fn holding_for_1600ms_fires_three_repeats() {
        let at = clock();
        let accepted = throttle(DEFAULT_KEY_DELAY, hold(&at, "6", 0, 1600, 50));
        assert_eq!(offsets(&at, &accepted), vec![0, 500, 1000, 1500]);
        // The initial press plus three repeats.
        assert_eq!(accepted.len() - 1, 3);
    }

    #[test]
    fn release_before_1500ms_cuts_the_last_repeat() {
        let at = clock();
        let accepted = throttle(DEFAULT_KEY_DELAY, hold(&at, "6", 0, 1499, 50));
        assert_eq!(offsets(&at, &accepted), vec![0, 500, 1000]);
    }

    #[test]
    fn boundary_is_inclusive() {
        let at = clock();
        let mut throttle = KeyRepeatThrottle::default();
        assert!(throttle.key_down("4", at(0)));
        assert!(!throttle.key_down("4", at(499)));
        assert!(throttle.key_down("4", at(500)));
        assert!(!throttle.key_down("4", at(999)));
        assert!(throttle.key_down("4", at(1000)));
    }

    #[test]
    fn cadence_follows_the_last_accepted_event() {
        let at = clock();
        let mut throttle = KeyRepeatThrottle::default();
        assert!(throttle.key_down("4", at(0)));
        // Slow autorepeat: the next accepted event lands late and the
        // interval is measured from there.
        assert!(throttle.key_down("4", at(530)));
        assert!(!throttle.key_down("4", at(1010)));
        assert!(throttle.key_down("4", at(1030)));
    }

    #[test]
    fn release_resets_cadence_immediately() {
        let at = clock();
        let mut throttle = KeyRepeatThrottle::default();
        assert!(throttle.key_down("5", at(0)));
        throttle.key_up("5");
        assert_eq!(throttle.held_key(), None);
        assert!(throttle.key_down("5", at(10)));
    }

    #[test]
    fn different_key_is_a_new_press() {
        let at = clock();
        let mut throttle = KeyRepeatThrottle::default();
        assert!(throttle.key_down("4", at(0)));
        assert!(throttle.key_down("5", at(100)));
        assert_eq!(throttle.held_key(), Some("5"));
        // Back to the first key: also a new press.
        assert!(throttle.key_down("4", at(150)));
    }

    #[test]
    fn releasing_another_key_keeps_the_gate() {
        let at = clock();
        let mut throttle = KeyRepeatThrottle::default();
        assert!(throttle.key_down("4", at(0)));
        throttle.key_up("9");
        assert!(!throttle.key_down("4", at(100)));
    }

    #[test]
    fn signal_feeds_both_transitions() {
        let at = clock();
        let mut throttle = KeyRepeatThrottle::new(Duration::from_millis(200));
        assert!(throttle.signal(&KeySignal::Down("1".into()), at(0)));
        assert!(!throttle.signal(&KeySignal::Down("1".into()), at(50)));
        assert!(!throttle.signal(&KeySignal::Up("1".into()), at(60)));
        assert!(throttle.signal(&KeySignal::Down("1".into()), at(70)));
        assert_eq!(throttle.interval(), Duration::from_millis(200));
    }

    #[test]
    fn reset_clears_the_gate() {
        let at = clock();
        let mut throttle = KeyRepeatThrottle::default();
        throttle.key_down("4", at(0));
        assert!(throttle.is_gated("4", at(1)));
        throttle.reset();
        assert!(!throttle.is_gated("4", at(1)));
    }
}
