use crate::message::Message;
use crate::model::Model;
use crate::reducer::{reduce, Transition};
use tracing::debug;

/// Signature of the function a [`Store`] uses to compute transitions.
pub type Reducer = fn(&Model, Message) -> Transition;

type Subscriber = Box<dyn FnMut(&Model) + Send>;

/// Handle returned by [`Store::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Owns the single [`Model`] and is the only place it changes.
///
/// [`dispatch`](Store::dispatch) runs the reducer, swaps in the new model,
/// calls every subscriber synchronously, then dispatches the reducer's
/// follow-up messages depth-first. Nothing is queued, so messages are applied
/// in exactly the order they are dispatched.
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use paraboard_core::{Message, Model, Settings, Store};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let mut store = Store::new(Model::new(Settings::default()));
/// let sink = seen.clone();
/// store.subscribe(move |model| sink.lock().unwrap().push(model.text.clone()));
///
/// store.dispatch(Message::Pick);
/// assert_eq!(*seen.lock().unwrap(), vec!["".to_string(), "Q".to_string()]);
/// ```
pub struct Store {
    state: Model,
    reducer: Reducer,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_id: u64,
}

impl Store {
    /// Create a store around `initial` using [`reduce`].
    pub fn new(initial: Model) -> Self {
        Self::with_reducer(initial, reduce)
    }

    /// Create a store with a custom reducer.
    pub fn with_reducer(initial: Model, reducer: Reducer) -> Self {
        Self {
            state: initial,
            reducer,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// The current model.
    pub fn state(&self) -> &Model {
        &self.state
    }

    /// Register `subscriber`. It is called once right away with the current
    /// model and then after every transition.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&Model) + Send + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        let mut subscriber: Subscriber = Box::new(subscriber);
        subscriber(&self.state);
        self.subscribers.push((id, subscriber));
        id
    }

    /// Remove a subscriber. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Apply `msg`, notify subscribers, then dispatch any follow-ups.
    pub fn dispatch(&mut self, msg: Message) {
        debug!(target: "paraboard::store", ?msg, "dispatch");
        let Transition { model, effects } = (self.reducer)(&self.state, msg);
        self.state = model;
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
        for effect in effects.into_messages() {
            self.dispatch(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::message::Direction;
    use crate::settings::{SettingKey, Settings};
    use std::sync::{Arc, Mutex};

    fn store() -> Store {
        Store::new(Model::new(Settings::default()))
    }

    fn recorder(store: &mut Store) -> Arc<Mutex<Vec<Model>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |model| sink.lock().unwrap().push(model.clone()));
        seen
    }

    #[test]
    fn subscribe_delivers_current_state() {
        let mut store = store();
        let seen = recorder(&mut store);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], *store.state());
    }

    #[test]
    fn dispatch_replaces_state_and_notifies() {
        let mut store = store();
        let seen = recorder(&mut store);

        store.dispatch(Message::Pick);
        store.dispatch(Message::Space);

        assert_eq!(store.state().text, "Q ");
        let texts: Vec<String> = seen.lock().unwrap().iter().map(|m| m.text.clone()).collect();
        assert_eq!(texts, vec!["", "Q", "Q "]);
    }

    #[test]
    fn sequence_from_the_initial_model() {
        let mut store = store();
        store.dispatch(Message::Pick);
        assert_eq!(store.state().text, "Q");
        store.dispatch(Message::Space);
        assert_eq!(store.state().text, "Q ");
        store.dispatch(Message::Backspace);
        assert_eq!(store.state().text, "Q");
        store.dispatch(Message::Clear);
        assert_eq!(store.state().text, "");
    }

    #[test]
    fn clear_twice_equals_clear_once() {
        let mut once = store();
        once.dispatch(Message::Pick);
        once.dispatch(Message::Clear);

        let mut twice = store();
        twice.dispatch(Message::Pick);
        twice.dispatch(Message::Clear);
        twice.dispatch(Message::Clear);

        assert_eq!(once.state(), twice.state());
    }

    #[test]
    fn change_alphabet_then_move_round_trip() {
        let mut store = store();
        store.dispatch(Message::change_key(SettingKey::Alphabet, "AB").unwrap());
        assert_eq!(store.state().cursor_position, 0);
        store.dispatch(Message::Move(Direction::Right));
        assert_eq!(store.state().cursor_position, 1);
        store.dispatch(Message::Move(Direction::Right));
        assert_eq!(store.state().cursor_position, 0);
    }

    #[test]
    fn subscribers_run_in_subscription_order() {
        let mut store = store();
        let order = Arc::new(Mutex::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let order = order.clone();
            store.subscribe(move |_| order.lock().unwrap().push(name));
        }
        order.lock().unwrap().clear();

        store.dispatch(Message::Pick);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = store();
        let count = Arc::new(Mutex::new(0));
        let sink = count.clone();
        let id = store.subscribe(move |_| *sink.lock().unwrap() += 1);
        assert_eq!(store.subscriber_count(), 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(Message::Pick);
        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    // Pick chains a Space, which chains a NewLine: effects run depth-first,
    // each one after the notification of the transition that produced it.
    fn chaining_reducer(model: &Model, msg: Message) -> Transition {
        let effects = match msg {
            Message::Pick => Command::batch(vec![
                Command::message(Message::Space),
                Command::message(Message::Move(Direction::Right)),
            ]),
            Message::Space => Command::message(Message::NewLine),
            _ => Command::none(),
        };
        reduce(model, msg).with_effects(effects)
    }

    #[test]
    fn effects_dispatch_depth_first_in_order() {
        let mut store = Store::with_reducer(Model::new(Settings::default()), chaining_reducer);
        let seen = recorder(&mut store);

        store.dispatch(Message::Pick);

        let snapshots: Vec<(String, usize)> = seen
            .lock()
            .unwrap()
            .iter()
            .map(|m| (m.text.clone(), m.cursor_position))
            .collect();
        assert_eq!(
            snapshots,
            vec![
                ("".to_string(), 16),
                ("Q".to_string(), 16),
                ("Q ".to_string(), 16),
                ("Q \n".to_string(), 16),
                ("Q \n".to_string(), 17),
            ]
        );
    }
}
