use crate::message::Message;

/// Follow-up messages returned by [`reduce`](crate::reduce).
///
/// The store dispatches them in order, depth-first, right after the
/// transition that produced them. No current message emits any; the hook
/// exists so transitions can be chained without touching the store.
///
/// # Examples
///
/// ```
/// use paraboard_core::{Command, Message};
///
/// let cmd = Command::batch([Command::message(Message::Space), Command::none()]);
/// assert_eq!(cmd.into_messages(), vec![Message::Space]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    inner: CommandInner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CommandInner {
    None,
    Message(Message),
    Batch(Vec<Command>),
}

impl Default for Command {
    fn default() -> Self {
        Command::none()
    }
}

impl Command {
    /// No follow-up.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Dispatch `msg` right after the current transition.
    pub fn message(msg: Message) -> Self {
        Command {
            inner: CommandInner::Message(msg),
        }
    }

    /// Several follow-ups, dispatched in the given order.
    pub fn batch(cmds: impl IntoIterator<Item = Command>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|cmd| !cmd.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.pop().unwrap_or_default(),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Returns `true` if there is nothing to dispatch.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// Flatten into the messages to dispatch, in order.
    pub fn into_messages(self) -> Vec<Message> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Message>) {
        match self.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => out.push(msg),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    cmd.flatten_into(out);
                }
            }
        }
    }
}
