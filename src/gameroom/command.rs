use super::Event;
use crate::Contact;
use crate::ID;
use tokio::sync::mpsc::UnboundedSender;

/// What a seated participant can ask of its room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Claim a cell.
    Move(usize),
    /// Rematch on a finished game.
    Reset,
    /// Give up the seat.
    Leave,
}

/// Everything that can arrive on a room's inbox. The room drains these one
/// at a time, so each signal is validated against the state its predecessor
/// left behind, whatever order connections raced to send them in.
#[derive(Debug)]
pub enum Signal {
    /// A contact wants a seat; `sender` is where its events should go.
    /// Remote contacts count towards the idle-room grace period.
    Join {
        contact: ID<Contact>,
        sender: UnboundedSender<Event>,
        remote: bool,
    },
    /// A seated participant issued a command.
    Command {
        contact: ID<Contact>,
        command: Command,
    },
    /// A connection died without leaving; its seat may be reclaimed.
    Hangup { contact: ID<Contact> },
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Move(index) => write!(f, "move {}", index),
            Self::Reset => write!(f, "reset"),
            Self::Leave => write!(f, "leave"),
        }
    }
}
