use crate::board::Board;
use crate::board::Outcome;
use crate::board::Symbol;
use crate::gameplay::GameError;
use crate::Contact;
use crate::RoomCode;
use crate::Seat;
use crate::ID;

/// Events a room emits to its participants. Each one carries the full
/// authoritative snapshot a client needs to redraw from scratch; clients
/// never have to reconstruct state from a diff.
#[derive(Debug, Clone)]
pub enum Event {
    /// You opened this room and hold seat 0 (X).
    Created {
        code: RoomCode,
        seat: Seat,
        contacts: Vec<ID<Contact>>,
        board: Board,
        turn: Symbol,
    },
    /// You took a seat in an existing room. `turn` is absent when joining
    /// into an already finished game.
    Joined {
        code: RoomCode,
        seat: Seat,
        contacts: Vec<ID<Contact>>,
        board: Board,
        turn: Option<Symbol>,
    },
    /// Both seats are bound; play is live. Doubles as a resync when a seat
    /// refills mid-game, so the board is not necessarily empty.
    Started { board: Board, turn: Symbol },
    /// A move was accepted. `last` is the cell it claimed.
    Moved {
        board: Board,
        turn: Symbol,
        last: usize,
    },
    /// The game resolved.
    Over { board: Board, outcome: Outcome },
    /// Fresh board after a rematch.
    Reset { board: Board, turn: Symbol },
    /// The other participant left or dropped.
    Left { message: &'static str },
    /// Your request was refused; nothing changed.
    Rejected(GameError),
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created { code, .. } => write!(f, "created {}", code),
            Self::Joined { code, seat, .. } => write!(f, "joined {} at seat {}", code, seat),
            Self::Started { turn, .. } => write!(f, "started, {} to move", turn),
            Self::Moved { turn, last, .. } => write!(f, "moved {}, {} to move", last, turn),
            Self::Over { outcome, .. } => write!(f, "over, {}", outcome),
            Self::Reset { turn, .. } => write!(f, "reset, {} to move", turn),
            Self::Left { .. } => write!(f, "left"),
            Self::Rejected(error) => write!(f, "rejected: {}", error.kind()),
        }
    }
}
