use crate::board::Board;
use crate::board::Symbol;
use crate::gameplay::Game;
use crate::gameroom::*;
use crate::search::Minimax;

/// House player backed by exhaustive search. Never loses; takes the win
/// when handed one.
pub struct Oracle(Symbol);

impl Oracle {
    pub fn new(symbol: Symbol) -> Self {
        Self(symbol)
    }
}

/// the house takes the second seat
impl Default for Oracle {
    fn default() -> Self {
        Self(Symbol::O)
    }
}

#[async_trait::async_trait]
impl Player for Oracle {
    async fn react(&mut self, event: &Event) -> Option<Command> {
        match event {
            Event::Started { board, turn }
            | Event::Moved { board, turn, .. }
            | Event::Reset { board, turn } => self.ponder(*board, *turn),
            _ => None,
        }
    }
}

impl Oracle {
    /// Volunteers a move only when the snapshot puts it on the clock, so
    /// stale or duplicate prompts die here rather than at the room.
    fn ponder(&self, board: Board, turn: Symbol) -> Option<Command> {
        match turn == self.0 {
            true => Some(Command::Move(
                Minimax::best_move(Game::from((board, turn)))
                    .expect("prompted on an unsettled board"),
            )),
            false => None,
        }
    }
}
