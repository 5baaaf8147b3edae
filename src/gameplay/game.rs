use super::Turn;
use crate::board::Board;
use crate::board::Outcome;
use crate::board::Symbol;
use crate::CELLS;

/// A bare game of tic-tac-toe: the board plus whose mark goes down next.
/// Knows nothing about seats, connections, or rooms.
///
/// Like [`Board`], a `Game` is a small value and transitions are functional:
/// [`Game::apply`] returns the successor position. This is what lets the
/// search tree fan out without ever undoing a move.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct Game {
    board: Board,
    to_move: Symbol,
}

impl Game {
    /// Empty board, X to move.
    pub fn root() -> Self {
        Self {
            board: Board::empty(),
            to_move: Symbol::X,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Frozen at Terminal; otherwise the mark to move.
    pub fn turn(&self) -> Turn {
        match self.outcome().is_terminal() {
            true => Turn::Terminal,
            false => Turn::Choice(self.to_move),
        }
    }

    pub fn outcome(&self) -> Outcome {
        Outcome::from(&self.board)
    }

    pub fn is_allowed(&self, index: usize) -> bool {
        !self.outcome().is_terminal() && index < CELLS && self.board.get(index).is_empty()
    }

    /// Cells the mover may claim, ascending. Empty at Terminal.
    pub fn legal(&self) -> Vec<usize> {
        match self.outcome().is_terminal() {
            true => Vec::new(),
            false => self.board.empties().collect(),
        }
    }

    /// Successor position after the mover claims `index`.
    pub fn apply(self, index: usize) -> Self {
        debug_assert!(self.is_allowed(index), "illegal move applied");
        Self {
            board: self.board.mark(index, self.to_move),
            to_move: !self.to_move,
        }
    }
}

/// resume from a raw position
impl From<(Board, Symbol)> for Game {
    fn from((board, to_move): (Board, Symbol)) -> Self {
        Self { board, to_move }
    }
}

/// str isomorphism; the mover falls out of the mark counts since X opens
impl TryFrom<&str> for Game {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let board = Board::try_from(s)?;
        let x = board.count(Symbol::X);
        let o = board.count(Symbol::O);
        match x {
            _ if x == o => Ok(Self::from((board, Symbol::X))),
            _ if x == o + 1 => Ok(Self::from((board, Symbol::O))),
            _ => Err(format!("unreachable mark counts {}X {}O: {}", x, o, s)),
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.board, self.turn())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_opens_with_x() {
        let game = Game::root();
        assert_eq!(game.turn(), Turn::Choice(Symbol::X));
        assert_eq!(game.legal().len(), CELLS);
    }

    #[test]
    fn apply_alternates_marks() {
        let game = Game::root().apply(4).apply(0);
        assert_eq!(game.turn(), Turn::Choice(Symbol::X));
        assert_eq!(game.board(), &Board::try_from("O.. .X. ...").unwrap());
        let game = game.apply(8);
        assert_eq!(game.turn(), Turn::Choice(Symbol::O));
        assert_eq!(game.board(), &Board::try_from("O.. .X. ..X").unwrap());
    }

    #[test]
    fn terminal_freezes_the_turn() {
        // X takes the top row in five plies
        let game = Game::root().apply(0).apply(3).apply(1).apply(4).apply(2);
        assert_eq!(game.turn(), Turn::Terminal);
        assert_eq!(game.outcome().winner(), Some(Symbol::X));
        assert!(game.legal().is_empty());
        assert!(!game.is_allowed(5));
    }

    #[test]
    fn mover_derives_from_mark_counts() {
        assert_eq!(
            Game::try_from("X.. ... ...").unwrap().turn(),
            Turn::Choice(Symbol::O)
        );
        assert_eq!(
            Game::try_from("XO. .X. ...").unwrap().turn(),
            Turn::Choice(Symbol::O)
        );
        assert!(Game::try_from("XX. ... ...").is_err());
        assert!(Game::try_from("O.. ... ...").is_err());
    }

    #[test]
    fn out_of_range_and_occupied_are_disallowed() {
        let game = Game::root().apply(4);
        assert!(!game.is_allowed(4));
        assert!(!game.is_allowed(9));
        assert!(game.is_allowed(0));
    }
}
