use super::Board;
use super::Symbol;
use std::fmt::Display;
use std::fmt::Formatter;

/// Resolution of a board. Evaluation scans [`Board::LINES`] in declaration
/// order and reports the first completed line it finds, so a board that
/// somehow completes two lines at once always resolves the same way. The win
/// scan runs before the full-board check: a ninth move that completes a line
/// is a win, never a draw.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Outcome {
    #[default]
    InProgress,
    Won { winner: Symbol, line: [usize; 3] },
    Draw,
}

impl Outcome {
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
    pub const fn winner(&self) -> Option<Symbol> {
        match self {
            Self::Won { winner, .. } => Some(*winner),
            _ => None,
        }
    }
    pub const fn line(&self) -> Option<[usize; 3]> {
        match self {
            Self::Won { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<&Board> for Outcome {
    fn from(board: &Board) -> Self {
        for line in Board::LINES {
            let [a, b, c] = line.map(|index| board.get(index).symbol());
            if let Some(winner) = a {
                if b == Some(winner) && c == Some(winner) {
                    return Self::Won { winner, line };
                }
            }
        }
        match board.is_full() {
            true => Self::Draw,
            false => Self::InProgress,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Draw => write!(f, "draw"),
            Self::Won { winner, line } => {
                write!(f, "{} wins {}-{}-{}", winner, line[0], line[1], line[2])
            }
        }
    }
}
