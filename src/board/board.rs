use super::Cell;
use super::Symbol;
use crate::CELLS;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;

/// The 3×3 grid, indexed 0..9 row-major:
///
/// ```text
///  0 | 1 | 2
///  3 | 4 | 5
///  6 | 7 | 8
/// ```
///
/// Boards are small enough to live on the stack and copy freely, so mutation
/// is functional: [`Board::mark`] returns the successor board and leaves the
/// original untouched. On the wire a board is exactly the nine-element array
/// of `null | "X" | "O"` that clients render from.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([Cell; CELLS]);

impl Board {
    /// All eight winning lines, in the order they are checked:
    /// rows, then columns, then diagonals.
    pub const LINES: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8],
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8],
        [0, 4, 8],
        [2, 4, 6],
    ];

    pub const fn empty() -> Self {
        Self([Cell::Empty; CELLS])
    }

    pub fn get(&self, index: usize) -> Cell {
        self.0[index]
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.0.iter().copied()
    }

    /// Indices of unmarked cells, ascending.
    pub fn empties(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|cell| !cell.is_empty())
    }

    pub fn count(&self, symbol: Symbol) -> usize {
        self.0
            .iter()
            .filter(|cell| cell.symbol() == Some(symbol))
            .count()
    }

    /// Successor board with `symbol` written at `index`.
    /// Caller validates legality; writing over a mark is a logic error.
    pub fn mark(mut self, index: usize, symbol: Symbol) -> Self {
        debug_assert!(index < CELLS, "cell index out of range");
        debug_assert!(self.0[index].is_empty(), "cell already marked");
        self.0[index] = Cell::Mark(symbol);
        self
    }
}

/// str isomorphism, e.g. "XO._X...O", "XO. _X. ..O", or "XO./_X./..O"
impl TryFrom<&str> for Board {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .map(Cell::try_from)
            .collect::<Result<Vec<Cell>, String>>()?;
        cells
            .try_into()
            .map(Self)
            .map_err(|_| format!("expected {} cells: {}", CELLS, s))
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, cell) in self.0.iter().enumerate() {
            if index > 0 && index % 3 == 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}
