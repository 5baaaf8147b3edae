use super::Symbol;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::fmt::Display;
use std::fmt::Formatter;

/// A single square on the board. Serializes the way clients expect a board
/// array to look: `null` when empty, `"X"` or `"O"` when marked.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Mark(Symbol),
}

impl Cell {
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
    pub const fn symbol(&self) -> Option<Symbol> {
        match self {
            Self::Empty => None,
            Self::Mark(symbol) => Some(*symbol),
        }
    }
}

/// option isomorphism
impl From<Option<Symbol>> for Cell {
    fn from(symbol: Option<Symbol>) -> Self {
        match symbol {
            None => Self::Empty,
            Some(symbol) => Self::Mark(symbol),
        }
    }
}
impl From<Cell> for Option<Symbol> {
    fn from(cell: Cell) -> Self {
        cell.symbol()
    }
}

/// char isomorphism
impl TryFrom<char> for Cell {
    type Error = String;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'X' | 'x' => Ok(Self::Mark(Symbol::X)),
            'O' | 'o' => Ok(Self::Mark(Symbol::O)),
            '.' | '_' | '-' => Ok(Self::Empty),
            _ => Err(format!("invalid cell: {}", c)),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.symbol().serialize(serializer)
    }
}
impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Symbol>::deserialize(deserializer).map(Self::from)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "."),
            Self::Mark(symbol) => write!(f, "{}", symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_empty() {
        assert!(Cell::default().is_empty());
    }

    #[test]
    fn serializes_as_nullable_symbol() {
        assert_eq!(serde_json::to_string(&Cell::Empty).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&Cell::Mark(Symbol::X)).unwrap(),
            "\"X\""
        );
        assert_eq!(serde_json::from_str::<Cell>("null").unwrap(), Cell::Empty);
        assert_eq!(
            serde_json::from_str::<Cell>("\"O\"").unwrap(),
            Cell::Mark(Symbol::O)
        );
    }
}
