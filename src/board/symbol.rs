use crate::Seat;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Not;

/// One of the two marks. X always moves first and sits at seat 0.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    #[default]
    X,
    O,
}

impl Symbol {
    pub const fn all() -> [Self; 2] {
        [Self::X, Self::O]
    }
    /// Table seat bound to this mark.
    pub const fn seat(&self) -> Seat {
        match self {
            Self::X => 0,
            Self::O => 1,
        }
    }
}

/// opponent
impl Not for Symbol {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

/// seat isomorphism
impl From<Seat> for Symbol {
    fn from(seat: Seat) -> Self {
        match seat {
            0 => Self::X,
            1 => Self::O,
            _ => unreachable!("not a seat index"),
        }
    }
}

/// str isomorphism
impl TryFrom<&str> for Symbol {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim() {
            "X" | "x" => Ok(Self::X),
            "O" | "o" => Ok(Self::O),
            _ => Err(format!("invalid symbol: {}", s)),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
        }
    }
}
