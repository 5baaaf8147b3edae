use crate::board::Symbol;

/// Whose move it is, if anyone's. Terminal games have no mover: once the
/// outcome resolves, the turn freezes and stays unobservable.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Turn {
    Terminal,
    Choice(Symbol),
}

impl Turn {
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Self::Choice(symbol) => Some(*symbol),
            Self::Terminal => None,
        }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Choice(symbol) => write!(f, "{}", symbol),
            Self::Terminal => write!(f, "--"),
        }
    }
}
