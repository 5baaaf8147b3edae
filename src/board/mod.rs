mod board;
mod cell;
mod evaluator;
mod symbol;

pub use board::*;
pub use cell::*;
pub use evaluator::*;
pub use symbol::*;
