mod minimax;

pub use minimax::*;
