mod error;
mod game;
mod session;
mod turn;

pub use error::*;
pub use game::*;
pub use session::*;
pub use turn::*;
