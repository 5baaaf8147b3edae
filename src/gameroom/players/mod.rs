mod human;
mod novice;
mod oracle;

pub use human::*;
pub use novice::*;
pub use oracle::*;
