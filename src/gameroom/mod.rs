mod actor;
mod channel;
mod command;
mod event;
mod message;
mod player;
mod players;
mod protocol;
mod room;
mod table;
mod timer;

pub use actor::*;
pub use channel::*;
pub use command::*;
pub use event::*;
pub use message::*;
pub use player::*;
pub use players::*;
pub use protocol::*;
pub use room::*;
pub use table::*;
pub use timer::*;
