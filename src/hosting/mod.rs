mod connection;
mod lobby;
mod server;

pub use connection::*;
pub use lobby::*;
pub use server::*;
