use super::Command;
use super::Event;

/// Trait for in-process participants: the CPU opponent, the terminal
/// player, or anything else that can hold a seat without a socket.
///
/// The room never asks anyone to move. It broadcasts what happened, and a
/// player that wants to act volunteers a [`Command`] in response; the room
/// then validates that command like any other, so a buggy player is refused
/// exactly like a buggy remote client would be.
///
/// The async design allows:
/// - CPU players to run their search without stalling the room loop
/// - Human players to await terminal input without blocking anyone
#[async_trait::async_trait]
pub trait Player: Send {
    /// Digest an event, optionally volunteering a command in response.
    async fn react(&mut self, event: &Event) -> Option<Command>;
}
