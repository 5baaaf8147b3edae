use super::Command;
use super::Event;
use super::Player;
use super::Signal;
use crate::Contact;
use crate::ID;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

/// Wrapper that runs a [`Player`] in its own async task, so a slow reaction
/// (a search, a human) never holds up the room it sits in.
///
/// - Room broadcasts an Event to the actor's inbox
/// - Actor forwards it to Player::react
/// - Any volunteered Command goes back to the room as a Signal
///
/// The task winds down when the room drops the inbox, which happens when
/// the seat is vacated or the room closes.
pub struct Actor {
    contact: ID<Contact>,
    player: Box<dyn Player>,
    getter: UnboundedReceiver<Event>,
    sender: UnboundedSender<Signal>,
}

impl Actor {
    pub fn spawn(
        contact: ID<Contact>,
        player: Box<dyn Player>,
        sender: UnboundedSender<Signal>,
    ) -> UnboundedSender<Event> {
        let (tx, rx) = unbounded_channel();
        let actor = Self {
            contact,
            player,
            sender,
            getter: rx,
        };
        tokio::spawn(actor.run());
        tx
    }
    async fn run(mut self) {
        while let Some(ref event) = self.getter.recv().await {
            if let Some(command) = self.player.react(event).await {
                self.volunteer(command);
            }
        }
        log::debug!("[actor {}] inbox closed, winding down", self.contact);
    }
    fn volunteer(&self, command: Command) {
        let _ = self.sender.send(Signal::Command {
            contact: self.contact,
            command,
        });
    }
}
