use crate::gameroom::*;
use crate::Contact;
use crate::RoomCode;
use crate::ID;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;
use tokio::sync::RwLock;

/// Handle to a running room: just enough to route signals into it.
pub struct RoomHandle {
    pub code: RoomCode,
    pub signals: UnboundedSender<Signal>,
}

/// Registry of live rooms, keyed by code.
///
/// The lobby owns nothing about game state. It mints unique codes under the
/// write lock, spawns each room as its own task, and reaps the entry when
/// the room reports itself done, whether that was a departure or a grace
/// expiry.
pub struct Lobby {
    rooms: RwLock<HashMap<RoomCode, RoomHandle>>,
    timer: TimerConfig,
}

impl Default for Lobby {
    fn default() -> Self {
        Self::new(TimerConfig::default())
    }
}

impl Lobby {
    /// Registry whose rooms live by the given timeouts.
    pub fn new(timer: TimerConfig) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            timer,
        }
    }

    /// Opens a room for `creator`, optionally seating the house opposite.
    /// Returns the fresh code; the greeting arrives on `sender`.
    pub async fn open(
        self: Arc<Self>,
        creator: ID<Contact>,
        sender: UnboundedSender<Event>,
        opponent: Opponent,
    ) -> RoomCode {
        let mut rooms = self.rooms.write().await;
        let code = std::iter::repeat_with(RoomCode::random)
            .find(|code| !rooms.contains_key(code))
            .expect("code space dwarfs live rooms");
        let mut room = Room::open(code, creator, sender, true).with_timer(self.timer);
        if let Opponent::Cpu = opponent {
            room.seat_cpu();
        }
        rooms.insert(
            code,
            RoomHandle {
                code,
                signals: room.signals(),
            },
        );
        drop(rooms);
        let (done_tx, done_rx) = oneshot::channel();
        tokio::spawn(room.run(done_tx));
        let lobby = Arc::clone(&self);
        tokio::spawn(async move {
            let _ = done_rx.await;
            lobby.close(code).await;
        });
        log::info!("[lobby] opened room {}", code);
        code
    }

    /// Signal inlet for a live room.
    pub async fn signals(&self, code: RoomCode) -> anyhow::Result<UnboundedSender<Signal>> {
        self.rooms
            .read()
            .await
            .get(&code)
            .map(|handle| handle.signals.clone())
            .ok_or_else(|| anyhow::anyhow!("room {} not found", code))
    }

    /// Drops a room from the registry. Idempotent.
    pub async fn close(&self, code: RoomCode) {
        if self.rooms.write().await.remove(&code).is_some() {
            log::info!("[lobby] closed room {}", code);
        }
    }

    pub async fn count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc::unbounded_channel;

    #[tokio::test]
    async fn open_registers_and_greets() {
        let lobby = Arc::new(Lobby::default());
        let (tx, mut rx) = unbounded_channel();
        let code = lobby
            .clone()
            .open(ID::default(), tx, Opponent::Human)
            .await;
        assert!(lobby.signals(code).await.is_ok());
        assert_eq!(lobby.count().await, 1);
        let greeting = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(greeting, Event::Created { .. }));
    }

    #[tokio::test]
    async fn codes_never_collide_in_the_registry() {
        let lobby = Arc::new(Lobby::default());
        let (tx, _rx) = unbounded_channel();
        let a = lobby.clone().open(ID::default(), tx.clone(), Opponent::Human).await;
        let b = lobby.clone().open(ID::default(), tx, Opponent::Human).await;
        assert_ne!(a, b);
        assert_eq!(lobby.count().await, 2);
    }

    #[tokio::test]
    async fn finished_rooms_reap_their_entry() {
        let lobby = Arc::new(Lobby::default());
        let (tx, _rx) = unbounded_channel();
        let creator = ID::default();
        let code = lobby.clone().open(creator, tx, Opponent::Human).await;
        let signals = lobby.signals(code).await.unwrap();
        signals
            .send(Signal::Command {
                contact: creator,
                command: Command::Leave,
            })
            .unwrap();
        for _ in 0..100 {
            if lobby.signals(code).await.is_err() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("room was never reaped");
    }
}
