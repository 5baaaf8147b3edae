use super::Lobby;
use crate::gameplay::GameError;
use crate::gameroom::*;
use crate::Contact;
use crate::RoomCode;
use crate::ID;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Server side of one WebSocket: frames in, signals out, events back.
///
/// A connection starts uncoupled. `create_room` or `join_room` couples it
/// to exactly one room; every later request must name that room's code or
/// it bounces. Refusals that never reach a room (garbled JSON, unknown or
/// foreign codes) are answered directly on the socket, so a bad frame can
/// never touch game state.
///
/// When the socket dies the coupled room hears a hangup, not a leave: the
/// seat stays bound so the same person can come back on a fresh socket.
pub struct Connection {
    contact: ID<Contact>,
    lobby: Arc<Lobby>,
    events: Channel<Event>,
    room: Option<Coupling>,
    seated: bool,
}

struct Coupling {
    code: RoomCode,
    signals: UnboundedSender<Signal>,
}

impl Connection {
    pub fn spawn(lobby: Arc<Lobby>, session: actix_ws::Session, stream: actix_ws::MessageStream) {
        let connection = Self {
            contact: ID::default(),
            lobby,
            events: Channel::default(),
            room: None,
            seated: false,
        };
        actix_web::rt::spawn(connection.run(session, stream));
    }

    async fn run(mut self, mut session: actix_ws::Session, mut stream: actix_ws::MessageStream) {
        log::info!("[connection {}] opened", self.contact);
        'sesh: loop {
            tokio::select! {
                biased;
                event = self.events.rx().recv() => match event {
                    Some(event) => {
                        self.digest(&event);
                        if session.text(Protocol::encode(&event).to_json()).await.is_err() {
                            break 'sesh;
                        }
                    }
                    None => break 'sesh,
                },
                frame = stream.next() => match frame {
                    Some(Ok(actix_ws::Message::Text(text))) => {
                        if let Some(reply) = self.dispatch(&text).await {
                            if session.text(reply.to_json()).await.is_err() {
                                break 'sesh;
                            }
                        }
                    }
                    Some(Ok(actix_ws::Message::Close(_))) => break 'sesh,
                    Some(Err(_)) => break 'sesh,
                    None => break 'sesh,
                    _ => continue 'sesh,
                },
            }
        }
        self.uncouple();
        log::info!("[connection {}] closed", self.contact);
        let _ = session.close(None).await;
    }
}

impl Connection {
    /// One inbound frame to at most one direct reply. Room-routed requests
    /// reply through the event stream instead.
    async fn dispatch(&mut self, text: &str) -> Option<ServerMessage> {
        match Protocol::decode(text) {
            Err(error) => Some(ServerMessage::error(error.kind(), &error.to_string())),
            Ok(message) => {
                log::debug!("[connection {}] {:?}", self.contact, message);
                match message {
                    ClientMessage::CreateRoom { opponent } => self.create(opponent).await,
                    ClientMessage::JoinRoom { code } => self.join(&code).await,
                    ClientMessage::MakeMove { code, index } => {
                        self.forward(&code, Command::Move(index))
                    }
                    ClientMessage::ResetGame { code } => self.forward(&code, Command::Reset),
                    ClientMessage::LeaveRoom { code } => match self.forward(&code, Command::Leave) {
                        // only a routed leave gives up the coupling; the
                        // room keeps the seat until it hears the command
                        None => {
                            self.room = None;
                            self.seated = false;
                            None
                        }
                        reply => reply,
                    },
                }
            }
        }
    }

    async fn create(&mut self, opponent: Opponent) -> Option<ServerMessage> {
        self.uncouple();
        let code = self
            .lobby
            .clone()
            .open(self.contact, self.events.fork(), opponent)
            .await;
        match self.lobby.signals(code).await {
            Ok(signals) => {
                self.room = Some(Coupling { code, signals });
                None
            }
            Err(_) => Some(Self::unroutable()),
        }
    }

    async fn join(&mut self, code: &str) -> Option<ServerMessage> {
        self.uncouple();
        let Ok(code) = RoomCode::try_from(code) else {
            return Some(Self::unroutable());
        };
        let Ok(signals) = self.lobby.signals(code).await else {
            return Some(Self::unroutable());
        };
        let join = Signal::Join {
            contact: self.contact,
            sender: self.events.fork(),
            remote: true,
        };
        match signals.send(join) {
            Ok(()) => {
                self.room = Some(Coupling { code, signals });
                None
            }
            Err(_) => Some(Self::unroutable()),
        }
    }

    /// Routes a command to the coupled room, provided the named code is the
    /// coupled one. A dead room uncouples on the spot. A coupling still
    /// waiting on its greeting holds no seat, so its commands are judged
    /// here: the room has no reply channel for a contact it never seated,
    /// and every refused request owes its sender exactly one answer.
    fn forward(&mut self, code: &str, command: Command) -> Option<ServerMessage> {
        let named = RoomCode::try_from(code).ok();
        match &self.room {
            Some(coupling) if named == Some(coupling.code) => {
                if !self.seated {
                    return Some(ServerMessage::error(
                        GameError::NotYourTurn.kind(),
                        GameError::NotYourTurn.message(),
                    ));
                }
                let sent = coupling.signals.send(Signal::Command {
                    contact: self.contact,
                    command,
                });
                match sent {
                    Ok(()) => None,
                    Err(_) => {
                        self.room = None;
                        self.seated = false;
                        Some(Self::unroutable())
                    }
                }
            }
            _ => Some(Self::unroutable()),
        }
    }

    /// Event-stream bookkeeping: a greeting proves the seat, and a full-room
    /// refusal before any greeting means the join failed, so the coupling is
    /// abandoned and the connection is free to try elsewhere.
    fn digest(&mut self, event: &Event) {
        match event {
            Event::Created { .. } | Event::Joined { .. } => self.seated = true,
            Event::Rejected(GameError::RoomFull) if !self.seated => self.room = None,
            _ => {}
        }
    }

    /// Tells the coupled room this socket is gone. The seat is kept for a
    /// reconnect; vacating is only ever explicit.
    fn uncouple(&mut self) {
        if let Some(coupling) = self.room.take() {
            let _ = coupling.signals.send(Signal::Hangup {
                contact: self.contact,
            });
            self.seated = false;
        }
    }

    fn unroutable() -> ServerMessage {
        ServerMessage::error(
            GameError::RoomNotFound.kind(),
            GameError::RoomNotFound.message(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fresh_on(lobby: &Arc<Lobby>) -> Connection {
        Connection {
            contact: ID::default(),
            lobby: Arc::clone(lobby),
            events: Channel::default(),
            room: None,
            seated: false,
        }
    }

    fn fresh() -> Connection {
        fresh_on(&Arc::new(Lobby::default()))
    }

    /// Receives and digests, as the run loop does.
    async fn next(connection: &mut Connection) -> Event {
        let event = tokio::time::timeout(Duration::from_secs(1), connection.events.rx().recv())
            .await
            .expect("event within deadline")
            .expect("channel open");
        connection.digest(&event);
        event
    }

    #[tokio::test]
    async fn garbled_frames_are_answered_in_place() {
        let mut connection = fresh();
        let reply = connection.dispatch("not json").await;
        assert!(matches!(
            reply,
            Some(ServerMessage::Error { kind, .. }) if kind == "protocol"
        ));
    }

    #[tokio::test]
    async fn commands_without_a_room_bounce() {
        let mut connection = fresh();
        let frame = ClientMessage::make_move("abc123", 4).to_json();
        assert_eq!(connection.dispatch(&frame).await, Some(Connection::unroutable()));
    }

    #[tokio::test]
    async fn create_couples_and_greets() {
        let mut connection = fresh();
        let frame = ClientMessage::create_room(Opponent::Human).to_json();
        assert_eq!(connection.dispatch(&frame).await, None);
        assert!(connection.room.is_some());
        let greeting = next(&mut connection).await;
        connection.digest(&greeting);
        assert!(matches!(greeting, Event::Created { .. }));
        assert!(connection.seated);
    }

    #[tokio::test]
    async fn joining_a_dead_code_bounces() {
        let mut connection = fresh();
        let frame = ClientMessage::join_room("abc123").to_json();
        assert_eq!(
            connection.dispatch(&frame).await,
            Some(Connection::unroutable())
        );
        assert!(connection.room.is_none());
    }

    #[tokio::test]
    async fn dead_rooms_bounce_and_uncouple() {
        let mut connection = fresh();
        let code = RoomCode::random();
        connection.room = Some(Coupling {
            code,
            signals: Channel::default().fork(),
        });
        connection.seated = true;
        let frame = ClientMessage::make_move(&code.to_string(), 0).to_json();
        assert_eq!(
            connection.dispatch(&frame).await,
            Some(Connection::unroutable())
        );
        assert!(connection.room.is_none());
    }

    #[tokio::test]
    async fn foreign_codes_are_refused() {
        let mut connection = fresh();
        let frame = ClientMessage::create_room(Opponent::Human).to_json();
        connection.dispatch(&frame).await;
        let foreign = ClientMessage::make_move("zzzzzz", 4).to_json();
        assert_eq!(
            connection.dispatch(&foreign).await,
            Some(Connection::unroutable())
        );
    }

    #[tokio::test]
    async fn moves_route_to_the_coupled_room() {
        let mut connection = fresh();
        let frame = ClientMessage::create_room(Opponent::Cpu).to_json();
        connection.dispatch(&frame).await;
        let code = match next(&mut connection).await {
            Event::Created { code, .. } => code.to_string(),
            event => panic!("expected a greeting, got {}", event),
        };
        assert!(matches!(next(&mut connection).await, Event::Started { .. }));
        let frame = ClientMessage::make_move(&code, 4).to_json();
        assert_eq!(connection.dispatch(&frame).await, None);
        assert!(matches!(
            next(&mut connection).await,
            Event::Moved { last: 4, .. }
        ));
    }

    #[tokio::test]
    async fn leaving_uncouples() {
        let mut connection = fresh();
        let frame = ClientMessage::create_room(Opponent::Human).to_json();
        connection.dispatch(&frame).await;
        let code = match next(&mut connection).await {
            Event::Created { code, .. } => code.to_string(),
            event => panic!("expected a greeting, got {}", event),
        };
        let frame = ClientMessage::leave_room(&code).to_json();
        connection.dispatch(&frame).await;
        assert!(connection.room.is_none());
        let frame = ClientMessage::make_move(&code, 0).to_json();
        assert_eq!(connection.dispatch(&frame).await, Some(Connection::unroutable()));
    }

    #[tokio::test]
    async fn misnamed_leave_keeps_the_coupling() {
        let mut connection = fresh();
        let frame = ClientMessage::create_room(Opponent::Human).to_json();
        connection.dispatch(&frame).await;
        assert!(matches!(next(&mut connection).await, Event::Created { .. }));
        let frame = ClientMessage::leave_room("zzzzzz").to_json();
        assert_eq!(
            connection.dispatch(&frame).await,
            Some(Connection::unroutable())
        );
        assert!(connection.room.is_some());
    }

    #[tokio::test]
    async fn pipelined_commands_at_a_full_room_still_get_answers() {
        let lobby = Arc::new(Lobby::default());
        let mut host = fresh_on(&lobby);
        let frame = ClientMessage::create_room(Opponent::Cpu).to_json();
        host.dispatch(&frame).await;
        let code = match next(&mut host).await {
            Event::Created { code, .. } => code.to_string(),
            event => panic!("expected a greeting, got {}", event),
        };
        // a third wheel fires join + move back to back without waiting
        let mut third = fresh_on(&lobby);
        let frame = ClientMessage::join_room(&code).to_json();
        assert_eq!(third.dispatch(&frame).await, None);
        let frame = ClientMessage::make_move(&code, 0).to_json();
        assert!(matches!(
            third.dispatch(&frame).await,
            Some(ServerMessage::Error { kind, .. }) if kind == "not_your_turn"
        ));
        // and the join itself is refused on the event stream
        assert!(matches!(
            next(&mut third).await,
            Event::Rejected(GameError::RoomFull)
        ));
        assert!(third.room.is_none());
    }

    #[tokio::test]
    async fn rejoining_an_expired_room_reports_room_not_found() {
        let lobby = Arc::new(Lobby::new(TimerConfig {
            grace: Duration::from_millis(50),
        }));
        let mut host = fresh_on(&lobby);
        let frame = ClientMessage::create_room(Opponent::Human).to_json();
        host.dispatch(&frame).await;
        let code = match next(&mut host).await {
            Event::Created { code, .. } => code.to_string(),
            event => panic!("expected a greeting, got {}", event),
        };
        // socket drops; the seat waits out the grace alone
        host.uncouple();
        for _ in 0..100 {
            if lobby.count().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(lobby.count().await, 0, "grace never reaped the room");
        let mut back = fresh_on(&lobby);
        let frame = ClientMessage::join_room(&code).to_json();
        assert_eq!(back.dispatch(&frame).await, Some(Connection::unroutable()));
        assert!(back.room.is_none());
    }

    #[tokio::test]
    async fn full_room_refusal_abandons_the_coupling() {
        let mut connection = fresh();
        let refusal = Event::Rejected(GameError::RoomFull);
        connection.room = Some(Coupling {
            code: RoomCode::random(),
            signals: Channel::default().fork(),
        });
        connection.digest(&refusal);
        assert!(connection.room.is_none());
    }
}
