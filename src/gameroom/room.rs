use super::*;
use crate::board::Symbol;
use crate::gameplay::GameError;
use crate::gameplay::Session;
use crate::gameplay::Status;
use crate::gameplay::Transition;
use crate::Contact;
use crate::RoomCode;
use crate::Seat;
use crate::ID;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;

/// Central coordinator for one live session.
/// Owns the single source of truth ([`Session`] plus move history) and a
/// private inbox of [`Signal`]s that it drains strictly one at a time.
///
/// Key responsibilities:
/// - Validate every command against the state its predecessor left behind
/// - Broadcast full-snapshot events so clients can always redraw
/// - Refuse bad requests back to the offender alone
/// - Watch for abandonment and close itself after the grace period
///
/// Concurrency discipline: nothing outside the room task ever touches the
/// session. Two moves racing over two sockets arrive as two queued signals;
/// the second is judged against the board the first produced.
pub struct Room {
    code: RoomCode,
    session: Session,
    table: Table,
    timer: Timer,
    channel: Channel<Signal>,
    history: Vec<(Symbol, usize)>,
}

impl Room {
    /// Opens a room with the creator seated at X and greeted with the code.
    pub fn open(
        code: RoomCode,
        creator: ID<Contact>,
        sender: UnboundedSender<Event>,
        remote: bool,
    ) -> Self {
        let mut room = Self {
            code,
            session: Session::new(creator),
            table: Table::default(),
            timer: Timer::with_defaults(),
            channel: Channel::default(),
            history: Vec::new(),
        };
        room.table.sit(0, sender, remote);
        room.table.unicast(0, room.created(0));
        room
    }

    /// Overrides the lifetime timeouts, for tests and local play.
    pub fn with_timer(mut self, config: TimerConfig) -> Self {
        self.timer = Timer::new(config);
        self
    }

    /// Send handle for routing signals into this room.
    pub fn signals(&self) -> UnboundedSender<Signal> {
        self.channel.fork()
    }

    /// Seats an in-process player on the first open seat.
    pub fn seat_actor(&mut self, player: Box<dyn Player>) {
        let contact = ID::default();
        let sender = Actor::spawn(contact, player, self.signals());
        self.admit(contact, sender, false);
    }

    /// Seats the house player opposite the creator.
    pub fn seat_cpu(&mut self) {
        self.seat_actor(Box::new(Oracle::default()));
    }

    /// Drains the inbox until the room decides to close, then reports back.
    pub async fn run(mut self, done: oneshot::Sender<()>) {
        log::info!("[room {}] online", self.code);
        loop {
            let signal = match self.timer.deadline() {
                None => self.channel.rx().recv().await,
                Some(deadline) => tokio::select! {
                    biased;
                    signal = self.channel.rx().recv() => signal,
                    _ = tokio::time::sleep_until(deadline) => {
                        log::info!("[room {}] grace expired", self.code);
                        break;
                    }
                },
            };
            match signal {
                Some(signal) => {
                    if self.handle(signal) {
                        break;
                    }
                }
                None => break,
            }
        }
        log::info!("[room {}] offline", self.code);
        let _ = done.send(());
    }
}

impl Room {
    /// One inbox drain. Returns true when the room should close.
    fn handle(&mut self, signal: Signal) -> bool {
        match signal {
            Signal::Join {
                contact,
                sender,
                remote,
            } => self.admit(contact, sender, remote),
            Signal::Command { contact, command } => {
                log::debug!("[room {}] {} from {}", self.code, command, contact);
                match command {
                    Command::Move(index) => self.play(contact, index),
                    Command::Reset => self.rematch(contact),
                    Command::Leave => self.depart(contact),
                }
            }
            Signal::Hangup { contact } => self.hangup(contact),
        }
    }

    fn admit(
        &mut self,
        contact: ID<Contact>,
        sender: UnboundedSender<Event>,
        remote: bool,
    ) -> bool {
        // a participant re-announcing itself just gets a fresh sync
        if let Some(seat) = self.session.seat_of(contact) {
            self.table.sit(seat, sender, remote);
            self.settle();
            self.table.unicast(seat, self.joined(seat));
            if self.session.status() == Status::Active {
                self.resync();
            }
            return false;
        }
        // a quiet seat is reclaimed before an open one is filled
        if let Some(seat) = self.table.reclaimable() {
            self.session.rebind(seat, contact);
            self.table.sit(seat, sender, remote);
            self.settle();
            self.table.unicast(seat, self.joined(seat));
            if self.session.status() == Status::Active {
                self.resync();
            }
            log::info!("[room {}] seat {} reclaimed", self.code, seat);
            return false;
        }
        let before = self.session.status();
        match self.session.join(contact) {
            Ok(seat) => {
                self.table.sit(seat, sender, remote);
                self.settle();
                self.table.unicast(seat, self.joined(seat));
                if before != Status::Active && self.session.status() == Status::Active {
                    self.resync();
                }
                log::info!("[room {}] contact {} took seat {}", self.code, contact, seat);
            }
            Err(error) => {
                // refused before seating, so reply on the offered channel
                let _ = sender.send(Event::Rejected(error));
            }
        }
        false
    }

    fn play(&mut self, contact: ID<Contact>, index: usize) -> bool {
        let mover = self.session.game().turn().symbol();
        match self.session.apply_move(contact, index) {
            Ok(Transition::Moved { index }) => {
                if let Some(mover) = mover {
                    self.history.push((mover, index));
                }
                self.table.broadcast(Event::Moved {
                    board: *self.session.game().board(),
                    turn: self.turn_now().unwrap_or_default(),
                    last: index,
                });
            }
            Ok(Transition::Ended { index, outcome }) => {
                if let Some(mover) = mover {
                    self.history.push((mover, index));
                }
                log::info!(
                    "[room {}] {} after {} moves",
                    self.code,
                    outcome,
                    self.history.len()
                );
                self.table.broadcast(Event::Over {
                    board: *self.session.game().board(),
                    outcome,
                });
            }
            Ok(Transition::Restarted) => unreachable!("moves never restart a session"),
            Err(error) => self.refuse(contact, error),
        }
        false
    }

    fn rematch(&mut self, contact: ID<Contact>) -> bool {
        match self.session.reset(contact) {
            Ok(_) => {
                self.history.clear();
                log::info!("[room {}] rematch", self.code);
                self.table.broadcast(Event::Reset {
                    board: *self.session.game().board(),
                    turn: self.turn_now().unwrap_or_default(),
                });
            }
            Err(error) => self.refuse(contact, error),
        }
        false
    }

    fn depart(&mut self, contact: ID<Contact>) -> bool {
        let Some(seat) = self.session.seat_of(contact) else {
            log::warn!("[room {}] departure from unseated contact {}", self.code, contact);
            return false;
        };
        self.session.vacate(seat);
        self.table.vacate(seat);
        self.table.broadcast(Event::Left {
            message: "Opponent left the game",
        });
        log::info!("[room {}] seat {} vacated", self.code, seat);
        match self.table.remotes_seated() {
            0 => true,
            _ => {
                self.settle();
                false
            }
        }
    }

    fn hangup(&mut self, contact: ID<Contact>) -> bool {
        let Some(seat) = self.session.seat_of(contact) else {
            return false;
        };
        self.table.disconnect(seat);
        // the quiet seat's sink just died with its socket
        self.table.broadcast_except(seat, Event::Left {
            message: "Opponent disconnected",
        });
        self.settle();
        log::info!("[room {}] seat {} went quiet", self.code, seat);
        false
    }

    /// Arms the grace countdown when every remote participant is gone and
    /// clears it the moment one is back. Rooms with no remote seats at all
    /// (local play) never expire this way.
    fn settle(&mut self) {
        let abandoned =
            self.table.remotes_seated() > 0 && self.table.remotes_connected() == 0;
        match (abandoned, self.timer.deadline()) {
            (true, None) => {
                self.timer.start_grace();
                log::info!(
                    "[room {}] abandoned, closing in {:?}",
                    self.code,
                    self.timer.remaining()
                );
            }
            (false, Some(_)) => self.timer.clear(),
            _ => {}
        }
    }
}

impl Room {
    fn turn_now(&self) -> Option<Symbol> {
        self.session.game().turn().symbol()
    }
    fn contacts(&self) -> Vec<ID<Contact>> {
        self.session.participants().collect()
    }
    fn created(&self, seat: Seat) -> Event {
        Event::Created {
            code: self.code,
            seat,
            contacts: self.contacts(),
            board: *self.session.game().board(),
            turn: self.turn_now().unwrap_or_default(),
        }
    }
    fn joined(&self, seat: Seat) -> Event {
        Event::Joined {
            code: self.code,
            seat,
            contacts: self.contacts(),
            board: *self.session.game().board(),
            turn: self.turn_now(),
        }
    }
    /// Live-board broadcast: game on, from exactly this position.
    fn resync(&self) {
        self.table.broadcast(Event::Started {
            board: *self.session.game().board(),
            turn: self.turn_now().unwrap_or_default(),
        });
    }
    fn refuse(&self, contact: ID<Contact>, error: GameError) {
        match self.session.seat_of(contact) {
            Some(seat) => self.table.unicast(seat, Event::Rejected(error)),
            // connections answer unseated commands before forwarding, so
            // only a stray in-process sender can land here
            None => log::warn!(
                "[room {}] refused unseated contact {}: {}",
                self.code,
                contact,
                error
            ),
        }
    }
}
