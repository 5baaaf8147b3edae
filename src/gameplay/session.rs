use super::Game;
use super::GameError;
use crate::board::Outcome;
use crate::Contact;
use crate::Seat;
use crate::CELLS;
use crate::ID;
use crate::SEATS;

/// Lifecycle of a session. `Waiting` means not enough participants to play,
/// `Active` means both seats are bound and the game is live, `Finished` means
/// the outcome has resolved and only a reset can continue play.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Status {
    #[default]
    Waiting,
    Active,
    Finished,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Active => write!(f, "active"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// What an accepted play request did to the session. Callers turn these into
/// broadcast events; the session itself never talks to a channel, which is
/// what keeps it unit-testable with plain assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Claimed a cell; the game continues.
    Moved { index: usize },
    /// Claimed a cell and the game resolved.
    Ended { index: usize, outcome: Outcome },
    /// Fresh board, same seats.
    Restarted,
}

/// The authoritative state of one room's play: who holds which seat, the
/// live [`Game`], and where the session is in its lifecycle.
///
/// Seats are positional and permanent: seat 0 marks X, seat 1 marks O. The
/// session validates every request against the state left by the previous
/// one and refuses with a [`GameError`] without touching anything, so a
/// rejected request is unobservable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    seats: [Option<ID<Contact>>; SEATS],
    game: Game,
    status: Status,
}

impl Session {
    /// Opens with the creator holding seat 0, awaiting an opponent.
    pub fn new(creator: ID<Contact>) -> Self {
        Self {
            seats: [Some(creator), None],
            game: Game::root(),
            status: Status::Waiting,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn seat_of(&self, contact: ID<Contact>) -> Option<Seat> {
        self.seats.iter().position(|seat| *seat == Some(contact))
    }
    pub fn contact_at(&self, seat: Seat) -> Option<ID<Contact>> {
        self.seats.get(seat).copied().flatten()
    }
    /// Bound contacts in seat order.
    pub fn participants(&self) -> impl Iterator<Item = ID<Contact>> + '_ {
        self.seats.iter().flatten().copied()
    }
    pub fn is_full(&self) -> bool {
        self.seats.iter().all(|seat| seat.is_some())
    }
}

impl Session {
    /// Binds `contact` to the first open seat and returns it. Joining a
    /// session you already sit in is a no-op resync rather than an error.
    pub fn join(&mut self, contact: ID<Contact>) -> Result<Seat, GameError> {
        if let Some(seat) = self.seat_of(contact) {
            return Ok(seat);
        }
        let seat = self
            .seats
            .iter()
            .position(|seat| seat.is_none())
            .ok_or(GameError::RoomFull)?;
        self.seats[seat] = Some(contact);
        self.restate();
        Ok(seat)
    }

    /// Rebinds a still-occupied seat to a fresh contact, for a participant
    /// coming back on a new connection. Lifecycle is untouched.
    pub fn rebind(&mut self, seat: Seat, contact: ID<Contact>) {
        debug_assert!(self.seats[seat].is_some(), "rebinding an open seat");
        self.seats[seat] = Some(contact);
    }

    /// Releases a seat. A live game falls back to `Waiting` until the seat
    /// refills; a finished one stays finished.
    pub fn vacate(&mut self, seat: Seat) {
        self.seats[seat] = None;
        self.restate();
    }

    /// Claims `index` for the mover. Checks run in full before any mutation:
    /// a refused move leaves the session exactly as the previous accepted
    /// request left it.
    pub fn apply_move(
        &mut self,
        contact: ID<Contact>,
        index: usize,
    ) -> Result<Transition, GameError> {
        let seat = self.seat_of(contact).ok_or(GameError::NotYourTurn)?;
        if self.status != Status::Active {
            return Err(GameError::NotYourTurn);
        }
        let mover = self
            .game
            .turn()
            .symbol()
            .ok_or(GameError::NotYourTurn)?;
        if mover.seat() != seat {
            return Err(GameError::NotYourTurn);
        }
        if index >= CELLS {
            return Err(GameError::OutOfRange);
        }
        if !self.game.board().get(index).is_empty() {
            return Err(GameError::CellOccupied);
        }
        self.game = self.game.apply(index);
        self.restate();
        match self.status {
            Status::Finished => Ok(Transition::Ended {
                index,
                outcome: self.game.outcome(),
            }),
            _ => Ok(Transition::Moved { index }),
        }
    }

    /// Clears the board for a rematch with the same seats. Only a finished,
    /// fully seated session can restart; X opens again.
    pub fn reset(&mut self, contact: ID<Contact>) -> Result<Transition, GameError> {
        self.seat_of(contact).ok_or(GameError::NotYourTurn)?;
        if self.status != Status::Finished || !self.is_full() {
            return Err(GameError::NotFinished);
        }
        self.game = Game::root();
        self.status = Status::Active;
        Ok(Transition::Restarted)
    }

    /// Lifecycle follows the game and the seats; a resolved outcome pins the
    /// session to `Finished` regardless of who is still around.
    fn restate(&mut self) {
        self.status = match (self.game.outcome().is_terminal(), self.is_full()) {
            (true, _) => Status::Finished,
            (false, true) => Status::Active,
            (false, false) => Status::Waiting,
        };
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}/{}] {}", self.game, self.participants().count(), SEATS, self.status)
    }
}
