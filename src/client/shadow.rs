use crate::board::Board;
use crate::board::Symbol;
use crate::gameroom::ServerMessage;
use crate::CELLS;
use crate::SEATS;

/// Client-side mirror of a room, fed one server frame at a time.
///
/// Two layers: the last authoritative snapshot, and an optional speculative
/// overlay from an optimistic local move. Every accepted frame replaces the
/// authoritative layer wholesale and discards the overlay, so the mirror can
/// never drift. At worst it is one frame behind; it is never wrong.
///
/// A refused move needs no special handling: the refusal arrives as a frame,
/// the frame drops the overlay, and the authoritative board shows through
/// again.
#[derive(Debug, Default, Clone)]
pub struct Shadow {
    code: Option<String>,
    me: Option<Symbol>,
    peers: Vec<String>,
    board: Board,
    guess: Option<Board>,
    turn: Option<Symbol>,
    live: bool,
    winner: Option<String>,
    line: Option<[usize; 3]>,
    notice: Option<String>,
}

impl Shadow {
    /// Overwrites local state with whatever the server said. Idempotent:
    /// replaying a frame lands on the same state.
    pub fn accept(&mut self, message: &ServerMessage) {
        self.guess = None;
        match message {
            ServerMessage::RoomCreated {
                code,
                seat,
                participants,
                board,
                ..
            } => {
                // an out-of-table seat is a server bug; drop the frame
                let Some(me) = Symbol::all().get(*seat).copied() else {
                    return;
                };
                self.code = Some(code.clone());
                self.me = Some(me);
                self.peers = participants.clone();
                self.board = *board;
                self.turn = None;
                self.live = false;
                self.winner = None;
                self.line = None;
                self.notice = None;
            }
            ServerMessage::RoomJoined {
                code,
                seat,
                participants,
                board,
                turn,
            } => {
                let Some(me) = Symbol::all().get(*seat).copied() else {
                    return;
                };
                self.code = Some(code.clone());
                self.me = Some(me);
                self.peers = participants.clone();
                self.board = *board;
                self.turn = *turn;
                // play is live only once the server says it has started
                self.live = false;
                self.winner = None;
                self.line = None;
                self.notice = None;
            }
            ServerMessage::GameStarted { board, turn }
            | ServerMessage::GameReset { board, turn } => {
                self.board = *board;
                self.turn = Some(*turn);
                self.live = true;
                self.winner = None;
                self.line = None;
                self.notice = None;
            }
            ServerMessage::MoveApplied { board, turn, .. } => {
                self.board = *board;
                self.turn = Some(*turn);
                self.live = true;
            }
            ServerMessage::GameOver {
                board,
                winner,
                winning_line,
            } => {
                self.board = *board;
                self.turn = None;
                self.live = false;
                self.winner = Some(winner.clone());
                self.line = *winning_line;
            }
            ServerMessage::OpponentLeft { message } => {
                self.live = false;
                self.notice = Some(message.clone());
            }
            ServerMessage::Error { .. } => {}
        }
    }

    /// Speculatively claims a cell before the server confirms. Guarded by
    /// the same rules the server will apply, so a successful guess is only
    /// overturned by a race. Refuses a second guess while one is in flight.
    pub fn predict(&mut self, index: usize) -> bool {
        match self.me {
            Some(me)
                if self.live
                    && self.guess.is_none()
                    && self.winner.is_none()
                    && self.turn == Some(me)
                    && index < CELLS
                    && self.board.get(index).is_empty() =>
            {
                self.guess = Some(self.board.mark(index, me));
                true
            }
            _ => false,
        }
    }

    /// Drops the in-flight guess, exposing the authoritative board again.
    pub fn rollback(&mut self) {
        self.guess = None;
    }
}

impl Shadow {
    /// The board to draw: the guess while one is in flight, else truth.
    pub fn board(&self) -> Board {
        self.guess.unwrap_or(self.board)
    }
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
    pub fn mark(&self) -> Option<Symbol> {
        self.me
    }
    pub fn turn(&self) -> Option<Symbol> {
        self.turn
    }
    pub fn my_turn(&self) -> bool {
        self.live && self.guess.is_none() && self.winner.is_none() && self.turn == self.me
    }
    pub fn full(&self) -> bool {
        self.peers.len() == SEATS
    }
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }
    pub fn line(&self) -> Option<[usize; 3]> {
        self.line
    }
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seated() -> Shadow {
        let mut shadow = Shadow::default();
        shadow.accept(&ServerMessage::room_created(
            "abc123",
            0,
            vec!["host".into()],
            Board::empty(),
            Symbol::X,
        ));
        shadow.accept(&ServerMessage::game_started(Board::empty(), Symbol::X));
        shadow
    }

    #[test]
    fn waits_for_the_start_frame() {
        let mut shadow = Shadow::default();
        shadow.accept(&ServerMessage::room_created(
            "abc123",
            0,
            vec!["host".into()],
            Board::empty(),
            Symbol::X,
        ));
        assert_eq!(shadow.code(), Some("abc123"));
        assert_eq!(shadow.mark(), Some(Symbol::X));
        assert!(!shadow.my_turn());
        shadow.accept(&ServerMessage::game_started(Board::empty(), Symbol::X));
        assert!(shadow.my_turn());
    }

    #[test]
    fn out_of_table_seat_frame_is_dropped() {
        let mut shadow = Shadow::default();
        shadow.accept(&ServerMessage::room_created(
            "abc123",
            5,
            vec!["host".into()],
            Board::empty(),
            Symbol::X,
        ));
        assert_eq!(shadow.code(), None);
        assert_eq!(shadow.mark(), None);
        shadow.accept(&ServerMessage::room_joined(
            "abc123",
            5,
            vec!["host".into()],
            Board::empty(),
            Some(Symbol::X),
        ));
        assert_eq!(shadow.mark(), None);
    }

    #[test]
    fn mirrors_every_snapshot() {
        let mut shadow = seated();
        let board = Board::try_from(".../.X./...").unwrap();
        shadow.accept(&ServerMessage::move_applied(board, Symbol::O, 4));
        assert_eq!(shadow.board(), board);
        assert_eq!(shadow.turn(), Some(Symbol::O));
        assert!(!shadow.my_turn());
    }

    #[test]
    fn guess_overlays_until_the_server_confirms() {
        let mut shadow = seated();
        assert!(shadow.predict(4));
        assert!(!shadow.board().get(4).is_empty());
        assert!(!shadow.my_turn());
        let confirmed = Board::empty().mark(4, Symbol::X);
        shadow.accept(&ServerMessage::move_applied(confirmed, Symbol::O, 4));
        assert_eq!(shadow.board(), confirmed);
    }

    #[test]
    fn wire_frames_land_exactly() {
        let mut shadow = seated();
        let board = Board::try_from("XO. .X. ...").unwrap();
        let json = ServerMessage::move_applied(board, Symbol::O, 4).to_json();
        let frame: ServerMessage = serde_json::from_str(&json).unwrap();
        shadow.accept(&frame);
        assert_eq!(shadow.board(), board);
        assert_eq!(shadow.turn(), Some(Symbol::O));
    }

    #[test]
    fn refusal_frame_drops_the_guess() {
        let mut shadow = seated();
        assert!(shadow.predict(4));
        shadow.accept(&ServerMessage::error("cell_occupied", "That cell is already taken"));
        assert!(shadow.board().get(4).is_empty());
        assert!(shadow.my_turn());
    }

    #[test]
    fn rollback_is_explicit_too() {
        let mut shadow = seated();
        assert!(shadow.predict(0));
        shadow.rollback();
        assert!(shadow.board().get(0).is_empty());
    }

    #[test]
    fn prediction_respects_the_rules() {
        let mut shadow = seated();
        assert!(!shadow.predict(9), "out of range");
        assert!(shadow.predict(4));
        assert!(!shadow.predict(5), "one guess in flight");
        let taken = Board::empty().mark(4, Symbol::X);
        shadow.accept(&ServerMessage::move_applied(taken, Symbol::O, 4));
        assert!(!shadow.predict(4), "cell occupied");
        assert!(!shadow.predict(5), "not my turn");
    }

    #[test]
    fn resolution_freezes_the_mirror() {
        let mut shadow = seated();
        let board = Board::try_from("XXX OO. ...").unwrap();
        shadow.accept(&ServerMessage::game_over(
            board,
            crate::board::Outcome::from(&board),
        ));
        assert_eq!(shadow.winner(), Some("X"));
        assert_eq!(shadow.line(), Some([0, 1, 2]));
        assert!(!shadow.my_turn());
        assert!(!shadow.predict(5));
    }

    #[test]
    fn rematch_clears_the_slate() {
        let mut shadow = seated();
        let board = Board::try_from("XXX OO. ...").unwrap();
        shadow.accept(&ServerMessage::game_over(
            board,
            crate::board::Outcome::from(&board),
        ));
        shadow.accept(&ServerMessage::game_reset(Board::empty(), Symbol::X));
        assert_eq!(shadow.winner(), None);
        assert_eq!(shadow.line(), None);
        assert!(shadow.my_turn());
    }

    #[test]
    fn departure_pauses_play() {
        let mut shadow = seated();
        shadow.accept(&ServerMessage::opponent_left("Opponent left the game"));
        assert_eq!(shadow.notice(), Some("Opponent left the game"));
        assert!(!shadow.my_turn());
        shadow.accept(&ServerMessage::game_started(Board::empty(), Symbol::X));
        assert_eq!(shadow.notice(), None);
        assert!(shadow.my_turn());
    }
}
