use crate::board::Board;
use crate::board::Outcome;
use crate::board::Symbol;
use serde::Deserialize;
use serde::Serialize;

/// Messages sent from server to client over WebSocket.
/// Every state-bearing message carries the whole board, never a diff:
/// clients overwrite what they hold, which makes a lost message or an
/// optimistic guess self-healing on the next broadcast.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Room opened; you are X. Share the code with an opponent.
    RoomCreated {
        code: String,
        seat: usize,
        participants: Vec<String>,
        board: Board,
        turn: Symbol,
    },
    /// You took a seat. `turn` is null when the game already resolved.
    RoomJoined {
        code: String,
        seat: usize,
        participants: Vec<String>,
        board: Board,
        turn: Option<Symbol>,
    },
    /// Both seats bound; play is live from this board.
    GameStarted { board: Board, turn: Symbol },
    /// A move landed; `last_move` is the claimed cell.
    MoveApplied {
        board: Board,
        turn: Symbol,
        last_move: usize,
    },
    /// Resolution. `winner` is `"X"`, `"O"` or `"draw"`;
    /// `winning_line` is null on a draw.
    GameOver {
        board: Board,
        winner: String,
        winning_line: Option<[usize; 3]>,
    },
    /// Rematch granted; X opens again.
    GameReset { board: Board, turn: Symbol },
    /// The other participant left or dropped.
    OpponentLeft { message: String },
    /// A request was refused; `kind` is machine-readable, `message` is not.
    Error { kind: String, message: String },
}

impl ServerMessage {
    pub fn room_created(
        code: &str,
        seat: usize,
        participants: Vec<String>,
        board: Board,
        turn: Symbol,
    ) -> Self {
        Self::RoomCreated {
            code: code.to_string(),
            seat,
            participants,
            board,
            turn,
        }
    }
    pub fn room_joined(
        code: &str,
        seat: usize,
        participants: Vec<String>,
        board: Board,
        turn: Option<Symbol>,
    ) -> Self {
        Self::RoomJoined {
            code: code.to_string(),
            seat,
            participants,
            board,
            turn,
        }
    }
    pub fn game_started(board: Board, turn: Symbol) -> Self {
        Self::GameStarted { board, turn }
    }
    pub fn move_applied(board: Board, turn: Symbol, last_move: usize) -> Self {
        Self::MoveApplied {
            board,
            turn,
            last_move,
        }
    }
    pub fn game_over(board: Board, outcome: Outcome) -> Self {
        Self::GameOver {
            board,
            winner: outcome
                .winner()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "draw".to_string()),
            winning_line: outcome.line(),
        }
    }
    pub fn game_reset(board: Board, turn: Symbol) -> Self {
        Self::GameReset { board, turn }
    }
    pub fn opponent_left(message: &str) -> Self {
        Self::OpponentLeft {
            message: message.to_string(),
        }
    }
    pub fn error(kind: &str, message: &str) -> Self {
        Self::Error {
            kind: kind.to_string(),
            message: message.to_string(),
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize server message")
    }
}

/// What the human opponent seat should be filled with at room creation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opponent {
    /// Wait for a second participant to join by code.
    #[default]
    Human,
    /// Seat the house player immediately.
    Cpu,
}

/// Messages sent from client to server over WebSocket.
/// `code` routes the request; a request carrying a stale or foreign code is
/// refused rather than guessed at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    CreateRoom {
        #[serde(default)]
        opponent: Opponent,
    },
    JoinRoom {
        code: String,
    },
    MakeMove {
        code: String,
        index: usize,
    },
    ResetGame {
        code: String,
    },
    LeaveRoom {
        code: String,
    },
}

impl ClientMessage {
    pub fn create_room(opponent: Opponent) -> Self {
        Self::CreateRoom { opponent }
    }
    pub fn join_room(code: &str) -> Self {
        Self::JoinRoom {
            code: code.to_string(),
        }
    }
    pub fn make_move(code: &str, index: usize) -> Self {
        Self::MakeMove {
            code: code.to_string(),
            index,
        }
    }
    pub fn reset_game(code: &str) -> Self {
        Self::ResetGame {
            code: code.to_string(),
        }
    }
    pub fn leave_room(code: &str) -> Self {
        Self::LeaveRoom {
            code: code.to_string(),
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("serialize client message")
    }
}
