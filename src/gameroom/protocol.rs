use super::ClientMessage;
use super::Event;
use super::ServerMessage;

/// A frame that could not be understood. Refusal happens before any room
/// sees the request, so a garbled frame can never touch game state.
#[derive(Debug, Clone)]
pub enum ProtocolError {
    Malformed(String),
}

impl ProtocolError {
    /// Wire discriminant, alongside the game-level error kinds.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "protocol",
        }
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(s) => write!(f, "malformed message: {}", s),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Translation between internal room events and the JSON wire format.
/// Centralizes the protocol layer so neither rooms nor connections ever
/// touch serde themselves.
pub struct Protocol;

impl Protocol {
    /// Converts an internal Event to a wire ServerMessage.
    pub fn encode(event: &Event) -> ServerMessage {
        match event {
            Event::Created {
                code,
                seat,
                contacts,
                board,
                turn,
            } => ServerMessage::room_created(
                &code.to_string(),
                *seat,
                contacts.iter().map(|c| c.to_string()).collect(),
                *board,
                *turn,
            ),
            Event::Joined {
                code,
                seat,
                contacts,
                board,
                turn,
            } => ServerMessage::room_joined(
                &code.to_string(),
                *seat,
                contacts.iter().map(|c| c.to_string()).collect(),
                *board,
                *turn,
            ),
            Event::Started { board, turn } => ServerMessage::game_started(*board, *turn),
            Event::Moved { board, turn, last } => ServerMessage::move_applied(*board, *turn, *last),
            Event::Over { board, outcome } => ServerMessage::game_over(*board, *outcome),
            Event::Reset { board, turn } => ServerMessage::game_reset(*board, *turn),
            Event::Left { message } => ServerMessage::opponent_left(message),
            Event::Rejected(error) => ServerMessage::error(error.kind(), error.message()),
        }
    }

    /// Parses a client frame into a ClientMessage.
    pub fn decode(s: &str) -> Result<ClientMessage, ProtocolError> {
        serde_json::from_str(s).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::board::Outcome;
    use crate::board::Symbol;
    use crate::gameplay::GameError;

    #[test]
    fn decode_valid_frames() {
        assert!(Protocol::decode(r#"{"type":"create_room"}"#).is_ok());
        assert!(Protocol::decode(r#"{"type":"join_room","code":"abc123"}"#).is_ok());
        assert!(Protocol::decode(r#"{"type":"make_move","code":"abc123","index":4}"#).is_ok());
        assert!(Protocol::decode(r#"{"type":"reset_game","code":"abc123"}"#).is_ok());
        assert!(Protocol::decode(r#"{"type":"leave_room","code":"abc123"}"#).is_ok());
    }

    #[test]
    fn decode_garbage_frames() {
        assert!(Protocol::decode("").is_err());
        assert!(Protocol::decode("not json").is_err());
        assert!(Protocol::decode(r#"{"type":"shoot_moon"}"#).is_err());
        assert!(Protocol::decode(r#"{"type":"make_move","code":"abc123"}"#).is_err());
        assert!(Protocol::decode(r#"{"type":"make_move","code":"abc123","index":-1}"#).is_err());
    }

    #[test]
    fn encode_rejections_as_errors() {
        let message = Protocol::encode(&Event::Rejected(GameError::NotYourTurn));
        assert_eq!(
            message,
            ServerMessage::error("not_your_turn", "It is not your turn")
        );
    }

    #[test]
    fn encode_resolution_with_line() {
        let board = Board::try_from("XXX OO. ...").unwrap();
        let message = Protocol::encode(&Event::Over {
            board,
            outcome: Outcome::from(&board),
        });
        assert_eq!(
            message,
            ServerMessage::GameOver {
                board,
                winner: Symbol::X.to_string(),
                winning_line: Some([0, 1, 2]),
            }
        );
    }
}
