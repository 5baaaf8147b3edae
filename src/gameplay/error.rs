/// Why a participant request was refused. Every variant maps to exactly one
/// error notification on the wire; none of them mutate session state.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum GameError {
    NotYourTurn,
    CellOccupied,
    OutOfRange,
    NotFinished,
    RoomFull,
    RoomNotFound,
}

impl GameError {
    /// Stable machine-readable discriminant for the wire.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotYourTurn => "not_your_turn",
            Self::CellOccupied => "cell_occupied",
            Self::OutOfRange => "out_of_range",
            Self::NotFinished => "not_finished",
            Self::RoomFull => "room_full",
            Self::RoomNotFound => "room_not_found",
        }
    }
    /// Human-readable explanation shown by thin clients.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NotYourTurn => "It is not your turn",
            Self::CellOccupied => "That cell is already taken",
            Self::OutOfRange => "Cell index must be between 0 and 8",
            Self::NotFinished => "The game is still in progress",
            Self::RoomFull => "That room already has two players",
            Self::RoomNotFound => "No such room",
        }
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for GameError {}
