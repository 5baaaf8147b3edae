//! Authoritative tic-tac-toe game server with an optimal CPU opponent.
//!
//! Two remote participants, or one participant versus the computer, play on a
//! 3×3 board with server-owned turn enforcement and real-time sync over
//! WebSocket. Every room runs as its own async task; moves are validated
//! serially against the live session state, so two racing clients can never
//! observe or corrupt each other's half-applied moves.
//!
//! ## Architecture
//!
//! - [`board`] — Cells, symbols, the 3×3 board, and win/draw evaluation
//! - [`gameplay`] — The session state machine: seats, turns, move legality
//! - [`search`] — Exhaustive minimax with alpha-beta pruning for the CPU seat
//! - [`gameroom`] — Per-room actor, participant actors, events, wire protocol
//! - [`client`] — Client-side shadow state with optimistic-update rollback
//! - [`hosting`] — Room registry and the actix-web/WebSocket shell

pub mod board;
pub mod client;
pub mod gameplay;
pub mod gameroom;
pub mod hosting;
pub mod search;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Seat index at the table (0 = X, 1 = O).
pub type Seat = usize;

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Number of seats in a room.
pub const SEATS: usize = 2;
/// Number of cells on the board.
pub const CELLS: usize = 9;
/// Seconds a room with zero connected participants survives awaiting a rejoin.
pub const GRACE_SECS: u64 = 30;

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Marker for connection identities: one `ID<Contact>` per live connection
/// (or per CPU participant standing in for one).
pub struct Contact;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
}

impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// ============================================================================
// ROOM TOKENS
// ============================================================================
/// Alphabet for room codes: lowercase base-36, short enough to read aloud.
const CHARSET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";
/// Length of a room code.
const CODE_LEN: usize = 6;

/// Opaque room token. Short and typeable, unlike a full UUID; uniqueness is
/// enforced by the registry, which retries generation under its write lock.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoomCode([u8; CODE_LEN]);

impl RoomCode {
    /// Draws a fresh random code. Not guaranteed unique; the registry is.
    pub fn random() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        Self([(); CODE_LEN].map(|_| CHARSET[rng.random_range(0..CHARSET.len())]))
    }
}

/// str isomorphism, case-insensitive on the way in
impl TryFrom<&str> for RoomCode {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim().to_lowercase();
        if s.len() != CODE_LEN {
            return Err(format!("invalid room code length: {}", s));
        }
        let bytes = s.as_bytes();
        if bytes.iter().any(|b| !CHARSET.contains(b)) {
            return Err(format!("invalid room code charset: {}", s));
        }
        let mut code = [0u8; CODE_LEN];
        code.copy_from_slice(bytes);
        Ok(Self(code))
    }
}

impl Display for RoomCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(std::str::from_utf8(&self.0).unwrap_or("??????"))
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
pub fn kys() {
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.unwrap();
        println!();
        log::warn!("violent interrupt received, exiting immediately");
        std::process::exit(0);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_code_str_bijection() {
        let code = RoomCode::random();
        assert_eq!(code, RoomCode::try_from(code.to_string().as_str()).unwrap());
    }

    #[test]
    fn room_code_rejects_bad_input() {
        assert!(RoomCode::try_from("short").is_err());
        assert!(RoomCode::try_from("toolongcode").is_err());
        assert!(RoomCode::try_from("abc!23").is_err());
    }

    #[test]
    fn room_code_forgives_case_and_padding() {
        let code = RoomCode::try_from("  ABC123 ").unwrap();
        assert_eq!(code.to_string(), "abc123");
    }

    #[test]
    fn contact_ids_are_distinct() {
        assert_ne!(ID::<Contact>::default(), ID::<Contact>::default());
    }
}
