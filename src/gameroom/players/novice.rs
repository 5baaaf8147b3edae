use crate::board::Symbol;
use crate::gameplay::Game;
use crate::gameroom::*;
use rand::seq::IndexedRandom;

/// Beatable house player that picks any legal cell. Same reactive contract
/// as the searching one, none of the judgement.
pub struct Novice(Symbol);

impl Novice {
    pub fn new(symbol: Symbol) -> Self {
        Self(symbol)
    }

    /// PRNG seeded by hashing the position, so the same board always
    /// draws the same cell.
    fn rng(&self, game: &Game) -> rand::rngs::SmallRng {
        use rand::SeedableRng;
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hash;
        use std::hash::Hasher;
        let ref mut hasher = DefaultHasher::new();
        game.hash(hasher);
        rand::rngs::SmallRng::seed_from_u64(hasher.finish())
    }
}

impl Default for Novice {
    fn default() -> Self {
        Self(Symbol::O)
    }
}

#[async_trait::async_trait]
impl Player for Novice {
    async fn react(&mut self, event: &Event) -> Option<Command> {
        match event {
            Event::Started { board, turn }
            | Event::Moved { board, turn, .. }
            | Event::Reset { board, turn }
                if *turn == self.0 =>
            {
                let game = Game::from((*board, *turn));
                let ref mut rng = self.rng(&game);
                game.legal().choose(rng).copied().map(Command::Move)
            }
            _ => None,
        }
    }
}
