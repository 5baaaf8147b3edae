use crate::board::Outcome;
use crate::board::Symbol;
use crate::gameplay::Game;
use crate::gameplay::Turn;

/// Search refused to run. Asking for a move on a resolved board (won or
/// full) is a caller bug, not a position with a best move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    Settled,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Settled => write!(f, "search invoked on a settled board"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Exhaustive game-tree search from the mover's point of view.
///
/// The tree is tiny (9! bounded), so no depth cutoff and no heuristic
/// evaluation: every leaf is a true outcome. Scores are depth-weighted so a
/// win in one ply beats a win in three, and a forced loss gets dragged out
/// as long as possible. Candidate moves are generated in ascending cell
/// order and only a strictly better score displaces the incumbent, which
/// makes the chosen move deterministic for a given position. Alpha-beta
/// pruning skips branches that cannot change that choice.
pub struct Minimax;

impl Minimax {
    const WIN: i8 = 10;

    /// Best cell for the mover. The game tree is searched to the bottom, so
    /// "best" is exact, not estimated.
    pub fn best_move(game: Game) -> Result<usize, SearchError> {
        match game.turn() {
            Turn::Terminal => Err(SearchError::Settled),
            Turn::Choice(me) => {
                let mut alpha = i8::MIN;
                let mut best: Option<(usize, i8)> = None;
                for index in game.legal() {
                    let score = Self::score(game.apply(index), me, 1, alpha, i8::MAX);
                    if best.is_none_or(|(_, top)| score > top) {
                        best = Some((index, score));
                        alpha = alpha.max(score);
                    }
                }
                Ok(best
                    .map(|(index, _)| index)
                    .expect("unsettled boards have moves"))
            }
        }
    }

    fn score(game: Game, me: Symbol, depth: i8, mut alpha: i8, mut beta: i8) -> i8 {
        match game.outcome() {
            Outcome::Draw => 0,
            Outcome::Won { winner, .. } => match winner == me {
                true => Self::WIN - depth,
                false => depth - Self::WIN,
            },
            Outcome::InProgress => match game.turn() == Turn::Choice(me) {
                true => {
                    let mut best = i8::MIN;
                    for index in game.legal() {
                        best = best.max(Self::score(game.apply(index), me, depth + 1, alpha, beta));
                        alpha = alpha.max(best);
                        if beta <= alpha {
                            break;
                        }
                    }
                    best
                }
                false => {
                    let mut best = i8::MAX;
                    for index in game.legal() {
                        best = best.min(Self::score(game.apply(index), me, depth + 1, alpha, beta));
                        beta = beta.min(best);
                        if beta <= alpha {
                            break;
                        }
                    }
                    best
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best(s: &str) -> usize {
        Minimax::best_move(Game::try_from(s).unwrap()).unwrap()
    }

    #[test]
    fn takes_the_immediate_win() {
        // X completes the top row rather than anything slower
        assert_eq!(best("XX. OO. ..."), 2);
    }

    #[test]
    fn blocks_the_open_threat() {
        // O must deny X the top row whether the block saves the game
        // (center held) or merely drags the loss out (center open)
        assert_eq!(best("XX. .O. ..."), 2);
        assert_eq!(best("XX. O.. ..."), 2);
    }

    #[test]
    fn prefers_the_faster_win() {
        // cell 0 forks and forces a win two plies later; cell 8 wins now.
        // the later win sits at the higher index, so depth must outrank
        // both move order and mere inevitability
        assert_eq!(best("..X OOX ..."), 8);
    }

    #[test]
    fn answers_a_corner_with_the_center() {
        // every other reply loses against perfect play
        assert_eq!(best("X.. ... ..."), 4);
    }

    #[test]
    fn opens_deterministically() {
        // all nine openings draw; ties resolve to the lowest index
        assert_eq!(Minimax::best_move(Game::root()), Ok(0));
    }

    #[test]
    fn perfect_play_always_draws() {
        for opening in 0..crate::CELLS {
            let mut game = Game::root().apply(opening);
            while game.turn() != Turn::Terminal {
                game = game.apply(Minimax::best_move(game).unwrap());
            }
            assert_eq!(game.outcome(), Outcome::Draw, "opening {}", opening);
        }
    }

    #[test]
    fn settled_boards_are_unsearchable() {
        let won = Game::try_from("XXX OO. ...").unwrap();
        let drawn = Game::try_from("XOX OOX XXO").unwrap();
        assert_eq!(Minimax::best_move(won), Err(SearchError::Settled));
        assert_eq!(Minimax::best_move(drawn), Err(SearchError::Settled));
    }
}
