//! Move selection strategies.
//!
//! A strategy looks at the board and picks a move for one side. The game
//! loop and the protocol engine only talk to this trait, so the minimax AI
//! and the random opponent are interchangeable.

use crate::board::{Board, Color, Move};
use crate::game::Session;

/// Something that can choose a move for a player.
pub trait Strategy {
    /// Pick a move for `player`, or `None` when it has nothing to play.
    ///
    /// A returned move is always valid on `board` for `player`.
    fn get_move(&mut self, board: &Board, player: Color, session: &dyn Session) -> Option<Move>;

    /// Short name used in logs and game summaries.
    fn name(&self) -> &str;
}

/// Plays a uniformly random legal move.
pub struct Naive {
    rng: fastrand::Rng,
}

impl Default for Naive {
    fn default() -> Self {
        Self::new()
    }
}

impl Naive {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Deterministic variant, for reproducible games and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Strategy for Naive {
    fn get_move(&mut self, board: &Board, player: Color, _session: &dyn Session) -> Option<Move> {
        self.rng.choice(board.valid_moves(player))
    }

    fn name(&self) -> &str {
        "naive"
    }
}
