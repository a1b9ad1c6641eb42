//! Minimax search with alpha-beta pruning.
//!
//! The search explores the game tree to a fixed depth (the difficulty
//! level). Every simulated move is played on its own copy of the board, so
//! sibling branches never share state.
//!
//! Leaves are scored from the root player's point of view at every ply:
//! `root pawns - other pawns`. The score is not negated for the side to move,
//! so this is plain minimax rather than negamax.
//!
//! Scores are whole pawn counts held in `f64` so that the initial window can
//! be `(-inf, +inf)`.

use tracing::debug;

use crate::board::{Board, Color, Move};
use crate::game::Session;
use crate::strategy::Strategy;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchReport {
    /// Best move at the root, `None` when the player cannot move or the
    /// level is 0
    pub best: Option<Move>,
    /// Minimax value of the root position
    pub score: f64,
    /// Number of search calls made
    pub nodes: u64,
}

/// Minimax player with a fixed search depth.
#[derive(Debug, Clone)]
pub struct Minmax {
    level: u32,
}

impl Minmax {
    /// Create a player searching `level` plies deep. Level 0 never returns
    /// a move.
    pub fn new(level: u32) -> Self {
        Self { level }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Search from `board` for `player` and report the best root move along
    /// with the root value.
    pub fn analyse(&self, board: &Board, player: Color, session: &dyn Session) -> SearchReport {
        let root = board.board_copy();
        let mut search = Search {
            session,
            level: self.level,
            nodes: 0,
        };
        let (score, best) = search.minimax(
            &root,
            player,
            f64::NEG_INFINITY,
            f64::INFINITY,
            self.level,
            true,
        );

        debug!(
            level = self.level,
            nodes = search.nodes,
            score,
            best = ?best.map(|mv| mv.to_string()),
            "search finished"
        );

        SearchReport {
            best,
            score,
            nodes: search.nodes,
        }
    }
}

impl Strategy for Minmax {
    fn get_move(&mut self, board: &Board, player: Color, session: &dyn Session) -> Option<Move> {
        self.analyse(board, player, session).best
    }

    fn name(&self) -> &str {
        "minmax"
    }
}

/// Pawn difference between `player` and the other player of the session.
pub fn evaluate(board: &Board, player: Color, session: &dyn Session) -> f64 {
    let other = session.other_player(player);
    board.nb_pawns(player) as f64 - board.nb_pawns(other) as f64
}

/// State of one root search.
struct Search<'a> {
    session: &'a dyn Session,
    level: u32,
    nodes: u64,
}

impl Search<'_> {
    /// Returns the value of `board` and, at the root ply only, the first move
    /// reaching that value.
    fn minimax(
        &mut self,
        board: &Board,
        player: Color,
        mut alpha: f64,
        mut beta: f64,
        depth: u32,
        maximizing: bool,
    ) -> (f64, Option<Move>) {
        self.nodes += 1;

        let other = self.session.other_player(player);
        let player_moves = board.valid_moves(player);
        let other_moves = board.valid_moves(other);

        if depth == 0 || self.session.is_finished() {
            return (evaluate(board, player, self.session), None);
        }

        if maximizing {
            if player_moves.is_empty() {
                return (evaluate(board, player, self.session), None);
            }
            let is_root = depth == self.level;
            let mut max_eval = f64::NEG_INFINITY;
            let mut best = None;
            for mv in player_moves {
                let mut next = board.board_copy();
                next.move_pawn(&mv);
                let (eval, _) = self.minimax(&next, player, alpha, beta, depth - 1, false);
                // Strict comparison: on ties the earlier move stays.
                if is_root && eval > max_eval {
                    best = Some(mv);
                }
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            (max_eval, best)
        } else {
            if other_moves.is_empty() {
                return (evaluate(board, player, self.session), None);
            }
            let mut min_eval = f64::INFINITY;
            for mv in other_moves {
                let mut next = board.board_copy();
                next.move_pawn(&mv);
                let (eval, _) = self.minimax(&next, player, alpha, beta, depth - 1, true);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            (min_eval, None)
        }
    }
}
