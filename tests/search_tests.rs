//! Integration tests for the minimax player.
//!
//! Reference positions with known best moves. `X` is always the searching
//! player.

use conquest_rust::board::{Board, Color, Move};
use conquest_rust::game::{GameState, Session};
use conquest_rust::minmax::{Minmax, evaluate};
use conquest_rust::strategy::Strategy;

// =============================================================================
// Helper functions
// =============================================================================

fn state(grid: &str) -> GameState {
    GameState::from_board(grid.parse().expect("test grid should parse"))
}

fn best_move(state: &GameState, level: u32) -> Move {
    Minmax::new(level)
        .get_move(state.board(), Color::First, state)
        .expect("search should find a move")
}

/// Plain minimax without pruning. Returns the value and the number of
/// search calls.
fn exhaustive(
    board: &Board,
    player: Color,
    session: &dyn Session,
    depth: u32,
    maximizing: bool,
) -> (f64, u64) {
    let other = session.other_player(player);
    if depth == 0 || session.is_finished() {
        return (evaluate(board, player, session), 1);
    }
    let moves = if maximizing {
        board.valid_moves(player)
    } else {
        board.valid_moves(other)
    };
    if moves.is_empty() {
        return (evaluate(board, player, session), 1);
    }
    let mut nodes = 1;
    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    for mv in moves {
        let mut next = board.board_copy();
        next.move_pawn(&mv);
        let (score, n) = exhaustive(&next, player, session, depth - 1, !maximizing);
        nodes += n;
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    (best, nodes)
}

fn random_state(rng: &mut fastrand::Rng, size: usize, pawns: usize) -> GameState {
    let mut board = Board::new(size);
    for i in 0..pawns {
        let color = if i % 2 == 0 { Color::First } else { Color::Second };
        let (row, col) = (rng.usize(..size), rng.usize(..size));
        board.set(row, col, Some(color));
    }
    GameState::from_board(board)
}

// =============================================================================
// Known positions
// =============================================================================

#[test]
fn test_depth_1_on_3x3_takes_the_center() {
    let state = GameState::fresh(3);
    let mv = best_move(&state, 1);
    assert!(state.board().is_valid(&mv, Color::First));
    assert_eq!((mv.row2(), mv.col2()), (1, 1));
}

#[test]
fn test_depth_2_on_fresh_5x5() {
    let state = GameState::fresh(5);
    let mv = best_move(&state, 2);
    assert!(state.board().is_valid(&mv, Color::First));
    assert_eq!(mv, Move::new(0, 0, 0, 1));
}

#[test]
fn test_depth_2_after_one_turn() {
    let state = state(
        "X X _ O O
         _ _ _ _ _
         _ _ _ _ _
         _ _ _ _ _
         O _ _ _ X",
    );
    assert_eq!(best_move(&state, 2), Move::new(0, 1, 1, 3));
}

#[test]
fn test_depth_3_after_one_turn() {
    let state = state(
        "X X _ O O
         _ _ _ _ _
         _ _ _ _ _
         _ _ _ _ _
         O _ _ _ X",
    );
    assert_eq!(best_move(&state, 3), Move::new(0, 1, 1, 3));
}

#[test]
fn test_still_moves_when_opponent_is_stuck() {
    let state = state(
        "O O X X X
         O O X X X
         O O X X X
         O O X X _
         O O X X X",
    );
    assert!(state.board().valid_moves(Color::Second).is_empty());
    assert!(!state.is_finished());

    let mv = best_move(&state, 4);
    assert_eq!((mv.row2(), mv.col2()), (3, 4));
}

#[test]
fn test_depth_4_endgame_capture() {
    let state = state(
        "_ X X X O
         X X X X O
         X X X X X
         X O X X X
         O O O _ O",
    );
    assert_eq!(best_move(&state, 4), Move::new(3, 2, 4, 3));
}

#[test]
fn test_search_for_second_player() {
    let state = GameState::fresh(3);
    let mv = Minmax::new(1)
        .get_move(state.board(), Color::Second, &state)
        .expect("a move");
    assert!(state.board().is_valid(&mv, Color::Second));
    assert_eq!((mv.row2(), mv.col2()), (1, 1));
}

// =============================================================================
// Alpha-beta against plain minimax
// =============================================================================

#[test]
fn test_pruning_matches_exhaustive_on_fresh_boards() {
    for (size, max_level) in [(2, 4), (3, 4), (4, 3), (5, 2)] {
        let state = GameState::fresh(size);
        for level in 1..=max_level {
            for player in [Color::First, Color::Second] {
                let report = Minmax::new(level).analyse(state.board(), player, &state);
                let (score, nodes) = exhaustive(state.board(), player, &state, level, true);
                assert_eq!(report.score, score, "size {size} level {level} {player}");
                assert!(report.nodes <= nodes);
            }
        }
    }
}

#[test]
fn test_pruning_matches_exhaustive_on_random_boards() {
    let mut rng = fastrand::Rng::with_seed(0xA7A7);
    for _ in 0..40 {
        let size = rng.usize(3..=4);
        let pawns = rng.usize(2..=6);
        let state = random_state(&mut rng, size, pawns);
        for level in 1..=3 {
            let report = Minmax::new(level).analyse(state.board(), Color::First, &state);
            let (score, nodes) = exhaustive(state.board(), Color::First, &state, level, true);
            assert_eq!(
                report.score, score,
                "level {level} on\n{}",
                state.board()
            );
            assert!(report.nodes <= nodes);
            if let Some(mv) = report.best {
                assert!(state.board().is_valid(&mv, Color::First));
            }
        }
    }
}

#[test]
fn test_root_value_is_the_best_child_value() {
    let state = GameState::fresh(4);
    let level = 2;
    let report = Minmax::new(level).analyse(state.board(), Color::First, &state);
    let best = report.best.expect("a move");

    let mut next = state.board().board_copy();
    next.move_pawn(&best);
    let (child, _) = exhaustive(&next, Color::First, &state, level - 1, false);
    assert_eq!(child, report.score);
}
