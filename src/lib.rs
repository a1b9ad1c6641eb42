//! Conquest-Rust: an Ataxx-style territory game with a minimax opponent.
//!
//! Two players move pawns on a square board. A pawn either duplicates into
//! an adjacent cell or jumps two cells away, and every opponent pawn next to
//! the landing cell changes sides. The AI picks its moves with a
//! depth-limited minimax search using alpha-beta pruning.
//!
//! ## Modules
//!
//! - [`constants`] - Default sizes, search limits and render symbols
//! - [`board`] - Rules engine (validation, moves, captures, enumeration)
//! - [`minmax`] - Minimax search with alpha-beta pruning
//! - [`strategy`] - The `Strategy` trait and the random opponent
//! - [`game`] - Game session, turn order and end-of-game detection
//! - [`ctp`] - Conquest Text Protocol engine
//!
//! ## Example
//!
//! ```
//! use conquest_rust::board::Color;
//! use conquest_rust::game::GameState;
//! use conquest_rust::minmax::Minmax;
//! use conquest_rust::strategy::Strategy;
//!
//! // Start a game on a 5x5 board
//! let mut state = GameState::fresh(5);
//!
//! // Search two plies deep for the first player
//! let mut ai = Minmax::new(2);
//! let mv = ai.get_move(state.board(), Color::First, &state).unwrap();
//! assert_eq!(mv.to_string(), "0 0 0 1");
//!
//! state.play(Color::First, mv).unwrap();
//! println!("{}", state.board());
//! ```

pub mod board;
pub mod constants;
pub mod ctp;
pub mod game;
pub mod minmax;
pub mod strategy;
