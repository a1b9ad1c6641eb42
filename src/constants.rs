//! Constants for board dimensions, search limits, and rendering.
//!
//! The board size is chosen at runtime (the protocol and the CLI can change
//! it), so this module only holds the defaults and the bounds.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN) used by the CLI and the protocol engine.
pub const DEFAULT_SIZE: usize = 7;

/// Smallest board where the four starting corners are distinct.
pub const MIN_SIZE: usize = 2;

/// Largest board accepted by the protocol and the CLI.
pub const MAX_SIZE: usize = 26;

/// Maximum per-axis distance of a move. A move reaching this distance on
/// either axis is a jump.
pub const JUMP_DISTANCE: i32 = 2;

/// Maximum game length (3 times board area, jumps can cycle forever).
pub const fn max_turns(size: usize) -> usize {
    size * size * 3
}

// =============================================================================
// Search Parameters
// =============================================================================

/// Default minimax depth.
pub const DEFAULT_LEVEL: u32 = 2;

/// Deepest search the CLI and the protocol allow. Every ply clones the board
/// once per candidate move, so the tree grows very fast past this.
pub const MAX_LEVEL: u32 = 6;

// =============================================================================
// Rendering
// =============================================================================

/// Pawn of color 1.
pub const SYMBOL_FIRST: char = 'X';

/// Pawn of the other color.
pub const SYMBOL_SECOND: char = 'O';

/// Empty cell.
pub const SYMBOL_EMPTY: char = '_';

/// Last line of a rendered board.
pub const RENDER_SEPARATOR: &str = "---";
