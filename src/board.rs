//! Conquest board and rules engine.
//!
//! The board is a square grid stored as a flat `Vec` of cells in row-major
//! order. A cell is either empty or owned by one of the two colors; there is
//! no separate pawn identity.
//!
//! Rules:
//! - A pawn moves up to two cells away on each axis, onto an empty cell.
//! - A move of distance 1 on both axes duplicates the pawn (the source keeps
//!   its pawn). A move reaching distance 2 on either axis is a jump and
//!   vacates the source.
//! - After every move, opponent pawns adjacent to the destination (the 3x3
//!   neighborhood) take the mover's color.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::{JUMP_DISTANCE, RENDER_SEPARATOR, SYMBOL_EMPTY, SYMBOL_FIRST, SYMBOL_SECOND};

/// The two sides. `First` is color 1 and renders as `X`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    First,
    Second,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::First => Color::Second,
            Color::Second => Color::First,
        }
    }

    /// Color number: 1 for `First`, 2 for `Second`.
    pub fn number(self) -> u8 {
        match self {
            Color::First => 1,
            Color::Second => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Color::First => SYMBOL_FIRST,
            Color::Second => SYMBOL_SECOND,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Contents of one grid position.
pub type Cell = Option<Color>;

/// Whether a move duplicates the pawn or jumps with it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Clone move: both axis deltas are at most 1, the source keeps its pawn.
    Duplicate,
    /// Either axis delta is 2, the source is vacated.
    Jump,
}

/// A move from a source cell to a destination cell.
///
/// Coordinates are signed so that off-board moves can be represented and
/// rejected by [`Board::is_valid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    row1: i32,
    col1: i32,
    row2: i32,
    col2: i32,
}

impl Move {
    pub const fn new(row1: i32, col1: i32, row2: i32, col2: i32) -> Self {
        Self {
            row1,
            col1,
            row2,
            col2,
        }
    }

    pub fn row1(&self) -> i32 {
        self.row1
    }

    pub fn col1(&self) -> i32 {
        self.col1
    }

    pub fn row2(&self) -> i32 {
        self.row2
    }

    pub fn col2(&self) -> i32 {
        self.col2
    }

    fn row_delta(&self) -> u32 {
        self.row2.abs_diff(self.row1)
    }

    fn col_delta(&self) -> u32 {
        self.col2.abs_diff(self.col1)
    }

    /// Classify the move. Each axis is checked on its own, so a move with a
    /// row delta of 2 and a column delta of 1 is a jump.
    pub fn kind(&self) -> MoveKind {
        let jump = JUMP_DISTANCE.unsigned_abs();
        if self.row_delta() == jump || self.col_delta() == jump {
            MoveKind::Jump
        } else {
            MoveKind::Duplicate
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.row1, self.col1, self.row2, self.col2)
    }
}

/// Error returned when parsing a [`Move`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("expected 4 coordinates, got {0}")]
    WrongArity(usize),
    #[error("invalid coordinate: {0}")]
    InvalidNumber(String),
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parse `r1 c1 r2 c2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != 4 {
            return Err(MoveParseError::WrongArity(parts.len()));
        }
        let mut coords = [0i32; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| MoveParseError::InvalidNumber(part.to_string()))?;
        }
        Ok(Move::new(coords[0], coords[1], coords[2], coords[3]))
    }
}

/// Error returned when parsing a [`Board`] from a text grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("board has no rows")]
    Empty,
    #[error("row {row} has {len} cells, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("unknown cell symbol {0:?}")]
    UnknownSymbol(char),
}

/// A square Conquest board.
///
/// `Clone` copies the whole cell vector, so a cloned board never shares
/// storage with the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board of the given size.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Index of a signed coordinate, or `None` when it is off the board.
    fn index_of(&self, row: i32, col: i32) -> Option<usize> {
        let (row, col) = (usize::try_from(row).ok()?, usize::try_from(col).ok()?);
        if row < self.size && col < self.size {
            Some(self.idx(row, col))
        } else {
            None
        }
    }

    /// Owner of a cell. Off-board coordinates read as empty.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[self.idx(row, col)]
    }

    /// Overwrite a cell.
    ///
    /// # Panics
    /// Panics if the coordinates are off the board.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        assert!(
            row < self.size && col < self.size,
            "({row}, {col}) is off a {0}x{0} board",
            self.size
        );
        let i = self.idx(row, col);
        self.cells[i] = cell;
    }

    /// Place the four starting pawns: `first` at the top-left and
    /// bottom-right corners, `second` at the top-right and bottom-left ones.
    ///
    /// # Panics
    /// Panics on a board of size 0.
    pub fn init_field(&mut self, first: Color, second: Color) {
        let last = self.size - 1;
        self.set(0, 0, Some(first));
        self.set(last, last, Some(first));
        self.set(0, last, Some(second));
        self.set(last, 0, Some(second));
    }

    /// Check whether `player` may play `mv` on this board.
    ///
    /// Both ends must be on the board, the source must hold one of the
    /// player's pawns, the destination must be empty, and each axis delta
    /// must be at most 2. Never panics.
    pub fn is_valid(&self, mv: &Move, player: Color) -> bool {
        let Some(dst) = self.index_of(mv.row2, mv.col2) else {
            return false;
        };
        let Some(src) = self.index_of(mv.row1, mv.col1) else {
            return false;
        };
        if self.cells[src] != Some(player) {
            return false;
        }
        let jump = JUMP_DISTANCE.unsigned_abs();
        if mv.row_delta() > jump || mv.col_delta() > jump {
            return false;
        }
        self.cells[dst].is_none()
    }

    /// Apply a move and convert the opponent pawns around its destination.
    ///
    /// The move must be valid for the owner of its source cell (as returned
    /// by [`Board::valid_moves`] or accepted by [`Board::is_valid`]). This is
    /// not re-checked.
    ///
    /// # Panics
    /// Panics if either end is off the board or the source cell is empty.
    pub fn move_pawn(&mut self, mv: &Move) {
        let (Some(src), Some(dst)) = (
            self.index_of(mv.row1, mv.col1),
            self.index_of(mv.row2, mv.col2),
        ) else {
            panic!("move {mv} is off the board");
        };
        let Some(player) = self.cells[src] else {
            panic!("move {mv} starts from an empty cell");
        };

        if mv.kind() == MoveKind::Jump {
            self.cells[src] = None;
        }
        self.cells[dst] = Some(player);

        let captured = Some(player.opponent());
        for row in mv.row2 - 1..=mv.row2 + 1 {
            for col in mv.col2 - 1..=mv.col2 + 1 {
                if let Some(i) = self.index_of(row, col) {
                    if self.cells[i] == captured {
                        self.cells[i] = Some(player);
                    }
                }
            }
        }
    }

    /// All legal moves of `player`, sources in row-major order, then
    /// destinations in row-major order for each source.
    pub fn valid_moves(&self, player: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.cells[self.idx(row, col)] != Some(player) {
                    continue;
                }
                let (row, col) = (row as i32, col as i32);
                for row2 in row - JUMP_DISTANCE..=row + JUMP_DISTANCE {
                    for col2 in col - JUMP_DISTANCE..=col + JUMP_DISTANCE {
                        let mv = Move::new(row, col, row2, col2);
                        if self.is_valid(&mv, player) {
                            moves.push(mv);
                        }
                    }
                }
            }
        }
        moves
    }

    /// Number of cells owned by `player`.
    pub fn nb_pawns(&self, player: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(player)).count()
    }

    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Independent copy for simulation.
    pub fn board_copy(&self) -> Board {
        self.clone()
    }
}

fn parse_symbol(c: char) -> Result<Cell, BoardParseError> {
    match c {
        'X' | 'x' => Ok(Some(Color::First)),
        'O' | 'o' => Ok(Some(Color::Second)),
        '_' | '.' => Ok(None),
        other => Err(BoardParseError::UnknownSymbol(other)),
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parse a grid of `X`, `O` and `_` (or `.`), one row per line.
    /// Whitespace inside a row and blank lines are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(parse_symbol)
                    .collect::<Result<Vec<Cell>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        if rows.is_empty() {
            return Err(BoardParseError::Empty);
        }
        let size = rows.len();
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size {
                return Err(BoardParseError::NotSquare {
                    row,
                    len: cells.len(),
                    size,
                });
            }
        }

        Ok(Board {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SYMBOL_EMPTY}")?;
        for col in 0..self.size {
            write!(f, "{SYMBOL_EMPTY}{col}")?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{row}|")?;
            for col in 0..self.size {
                let ch = self.cell(row, col).map_or(SYMBOL_EMPTY, Color::symbol);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "{RENDER_SEPARATOR}")
    }
}
