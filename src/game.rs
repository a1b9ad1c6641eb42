//! Game session: players, turn order and end-of-game detection.
//!
//! [`GameState`] holds the real game (board, players, side to move) and is
//! the [`Session`] strategies consult while they search. [`Game`] pairs a
//! state with one [`Strategy`] per side and drives a full game.

use thiserror::Error;
use tracing::{info, warn};

use crate::board::{Board, Color, Move};
use crate::constants::max_turns;
use crate::strategy::Strategy;

/// What a strategy needs to know about the game it is playing.
pub trait Session {
    /// The opponent of `player`.
    fn other_player(&self, player: Color) -> Color;
    /// Whether the real game is over.
    fn is_finished(&self) -> bool;
}

/// A named participant. Identity is the color, compared by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    color: Color,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Error returned when a move is submitted to a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("illegal move {mv} for {player}")]
    IllegalMove { mv: Move, player: Color },
    #[error("the game is over")]
    GameOver,
}

/// Result of one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Moved(Move),
    /// The side to move had no legal move.
    Passed,
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    /// `None` on a draw
    pub winner: Option<Color>,
    pub first_pawns: usize,
    pub second_pawns: usize,
    pub turns: usize,
}

/// The state of a real game.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    players: [Player; 2],
    to_move: Color,
    turns: usize,
    finished: bool,
}

impl GameState {
    /// Start a game on `board` with the given players. `Color::First`
    /// moves first.
    pub fn new(board: Board, first: Player, second: Player) -> Self {
        let mut state = Self {
            board,
            players: [first, second],
            to_move: Color::First,
            turns: 0,
            finished: false,
        };
        state.refresh();
        state
    }

    /// Wrap an arbitrary position with default player names.
    pub fn from_board(board: Board) -> Self {
        Self::new(
            board,
            Player::new("X", Color::First),
            Player::new("O", Color::Second),
        )
    }

    /// A new game with the four starting pawns.
    pub fn fresh(size: usize) -> Self {
        let mut board = Board::new(size);
        board.init_field(Color::First, Color::Second);
        Self::from_board(board)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::First => &self.players[0],
            Color::Second => &self.players[1],
        }
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn turns(&self) -> usize {
        self.turns
    }

    /// Validate and apply a move for `player`. The opponent moves next.
    pub fn play(&mut self, player: Color, mv: Move) -> Result<(), PlayError> {
        if self.finished {
            return Err(PlayError::GameOver);
        }
        if !self.board.is_valid(&mv, player) {
            return Err(PlayError::IllegalMove { mv, player });
        }
        self.board.move_pawn(&mv);
        self.end_turn(player);
        Ok(())
    }

    /// Skip the turn of `player`. The opponent moves next.
    pub fn pass(&mut self, player: Color) {
        self.end_turn(player);
    }

    fn end_turn(&mut self, player: Color) {
        self.to_move = player.opponent();
        self.turns += 1;
        self.refresh();
    }

    /// The game ends on a full board, when a side has no pawns left, when
    /// neither side can move, or after the turn limit.
    fn refresh(&mut self) {
        let board = &self.board;
        self.finished = board.is_full()
            || board.nb_pawns(Color::First) == 0
            || board.nb_pawns(Color::Second) == 0
            || self.turns >= max_turns(board.size())
            || (board.valid_moves(Color::First).is_empty()
                && board.valid_moves(Color::Second).is_empty());
    }

    /// The side with more pawns, `None` on equality.
    pub fn winner(&self) -> Option<Color> {
        let first = self.board.nb_pawns(Color::First);
        let second = self.board.nb_pawns(Color::Second);
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => Some(Color::First),
            std::cmp::Ordering::Less => Some(Color::Second),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn outcome(&self) -> GameOutcome {
        GameOutcome {
            winner: self.winner(),
            first_pawns: self.board.nb_pawns(Color::First),
            second_pawns: self.board.nb_pawns(Color::Second),
            turns: self.turns,
        }
    }
}

impl Session for GameState {
    fn other_player(&self, player: Color) -> Color {
        player.opponent()
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

/// A game between two strategies.
pub struct Game {
    state: GameState,
    strategies: [Box<dyn Strategy>; 2],
}

impl Game {
    pub fn new(state: GameState, first: Box<dyn Strategy>, second: Box<dyn Strategy>) -> Self {
        Self {
            state,
            strategies: [first, second],
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Ask the side to move for a move and apply it. A side that has no move
    /// passes.
    pub fn play_turn(&mut self) -> Result<TurnOutcome, PlayError> {
        if self.state.is_finished() {
            return Err(PlayError::GameOver);
        }
        let color = self.state.to_move();
        let strategy = match color {
            Color::First => &mut self.strategies[0],
            Color::Second => &mut self.strategies[1],
        };

        match strategy.get_move(&self.state.board, color, &self.state) {
            Some(mv) => {
                if let Err(err) = self.state.play(color, mv) {
                    warn!(strategy = strategy.name(), %err, "strategy returned a rejected move");
                    return Err(err);
                }
                info!(player = %color, mv = %mv, turn = self.state.turns(), "move played");
                Ok(TurnOutcome::Moved(mv))
            }
            None => {
                if !self.state.board.valid_moves(color).is_empty() {
                    warn!(strategy = strategy.name(), player = %color, "no move returned while moves exist");
                }
                info!(player = %color, turn = self.state.turns(), "pass");
                self.state.pass(color);
                Ok(TurnOutcome::Passed)
            }
        }
    }

    /// Play until the game is over. `on_turn` sees the state after every
    /// turn.
    pub fn run(
        &mut self,
        mut on_turn: impl FnMut(&GameState, &TurnOutcome),
    ) -> Result<GameOutcome, PlayError> {
        while !self.state.is_finished() {
            let turn = self.play_turn()?;
            on_turn(&self.state, &turn);
        }
        let outcome = self.state.outcome();
        info!(
            winner = ?outcome.winner,
            first = outcome.first_pawns,
            second = outcome.second_pawns,
            turns = outcome.turns,
            "game over"
        );
        Ok(outcome)
    }
}
