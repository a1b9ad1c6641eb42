//! Conquest Text Protocol (CTP).
//!
//! A line protocol modeled on GTP version 2 so the engine can be driven by
//! scripts or a front end. Each command may start with a numeric id; the
//! answer starts with `=` (success) or `?` (failure), followed by the id and
//! the message, and ends with a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <n>` - Start a new game on an n x n board
//! - `clear_board` - Restart the game on the current board size
//! - `level <n>` - Set the minimax depth
//! - `play <color> <r1> <c1> <r2> <c2>` - Play a move
//! - `genmove <color>` - Let the AI choose and play a move (`pass` if none)
//! - `valid_moves <color>` - List legal moves, one per line
//! - `score` - Pawn count of both sides
//! - `showboard` - Render the board
//!
//! Colors are `x`, `1` or `first` for the first player and `o`, `2` or
//! `second` for the other one.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::board::{Color, Move, MoveParseError};
use crate::constants::{DEFAULT_LEVEL, DEFAULT_SIZE, MAX_LEVEL, MAX_SIZE, MIN_SIZE};
use crate::game::{GameState, PlayError, Session};
use crate::minmax::Minmax;
use crate::strategy::Strategy;

/// The list of known CTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "genmove",
    "known_command",
    "level",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "score",
    "showboard",
    "valid_moves",
    "version",
];

/// Failure of a CTP command. The message is sent after the `?` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CtpError {
    #[error("missing argument")]
    MissingArgument,
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("unacceptable size {0}, expected {min} to {max}", min = MIN_SIZE, max = MAX_SIZE)]
    InvalidSize(String),
    #[error("unacceptable level {0}, expected 1 to {max}", max = MAX_LEVEL)]
    InvalidLevel(String),
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveParseError),
    #[error("{0}")]
    Rejected(#[from] PlayError),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// CTP engine state.
pub struct CtpEngine {
    /// Current game
    state: GameState,
    /// AI used by `genmove`
    ai: Minmax,
}

impl Default for CtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CtpEngine {
    /// Create an engine with the default board size and level.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_SIZE, DEFAULT_LEVEL)
    }

    pub fn with_config(size: usize, level: u32) -> Self {
        Self {
            state: GameState::fresh(size),
            ai: Minmax::new(level),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!(%command, ?args, "ctp command");
            let response = self.execute(&command, args);

            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            match response {
                Ok(message) => writeln!(output, "={id_str} {message}\n")?,
                Err(err) => writeln!(output, "?{id_str} {err}\n")?,
            }
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    fn parse_color(arg: Option<&&str>) -> Result<Color, CtpError> {
        let arg = arg.ok_or(CtpError::MissingArgument)?;
        match arg.to_lowercase().as_str() {
            "x" | "1" | "first" => Ok(Color::First),
            "o" | "2" | "second" => Ok(Color::Second),
            _ => Err(CtpError::InvalidColor(arg.to_string())),
        }
    }

    /// Execute a CTP command and return the response message.
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<String, CtpError> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("1".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = args.first().ok_or(CtpError::MissingArgument)?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "boardsize" => {
                let arg = args.first().ok_or(CtpError::MissingArgument)?;
                match arg.parse::<usize>() {
                    Ok(size) if (MIN_SIZE..=MAX_SIZE).contains(&size) => {
                        self.state = GameState::fresh(size);
                        Ok(String::new())
                    }
                    _ => Err(CtpError::InvalidSize(arg.to_string())),
                }
            }

            "clear_board" => {
                self.state = GameState::fresh(self.state.board().size());
                Ok(String::new())
            }

            "level" => {
                let arg = args.first().ok_or(CtpError::MissingArgument)?;
                match arg.parse::<u32>() {
                    Ok(level) if (1..=MAX_LEVEL).contains(&level) => {
                        self.ai = Minmax::new(level);
                        Ok(String::new())
                    }
                    _ => Err(CtpError::InvalidLevel(arg.to_string())),
                }
            }

            "play" => {
                let color = Self::parse_color(args.first())?;
                let mv: Move = args.get(1..).unwrap_or_default().join(" ").parse()?;
                self.state.play(color, mv)?;
                Ok(String::new())
            }

            "genmove" => {
                let color = Self::parse_color(args.first())?;
                if self.state.is_finished() {
                    return Err(PlayError::GameOver.into());
                }
                match self.ai.get_move(self.state.board(), color, &self.state) {
                    Some(mv) => {
                        self.state.play(color, mv)?;
                        Ok(mv.to_string())
                    }
                    None => {
                        self.state.pass(color);
                        Ok("pass".to_string())
                    }
                }
            }

            "valid_moves" => {
                let color = Self::parse_color(args.first())?;
                let moves: Vec<String> = self
                    .state
                    .board()
                    .valid_moves(color)
                    .iter()
                    .map(Move::to_string)
                    .collect();
                Ok(moves.join("\n"))
            }

            "score" => {
                let board = self.state.board();
                Ok(format!(
                    "{} {} {} {}",
                    Color::First,
                    board.nb_pawns(Color::First),
                    Color::Second,
                    board.nb_pawns(Color::Second)
                ))
            }

            "showboard" => Ok(format!("\n{}", self.state.board())),

            _ => Err(CtpError::UnknownCommand(command.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = CtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = CtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_name_command() {
        let mut engine = CtpEngine::new();
        assert_eq!(engine.execute("name", &[]), Ok("conquest-rust".to_string()));
    }

    #[test]
    fn test_known_command() {
        let mut engine = CtpEngine::new();
        assert_eq!(engine.execute("known_command", &["genmove"]), Ok("true".to_string()));
        assert_eq!(engine.execute("known_command", &["komi"]), Ok("false".to_string()));
        assert_eq!(engine.execute("known_command", &[]), Err(CtpError::MissingArgument));
    }

    #[test]
    fn test_boardsize() {
        let mut engine = CtpEngine::new();
        assert!(engine.execute("boardsize", &["5"]).is_ok());
        assert_eq!(engine.state().board().size(), 5);
        assert_eq!(
            engine.execute("boardsize", &["1"]),
            Err(CtpError::InvalidSize("1".to_string()))
        );
        assert_eq!(
            engine.execute("boardsize", &["big"]),
            Err(CtpError::InvalidSize("big".to_string()))
        );
    }

    #[test]
    fn test_level() {
        let mut engine = CtpEngine::new();
        assert!(engine.execute("level", &["3"]).is_ok());
        assert_eq!(engine.ai.level(), 3);
        assert!(engine.execute("level", &["0"]).is_err());
        assert!(engine.execute("level", &["99"]).is_err());
    }

    #[test]
    fn test_play_and_clear() {
        let mut engine = CtpEngine::with_config(5, 2);
        assert!(engine.execute("play", &["x", "0", "0", "1", "1"]).is_ok());
        assert_eq!(engine.state().turns(), 1);
        assert_eq!(engine.state().board().nb_pawns(Color::First), 3);

        assert!(engine.execute("clear_board", &[]).is_ok());
        assert_eq!(engine.state().turns(), 0);
        assert_eq!(engine.state().board().nb_pawns(Color::First), 2);
    }

    #[test]
    fn test_play_errors() {
        let mut engine = CtpEngine::with_config(5, 2);
        assert_eq!(
            engine.execute("play", &["z", "0", "0", "1", "1"]),
            Err(CtpError::InvalidColor("z".to_string()))
        );
        assert_eq!(
            engine.execute("play", &["x", "0", "0", "1"]),
            Err(CtpError::InvalidMove(MoveParseError::WrongArity(3)))
        );
        assert!(matches!(
            engine.execute("play", &["o", "0", "0", "1", "1"]),
            Err(CtpError::Rejected(PlayError::IllegalMove { .. }))
        ));
    }

    #[test]
    fn test_genmove_plays_the_search_result() {
        let mut engine = CtpEngine::with_config(5, 2);
        assert_eq!(engine.execute("genmove", &["x"]), Ok("0 0 0 1".to_string()));
        assert_eq!(engine.state().board().cell(0, 1), Some(Color::First));
        assert_eq!(engine.state().to_move(), Color::Second);
    }

    #[test]
    fn test_genmove_pass_leaves_the_other_side_to_move() {
        let mut engine = CtpEngine::new();
        let board = "OOXXX\nOOXXX\nOOXXX\nOOXX_\nOOXXX".parse().unwrap();
        engine.state = GameState::from_board(board);
        assert_eq!(engine.state().to_move(), Color::First);

        assert_eq!(engine.execute("genmove", &["o"]), Ok("pass".to_string()));
        assert_eq!(engine.state().to_move(), Color::First);
        assert_eq!(engine.state().turns(), 1);

        assert_eq!(engine.execute("genmove", &["x"]), Ok("2 3 3 4".to_string()));
        assert_eq!(engine.state().to_move(), Color::Second);
    }

    #[test]
    fn test_score_and_showboard() {
        let mut engine = CtpEngine::with_config(3, 1);
        assert_eq!(engine.execute("score", &[]), Ok("X 2 O 2".to_string()));
        assert_eq!(
            engine.execute("showboard", &[]),
            Ok("\n__0_1_2\n0|X _ O \n1|_ _ _ \n2|O _ X \n---".to_string())
        );
    }

    #[test]
    fn test_run_session() {
        let mut engine = CtpEngine::with_config(3, 1);
        let input = "1 name\n\n# comment\nbogus\n2 genmove x\nquit\nname\n";
        let mut output = Vec::new();
        engine.run(input.as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "=1 conquest-rust\n\n? unknown command: bogus\n\n=2 0 0 1 1\n\n= \n\n"
        );
    }
}
