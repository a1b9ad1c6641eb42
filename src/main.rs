//! Conquest-Rust: an Ataxx-style game engine.
//!
//! ## Usage
//!
//! - `conquest-rust` - Play a demo game
//! - `conquest-rust ctp` - Start the text protocol engine on stdin/stdout
//! - `conquest-rust demo --opponent minmax` - Watch minimax play itself
//!
//! Logs go to stderr; set `RUST_LOG=debug` to see every search.

use std::io;

use anyhow::{Context, ensure};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use conquest_rust::board::{Board, Color};
use conquest_rust::constants::{DEFAULT_LEVEL, DEFAULT_SIZE, MAX_LEVEL, MAX_SIZE, MIN_SIZE};
use conquest_rust::ctp::CtpEngine;
use conquest_rust::game::{Game, GameState, Player, TurnOutcome};
use conquest_rust::minmax::Minmax;
use conquest_rust::strategy::{Naive, Strategy};

/// Conquest-Rust: an Ataxx-style game with a minimax AI
#[derive(Parser)]
#[command(name = "conquest-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the CTP (Conquest Text Protocol) engine on stdin/stdout
    Ctp {
        /// Board size
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,
        /// Minimax depth
        #[arg(long, default_value_t = DEFAULT_LEVEL)]
        level: u32,
    },
    /// Play a game between the minimax AI (X) and an opponent (O)
    Demo {
        /// Board size
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,
        /// Minimax depth
        #[arg(long, default_value_t = DEFAULT_LEVEL)]
        level: u32,
        /// Seed for the naive opponent
        #[arg(long)]
        seed: Option<u64>,
        /// Who plays O
        #[arg(long, value_enum, default_value_t = Opponent::Naive)]
        opponent: Opponent,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Opponent {
    /// Random legal moves
    Naive,
    /// Minimax at the same level
    Minmax,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Ctp { size, level }) => {
            check_config(size, level)?;
            let mut engine = CtpEngine::with_config(size, level);
            engine
                .run(io::stdin().lock(), io::stdout().lock())
                .context("CTP session failed")?;
        }
        Some(Commands::Demo {
            size,
            level,
            seed,
            opponent,
        }) => {
            check_config(size, level)?;
            run_demo(size, level, seed, opponent)?;
        }
        None => run_demo(DEFAULT_SIZE, DEFAULT_LEVEL, None, Opponent::Naive)?,
    }
    Ok(())
}

fn check_config(size: usize, level: u32) -> anyhow::Result<()> {
    ensure!(
        (MIN_SIZE..=MAX_SIZE).contains(&size),
        "board size must be between {MIN_SIZE} and {MAX_SIZE}, got {size}"
    );
    ensure!(
        (1..=MAX_LEVEL).contains(&level),
        "level must be between 1 and {MAX_LEVEL}, got {level}"
    );
    Ok(())
}

fn run_demo(size: usize, level: u32, seed: Option<u64>, opponent: Opponent) -> anyhow::Result<()> {
    println!("Conquest-Rust: {size}x{size} board, minimax level {level}\n");

    let second: Box<dyn Strategy> = match opponent {
        Opponent::Naive => Box::new(seed.map_or_else(Naive::new, Naive::with_seed)),
        Opponent::Minmax => Box::new(Minmax::new(level)),
    };
    let first: Box<dyn Strategy> = Box::new(Minmax::new(level));

    let mut board = Board::new(size);
    board.init_field(Color::First, Color::Second);
    let state = GameState::new(
        board,
        Player::new(first.name(), Color::First),
        Player::new(second.name(), Color::Second),
    );
    println!("{}\n", state.board());

    let mut game = Game::new(state, first, second);
    let outcome = game
        .run(|state, turn| {
            let player = state.player(state.to_move().opponent());
            match turn {
                TurnOutcome::Moved(mv) => {
                    println!("{} ({}) plays {mv}", player.name(), player.color())
                }
                TurnOutcome::Passed => println!("{} ({}) passes", player.name(), player.color()),
            }
            println!("{}\n", state.board());
        })
        .context("demo game aborted")?;

    match outcome.winner {
        Some(color) => println!(
            "{} ({color}) wins {} to {} after {} turns",
            game.state().player(color).name(),
            outcome.first_pawns.max(outcome.second_pawns),
            outcome.first_pawns.min(outcome.second_pawns),
            outcome.turns
        ),
        None => println!(
            "Draw {} to {} after {} turns",
            outcome.first_pawns, outcome.second_pawns, outcome.turns
        ),
    }
    Ok(())
}
