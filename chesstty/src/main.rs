//! ChessTTY - play White (or Black) against a UCI engine from the terminal.
//!
//! Moves are typed as coordinates (`e2e4`), short algebraic text (`e4`, `Nf3`,
//! `exd5`) or with a move number (`1. e4`). `quit` leaves the game and `board`
//! prints the position. Logs go to a daily-rolling file under
//! `CHESSTTY_LOG_DIR` (see [`chesstty::config`]).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chess::PieceColor;
use chesstty::{config, run_session, GameOutcome, SessionSettings};
use clap::{Parser, ValueEnum};
use engine::{EngineConfig, StockfishEngine};
use tokio::io::BufReader;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Top-level CLI arguments for ChessTTY.
#[derive(Parser)]
#[command(name = "chesstty", about = "Play chess against a UCI engine in the terminal")]
struct Cli {
    /// Engine binary. Defaults to `CHESSTTY_ENGINE_PATH`, then a Stockfish probe.
    #[arg(long)]
    engine: Option<PathBuf>,

    /// Engine thinking time per move, in milliseconds.
    #[arg(long)]
    movetime: Option<u64>,

    /// Seconds to wait for any engine reply before giving up.
    #[arg(long)]
    timeout: Option<u64>,

    /// Side you play.
    #[arg(long, value_enum, default_value_t = Side::White)]
    side: Side,

    /// Engine skill level (0-20).
    #[arg(long)]
    skill: Option<u8>,

    /// Engine search threads.
    #[arg(long)]
    threads: Option<u32>,

    /// Engine hash table size in MB.
    #[arg(long)]
    hash: Option<u32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for PieceColor {
    fn from(side: Side) -> Self {
        match side {
            Side::White => PieceColor::White,
            Side::Black => PieceColor::Black,
        }
    }
}

fn init_logging(log_dir: &Path) -> WorkerGuard {
    std::fs::create_dir_all(log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(log_dir, "chesstty");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    guard
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&config::get_log_dir());

    tracing::info!("ChessTTY starting up");

    let engine_config = EngineConfig {
        path: cli.engine.or_else(config::get_engine_path),
        response_timeout: Duration::from_secs(
            cli.timeout.unwrap_or_else(config::get_engine_timeout_secs),
        ),
        skill_level: cli.skill,
        threads: cli.threads,
        hash_mb: cli.hash,
        ..Default::default()
    };
    let settings = SessionSettings {
        human_side: cli.side.into(),
        think_time_ms: cli.movetime.unwrap_or_else(config::get_movetime_ms),
    };

    println!("Welcome to ChessTTY Console Edition ♟");
    println!("Type your move in formats like 'e4', 'e2e4', or '1. e4'. Type 'quit' to exit.");
    println!();

    let mut engine = StockfishEngine::new(engine_config);
    let input = BufReader::new(tokio::io::stdin());
    let summary = run_session(&mut engine, input, tokio::io::stdout(), settings)
        .await
        .context("chess session ended with an error")?;

    tracing::info!(
        "Game finished after {} half-moves: {:?}",
        summary.game.raw_history().len(),
        summary.outcome
    );
    if summary.outcome == GameOutcome::InputClosed {
        println!("Goodbye.");
    }

    Ok(())
}
