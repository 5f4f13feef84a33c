//! Turn orchestration between the local player and the engine.
//!
//! The session alternates between two waits: a line of user input and the
//! engine's best move. Nothing else runs in between. Human moves go through
//! notation resolution and ownership validation; engine moves are applied as
//! reported.

use chess::{render_board, Game, GameError, PieceColor};
use engine::uci::NO_MOVE;
use engine::{EngineBridge, EngineError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

pub const QUIT_COMMAND: &str = "quit";
pub const BOARD_COMMAND: &str = "board";
pub const PROMPT: &str = "Your move (e.g. e4, e2e4, 1. e4): ";

/// Default engine thinking time per move.
pub const DEFAULT_THINK_TIME_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Side the local player controls.
    pub human_side: PieceColor,
    pub think_time_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            human_side: PieceColor::White,
            think_time_ms: DEFAULT_THINK_TIME_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingHumanMove,
    AwaitingEngineMove,
    Terminated(GameOutcome),
}

/// How a session ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// The user typed the quit command.
    Quit,
    /// The engine answered with no move.
    EngineResigned,
    /// User input reached end of file.
    InputClosed,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to start engine: {0}")]
    Startup(#[source] EngineError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not apply engine move: {0}")]
    EngineMove(#[from] GameError),
}

/// Final state of a session that ended without error.
#[derive(Debug)]
pub struct SessionSummary {
    pub outcome: GameOutcome,
    pub game: Game,
}

pub struct GameSession<R, W> {
    game: Game,
    settings: SessionSettings,
    input: Lines<R>,
    output: W,
    state: SessionState,
}

impl<R, W> GameSession<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(input: R, output: W, settings: SessionSettings) -> Self {
        // White always moves first
        let state = match settings.human_side {
            PieceColor::White => SessionState::AwaitingHumanMove,
            PieceColor::Black => SessionState::AwaitingEngineMove,
        };
        Self {
            game: Game::new(),
            settings,
            input: input.lines(),
            output,
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn into_game(self) -> Game {
        self.game
    }

    /// Handshake, readiness check and initial position.
    pub async fn initialize<E>(&mut self, engine: &mut E) -> Result<(), SessionError>
    where
        E: EngineBridge + ?Sized,
    {
        tracing::debug!("Sending 'uci' command");
        engine.send("uci").await?;
        engine.await_response().await?;
        engine.apply_options().await?;

        tracing::debug!("Sending 'isready' command");
        engine.send("isready").await?;
        engine.await_response().await?;
        engine.set_position("").await?;

        let side = self.settings.human_side;
        self.say(&format!("Game started. You are playing {}.\n", capitalize(side.as_str())))
            .await?;
        Ok(())
    }

    /// Run transitions until the session terminates.
    pub async fn play<E>(&mut self, engine: &mut E) -> Result<GameOutcome, SessionError>
    where
        E: EngineBridge + ?Sized,
    {
        loop {
            if let SessionState::Terminated(outcome) = self.step(engine).await? {
                return Ok(outcome);
            }
        }
    }

    /// Perform a single state transition and return the new state.
    pub async fn step<E>(&mut self, engine: &mut E) -> Result<SessionState, SessionError>
    where
        E: EngineBridge + ?Sized,
    {
        let next = match self.state {
            SessionState::AwaitingHumanMove => self.human_turn().await?,
            SessionState::AwaitingEngineMove => self.engine_turn(engine).await?,
            terminated @ SessionState::Terminated(_) => terminated,
        };
        self.state = next;
        Ok(next)
    }

    async fn human_turn(&mut self) -> Result<SessionState, SessionError> {
        self.output.write_all(PROMPT.as_bytes()).await?;
        self.output.flush().await?;

        let Some(line) = self.input.next_line().await? else {
            tracing::info!("Input closed, ending session");
            self.say("\nInput closed.").await?;
            return Ok(SessionState::Terminated(GameOutcome::InputClosed));
        };
        let text = line.trim();

        if text.eq_ignore_ascii_case(QUIT_COMMAND) {
            self.say("Game exited.").await?;
            return Ok(SessionState::Terminated(GameOutcome::Quit));
        }
        if text.eq_ignore_ascii_case(BOARD_COMMAND) {
            let lines = render_board(self.game.board());
            for line in lines {
                self.say(&line).await?;
            }
            return Ok(SessionState::AwaitingHumanMove);
        }

        match self.game.play_human(text, self.settings.human_side) {
            Ok(entry) => {
                tracing::info!(
                    "Player move {} ({}) as {}",
                    entry.coordinate,
                    entry.display,
                    entry.color
                );
                Ok(SessionState::AwaitingEngineMove)
            }
            Err(GameError::IllegalMove(e)) => {
                tracing::debug!("Rejected move {:?}: {}", text, e);
                self.say(&format!("Illegal move: {}.", e)).await?;
                Ok(SessionState::AwaitingHumanMove)
            }
            Err(e) => {
                tracing::debug!("Unrecognized move {:?}: {}", text, e);
                self.say("Invalid move format.").await?;
                Ok(SessionState::AwaitingHumanMove)
            }
        }
    }

    async fn engine_turn<E>(&mut self, engine: &mut E) -> Result<SessionState, SessionError>
    where
        E: EngineBridge + ?Sized,
    {
        let moves = self.game.move_list();
        tracing::info!("Sending position to engine: {:?}", moves);
        engine.set_position(&moves).await?;

        let best = engine.request_best_move(self.settings.think_time_ms).await?;
        let Some(token) = best.filter(|token| token != NO_MOVE) else {
            tracing::info!("Engine has no move");
            self.say("Engine resigns or is out of moves. Game over.").await?;
            return Ok(SessionState::Terminated(GameOutcome::EngineResigned));
        };

        let entry = self.game.play_engine(&token)?;
        tracing::info!(
            "Engine move {} ({}) as {}",
            entry.coordinate,
            entry.display,
            entry.color
        );
        self.say(&format!("Engine plays {}.", entry.coordinate)).await?;
        self.print_history().await?;
        Ok(SessionState::AwaitingHumanMove)
    }

    async fn print_history(&mut self) -> std::io::Result<()> {
        self.say("── Move History ──").await?;
        for line in self.game.history_lines() {
            self.say(&line).await?;
        }
        self.say("").await
    }

    async fn say(&mut self, text: &str) -> std::io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Play one full session against `engine`.
///
/// The engine is started first; if that fails nothing else happens. Once it
/// has started it is stopped exactly once, however the session ends.
pub async fn run_session<E, R, W>(
    engine: &mut E,
    input: R,
    output: W,
    settings: SessionSettings,
) -> Result<SessionSummary, SessionError>
where
    E: EngineBridge + ?Sized,
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    engine.start().await.map_err(SessionError::Startup)?;

    let mut session = GameSession::new(input, output, settings);
    let result = match session.initialize(engine).await {
        Ok(()) => session.play(engine).await,
        Err(e) => Err(e),
    };

    engine.stop().await;

    match &result {
        Ok(outcome) => tracing::info!("Session ended: {:?}", outcome),
        Err(e) => tracing::error!("Session failed: {}", e),
    }
    let outcome = result?;
    Ok(SessionSummary {
        outcome,
        game: session.into_game(),
    })
}
