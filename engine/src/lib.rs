//! Bridge to an external UCI chess engine.
//!
//! [`EngineBridge`] is the seam the game loop talks through. [`StockfishEngine`]
//! drives a real engine subprocess; `MockEngine` (feature `mock`) replays a
//! script for tests.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod stockfish;
pub mod uci;

pub use error::{EngineError, EngineResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCall, MockEngine};
pub use stockfish::{find_stockfish_path, EngineConfig, StockfishEngine};
pub use uci::{UciError, UciMessage};

use async_trait::async_trait;

/// Blocking request/response conversation with a chess engine.
///
/// Every call completes before the next one starts; the caller never has two
/// requests in flight.
#[async_trait]
pub trait EngineBridge: Send {
    /// Acquire the engine. Nothing else may be called before this succeeds.
    async fn start(&mut self) -> EngineResult<()>;

    /// Send one protocol command line.
    async fn send(&mut self, command: &str) -> EngineResult<()>;

    /// Wait for the next acknowledgement line (`uciok` / `readyok`) and return it.
    async fn await_response(&mut self) -> EngineResult<String>;

    /// Push configured engine options. Called between the handshake and the
    /// readiness check.
    async fn apply_options(&mut self) -> EngineResult<()> {
        Ok(())
    }

    /// Tell the engine the game so far: space-separated coordinate moves from
    /// the initial position, empty for the start.
    async fn set_position(&mut self, moves: &str) -> EngineResult<()> {
        self.send(&uci::format_position_command(moves)).await
    }

    /// Ask for a move with the given thinking time. `None` means the engine has
    /// no move to offer.
    async fn request_best_move(&mut self, think_time_ms: u64) -> EngineResult<Option<String>>;

    /// Release the engine. Safe to call more than once.
    async fn stop(&mut self);
}

/// Engine analysis information
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineInfo {
    pub depth: Option<u8>,
    pub seldepth: Option<u8>,
    pub time_ms: Option<u64>,
    pub nodes: Option<u64>,
    pub score: Option<Score>,
    pub pv: Vec<String>, // Principal variation
    pub nps: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Score {
    Centipawns(i32),
    Mate(i8), // Negative for being mated
}
