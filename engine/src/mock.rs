//! Scripted engine for testing - only compiled in test mode or with mock feature

use crate::{EngineBridge, EngineError, EngineResult};
use async_trait::async_trait;
use std::collections::VecDeque;

/// Every bridge call the mock received, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Start,
    Send(String),
    AwaitResponse,
    ApplyOptions,
    SetPosition(String),
    RequestBestMove(u64),
    Stop,
}

/// Engine that replays a fixed list of best moves.
///
/// Once the script runs out every request answers "no move".
#[derive(Debug, Default)]
pub struct MockEngine {
    best_moves: VecDeque<Option<String>>,
    calls: Vec<MockCall>,
    last_command: Option<String>,
    fail_start: bool,
    fail_best_move: bool,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the replies to successive best-move requests.
    pub fn with_best_moves<I, S>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.best_moves = moves.into_iter().map(|mv| mv.map(Into::into)).collect();
        self
    }

    /// Make `start` fail as if the binary could not be launched.
    pub fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Make every best-move request fail with a broken pipe.
    pub fn failing_best_move(mut self) -> Self {
        self.fail_best_move = true;
        self
    }

    pub fn calls(&self) -> &[MockCall] {
        &self.calls
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&MockCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }

    /// Positions sent so far.
    pub fn positions(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                MockCall::SetPosition(moves) => Some(moves.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl EngineBridge for MockEngine {
    async fn start(&mut self) -> EngineResult<()> {
        self.calls.push(MockCall::Start);
        if self.fail_start {
            return Err(EngineError::NotFound);
        }
        Ok(())
    }

    async fn send(&mut self, command: &str) -> EngineResult<()> {
        self.calls.push(MockCall::Send(command.to_string()));
        self.last_command = Some(command.to_string());
        Ok(())
    }

    async fn await_response(&mut self) -> EngineResult<String> {
        self.calls.push(MockCall::AwaitResponse);
        let reply = match self.last_command.as_deref() {
            Some("uci") => "uciok",
            _ => "readyok",
        };
        Ok(reply.to_string())
    }

    async fn apply_options(&mut self) -> EngineResult<()> {
        self.calls.push(MockCall::ApplyOptions);
        Ok(())
    }

    async fn set_position(&mut self, moves: &str) -> EngineResult<()> {
        self.calls.push(MockCall::SetPosition(moves.to_string()));
        Ok(())
    }

    async fn request_best_move(&mut self, think_time_ms: u64) -> EngineResult<Option<String>> {
        self.calls.push(MockCall::RequestBestMove(think_time_ms));
        if self.fail_best_move {
            return Err(EngineError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "engine pipe closed",
            )));
        }
        Ok(self.best_moves.pop_front().flatten())
    }

    async fn stop(&mut self) {
        self.calls.push(MockCall::Stop);
    }
}
