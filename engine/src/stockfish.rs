use crate::uci::{format_go_command, parse_uci_message, UciMessage};
use crate::{EngineBridge, EngineError, EngineResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout};
use tokio::time::Instant;

/// Default bound on any single wait for engine output.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

/// How long `stop` waits for the engine to exit after `quit` before killing it.
const QUIT_GRACE: Duration = Duration::from_secs(1);

/// Configuration for launching and tuning the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Engine binary. Probed with [`find_stockfish_path`] when unset.
    pub path: Option<PathBuf>,
    pub args: Vec<String>,
    pub response_timeout: Duration,
    pub skill_level: Option<u8>,
    pub threads: Option<u32>,
    pub hash_mb: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: None,
            args: Vec::new(),
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
            skill_level: None,
            threads: None,
            hash_mb: None,
        }
    }
}

/// UCI engine running as a child process.
///
/// The child is spawned by [`EngineBridge::start`] and killed by
/// [`EngineBridge::stop`], or when this value is dropped.
pub struct StockfishEngine {
    config: EngineConfig,
    process: Option<EngineProcess>,
}

struct EngineProcess {
    child: Child,
    stdin: ChildStdin,
    lines: Lines<BufReader<ChildStdout>>,
}

impl StockfishEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            process: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.process.is_some()
    }

    fn process_mut(&mut self) -> EngineResult<&mut EngineProcess> {
        self.process.as_mut().ok_or(EngineError::NotStarted)
    }

    /// Read one line, failing once `deadline` passes.
    async fn read_line(
        &mut self,
        deadline: Instant,
        waiting_for: &'static str,
        budget: Duration,
    ) -> EngineResult<String> {
        let process = self.process_mut()?;
        match tokio::time::timeout_at(deadline, process.lines.next_line()).await {
            Err(_) => {
                tracing::error!("Timed out waiting for {} after {:?}", waiting_for, budget);
                Err(EngineError::Timeout {
                    waiting_for,
                    after: budget,
                })
            }
            Ok(Err(e)) => {
                tracing::error!("Error reading from engine stdout: {}", e);
                Err(EngineError::Io(e))
            }
            Ok(Ok(None)) => {
                tracing::warn!("Engine stdout EOF - engine closed");
                Err(EngineError::Closed)
            }
            Ok(Ok(Some(line))) => {
                let trimmed = line.trim().to_string();
                tracing::trace!("UCI << {}", trimmed);
                Ok(trimmed)
            }
        }
    }
}

#[async_trait]
impl EngineBridge for StockfishEngine {
    #[tracing::instrument(level = "info", skip(self))]
    async fn start(&mut self) -> EngineResult<()> {
        if self.process.is_some() {
            tracing::debug!("Engine already running");
            return Ok(());
        }

        let path = match &self.config.path {
            Some(path) => path.clone(),
            None => find_stockfish_path().ok_or(EngineError::NotFound)?,
        };
        tracing::info!("Spawning engine at {:?} (config: {:?})", path, self.config);

        let mut child = tokio::process::Command::new(&path)
            .args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| {
                tracing::error!("Failed to spawn engine: {}", source);
                EngineError::Spawn {
                    path: path.clone(),
                    source,
                }
            })?;

        let stdin = child.stdin.take().ok_or(EngineError::NoStdin)?;
        let stdout = child.stdout.take().ok_or(EngineError::NoStdout)?;

        self.process = Some(EngineProcess {
            child,
            stdin,
            lines: BufReader::new(stdout).lines(),
        });
        tracing::info!("Engine process spawned");
        Ok(())
    }

    async fn send(&mut self, command: &str) -> EngineResult<()> {
        let process = self.process_mut()?;
        let trimmed = command.trim();
        tracing::trace!("UCI >> {}", trimmed);
        process
            .stdin
            .write_all(format!("{}\n", trimmed).as_bytes())
            .await
            .map_err(|e| {
                tracing::error!("Failed to write to engine stdin: {}", e);
                EngineError::Io(e)
            })?;
        process.stdin.flush().await?;
        Ok(())
    }

    async fn await_response(&mut self) -> EngineResult<String> {
        let budget = self.config.response_timeout;
        let deadline = Instant::now() + budget;
        loop {
            let line = self.read_line(deadline, "engine acknowledgement", budget).await?;
            match parse_uci_message(&line) {
                Ok(msg) if msg.is_ack() => {
                    tracing::debug!("Received {}", line);
                    return Ok(line);
                }
                Ok(UciMessage::Id { name, value }) => {
                    tracing::info!("Engine id {}: {}", name, value);
                }
                _ => tracing::trace!("Skipping engine line: {}", line),
            }
        }
    }

    async fn apply_options(&mut self) -> EngineResult<()> {
        if let Some(level) = self.config.skill_level {
            let level = level.min(20);
            tracing::info!("Setting skill level to {}", level);
            self.send(&format!("setoption name Skill Level value {}", level))
                .await?;
        }

        if let Some(threads) = self.config.threads {
            let threads = threads.clamp(1, 16);
            tracing::info!("Setting Threads to {}", threads);
            self.send(&format!("setoption name Threads value {}", threads))
                .await?;
        }

        if let Some(hash_mb) = self.config.hash_mb {
            let hash_mb = hash_mb.clamp(1, 2048);
            tracing::info!("Setting Hash to {} MB", hash_mb);
            self.send(&format!("setoption name Hash value {}", hash_mb))
                .await?;
        }
        Ok(())
    }

    async fn request_best_move(&mut self, think_time_ms: u64) -> EngineResult<Option<String>> {
        tracing::info!(
            "Starting engine calculation with movetime={}ms",
            think_time_ms
        );
        self.send(&format_go_command(think_time_ms)).await?;

        let budget = Duration::from_millis(think_time_ms) + self.config.response_timeout;
        let deadline = Instant::now() + budget;
        loop {
            let line = self.read_line(deadline, "best move", budget).await?;
            match parse_uci_message(&line) {
                Ok(UciMessage::BestMove { mv, ponder }) => {
                    tracing::info!("Received bestmove: {:?} (ponder {:?})", mv, ponder);
                    return Ok(mv);
                }
                Ok(UciMessage::Info(info)) => {
                    tracing::debug!(
                        "Engine info: depth={:?} seldepth={:?} time={:?}ms score={:?} nodes={:?} nps={:?} pv={:?}",
                        info.depth,
                        info.seldepth,
                        info.time_ms,
                        info.score,
                        info.nodes,
                        info.nps,
                        info.pv
                    );
                }
                _ => tracing::trace!("Ignoring engine line: {}", line),
            }
        }
    }

    async fn stop(&mut self) {
        let Some(mut process) = self.process.take() else {
            return;
        };

        tracing::info!("Sending quit command to engine");
        if let Err(e) = process.stdin.write_all(b"quit\n").await {
            tracing::debug!("Engine stdin already closed: {}", e);
        }
        let _ = process.stdin.flush().await;

        match tokio::time::timeout(QUIT_GRACE, process.child.wait()).await {
            Ok(Ok(status)) => tracing::info!("Engine exited with {}", status),
            _ => {
                tracing::warn!("Engine did not exit after quit, killing it");
                if let Err(e) = process.child.kill().await {
                    tracing::error!("Failed to kill engine: {}", e);
                }
            }
        }
    }
}

/// Find Stockfish executable in common locations
pub fn find_stockfish_path() -> Option<PathBuf> {
    let paths = [
        "/usr/local/bin/stockfish",
        "/usr/bin/stockfish",
        "/opt/homebrew/bin/stockfish",
        "/usr/games/stockfish",
    ];

    if let Some(found) = paths.iter().map(Path::new).find(|path| path.is_file()) {
        return Some(found.to_path_buf());
    }

    let search_path = std::env::var_os("PATH")?;
    std::env::split_paths(&search_path)
        .map(|dir| dir.join("stockfish"))
        .find(|candidate| candidate.is_file())
}
