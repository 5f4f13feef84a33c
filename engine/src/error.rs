//! Error types for the engine bridge

use std::path::PathBuf;
use std::time::Duration;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Engine binary not found")]
    NotFound,

    #[error("Failed to spawn engine {path:?}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine has no stdin")]
    NoStdin,

    #[error("Engine has no stdout")]
    NoStdout,

    #[error("Engine is not running")]
    NotStarted,

    #[error("Engine closed its output")]
    Closed,

    #[error("Timed out after {after:?} waiting for {waiting_for}")]
    Timeout {
        waiting_for: &'static str,
        after: Duration,
    },
}
