//! Configuration for ChessTTY runtime.
//!
//! Every value has a compile-time default and can be overridden at runtime via
//! a dedicated environment variable. Command-line flags take precedence over
//! both (see `main.rs`).

use std::path::PathBuf;

/// Default thinking time granted to the engine per move (in milliseconds).
const DEFAULT_MOVETIME_MS: u64 = 1000;

/// Default bound on any wait for engine output (in seconds).
const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 10;

/// Default directory for log files.
const DEFAULT_LOG_DIR: &str = "logs";

/// Get the engine binary path, if one is configured.
///
/// Priority:
/// 1. `CHESSTTY_ENGINE_PATH` env variable if set
/// 2. `None`, letting the engine bridge probe for Stockfish
pub fn get_engine_path() -> Option<PathBuf> {
    std::env::var("CHESSTTY_ENGINE_PATH").ok().map(PathBuf::from)
}

/// Get the engine thinking time in milliseconds.
///
/// Priority:
/// 1. `CHESSTTY_MOVETIME_MS` env variable if set (falls back to default if the
///    value cannot be parsed as a `u64`)
/// 2. `1000` ms as fallback
pub fn get_movetime_ms() -> u64 {
    if let Ok(value) = std::env::var("CHESSTTY_MOVETIME_MS") {
        return value.parse().unwrap_or(DEFAULT_MOVETIME_MS);
    }

    DEFAULT_MOVETIME_MS
}

/// Get the engine response timeout in seconds.
///
/// Priority:
/// 1. `CHESSTTY_ENGINE_TIMEOUT_SECS` env variable if set (falls back to default
///    if the value cannot be parsed as a `u64`)
/// 2. `10` seconds as fallback
pub fn get_engine_timeout_secs() -> u64 {
    if let Ok(timeout) = std::env::var("CHESSTTY_ENGINE_TIMEOUT_SECS") {
        return timeout.parse().unwrap_or(DEFAULT_ENGINE_TIMEOUT_SECS);
    }

    DEFAULT_ENGINE_TIMEOUT_SECS
}

/// Get the directory log files are written to.
///
/// Priority:
/// 1. `CHESSTTY_LOG_DIR` env variable if set
/// 2. `./logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CHESSTTY_LOG_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}
