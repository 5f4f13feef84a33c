//! Human-facing move text: parsing free-form input and printing history.

pub mod san;

pub use san::{normalize_input, resolve_move, SanError};

/// Lay numbered half-moves out two per line (`1. e4   1... e5`).
pub fn format_move_pairs(display: &[String]) -> Vec<String> {
    display.chunks(2).map(|pair| pair.join("   ")).collect()
}
