//! Coordinate move codec (`e2e4`), the format exchanged with UCI engines.

use crate::board::{Move, MoveKind, Square};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    #[error("Invalid coordinate move: {0}")]
    InvalidMove(String),
}

/// True when `s` is exactly `[a-h][1-8][a-h][1-8]`.
pub fn is_coordinate_move(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 4
        && (b'a'..=b'h').contains(&bytes[0])
        && (b'1'..=b'8').contains(&bytes[1])
        && (b'a'..=b'h').contains(&bytes[2])
        && (b'1'..=b'8').contains(&bytes[3])
}

/// Parse the first four characters of a coordinate token as an ordinary move.
///
/// Anything after the fourth character (an engine's promotion suffix, say) is
/// ignored; callers that need the verbatim token keep it themselves.
pub fn parse_coordinate_move(s: &str) -> Result<Move, CoordinateError> {
    let prefix = s.get(0..4).filter(|p| is_coordinate_move(p));
    let Some(prefix) = prefix else {
        return Err(CoordinateError::InvalidMove(s.to_string()));
    };
    let from = Square::from_algebraic(&prefix[0..2]);
    let to = Square::from_algebraic(&prefix[2..4]);
    match (from, to) {
        (Some(from), Some(to)) => Ok(Move::normal(from, to)),
        _ => Err(CoordinateError::InvalidMove(s.to_string())),
    }
}

/// Format a move in coordinate notation (e.g. `e2e4`, `e7e8q`).
pub fn format_coordinate_move(mv: &Move) -> String {
    let mut s = format!("{}{}", mv.from, mv.to);
    if let MoveKind::Promotion(kind) = mv.kind {
        s.push(kind.to_char_lower());
    }
    s
}
