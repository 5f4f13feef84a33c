//! Free-form move text to coordinate moves.
//!
//! Accepted shapes, tried in this order:
//!
//! 1. coordinate form `e2e4`, passed through unchanged
//! 2. bare pawn push `e4`, or just `e` for a double push
//! 3. piece move `nf3` / `nxf3`
//! 4. pawn capture `exd5`
//!
//! When several pieces can reach the requested square, the one whose origin
//! comes first in board-scan order (rank 8 to rank 1, file a to h) wins.
//! Ambiguous input is resolved, never rejected.

use crate::board::{Board, Move, Square};
use crate::movegen::all_legal_moves;
use crate::types::{decode, PieceColor, PieceKind};
use crate::uci::{is_coordinate_move, parse_coordinate_move};

/// Trim, lower-case, drop a leading move number (`12.` / `12...`) and trailing
/// annotation glyphs (`+`, `#`, `!`, `?`).
pub fn normalize_input(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut rest = lowered.as_str();

    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 && rest[digits..].starts_with('.') {
        rest = rest[digits..].trim_start_matches('.');
    }

    rest.trim()
        .trim_end_matches(&['+', '#', '!', '?'][..])
        .trim()
        .to_string()
}

/// Resolve normalized move text against the current position.
///
/// `player` is the side the local user controls; it fixes the origin rank of
/// bare pawn pushes. Piece moves and pawn captures are looked up among the
/// legal moves of the side to move.
pub fn resolve_move(board: &Board, input: &str, player: PieceColor) -> Result<Move, SanError> {
    if is_coordinate_move(input) {
        return parse_coordinate_move(input).map_err(|_| SanError::InvalidFormat(input.to_string()));
    }

    let chars: Vec<char> = input.chars().collect();

    if let Some(mv) = parse_pawn_push(&chars, player) {
        return Ok(mv);
    }

    let side = board.current_player();
    let legal = all_legal_moves(board, side);

    if let Some((kind, to)) = parse_piece_move(&chars) {
        let code = kind.code(side);
        if let Some(mv) = legal
            .iter()
            .find(|mv| mv.to == to && board.piece_on(mv.from) == code)
        {
            return Ok(*mv);
        }
        // `bxc4` may still be a b-pawn capture
    }

    if let Some((from_col, to)) = parse_pawn_capture(&chars) {
        return legal
            .iter()
            .find(|mv| {
                mv.to == to
                    && mv.from.col() == from_col
                    && matches!(decode(board.piece_on(mv.from)), Some((PieceKind::Pawn, _)))
            })
            .copied()
            .ok_or_else(|| SanError::NoLegalMove(input.to_string()));
    }

    if parse_piece_move(&chars).is_some() {
        return Err(SanError::NoLegalMove(input.to_string()));
    }

    Err(SanError::InvalidFormat(input.to_string()))
}

/// `[a-h][1-8]?`
fn parse_pawn_push(chars: &[char], player: PieceColor) -> Option<Move> {
    let (file, rank) = match chars {
        [file] => (*file, player.pawn_double_push_rank()),
        [file, rank] => (*file, *rank),
        _ => return None,
    };
    let from = Square::from_chars(file, player.pawn_start_rank())?;
    let to = Square::from_chars(file, rank)?;
    Some(Move::normal(from, to))
}

/// `[nbrqk]x?[a-h][1-8]`
fn parse_piece_move(chars: &[char]) -> Option<(PieceKind, Square)> {
    let (letter, file, rank) = match chars {
        [letter, file, rank] => (*letter, *file, *rank),
        [letter, 'x', file, rank] => (*letter, *file, *rank),
        _ => return None,
    };
    let kind = match letter {
        'n' | 'b' | 'r' | 'q' | 'k' => PieceKind::from_char(letter)?,
        _ => return None,
    };
    Some((kind, Square::from_chars(file, rank)?))
}

/// `[a-h]x[a-h][1-8]`
fn parse_pawn_capture(chars: &[char]) -> Option<(u8, Square)> {
    let [from_file, 'x', file, rank] = chars else {
        return None;
    };
    if !('a'..='h').contains(from_file) {
        return None;
    }
    let to = Square::from_chars(*file, *rank)?;
    Some((*from_file as u8 - b'a', to))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanError {
    #[error("No legal move found for: {0}")]
    NoLegalMove(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
