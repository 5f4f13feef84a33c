//! Pseudo-legal move generation.
//!
//! Moves that leave the mover's king in check are not filtered out. Castling,
//! en passant and promotion are never generated, so a pawn standing one step
//! from the last rank has no forward move.

use crate::board::{Board, Move, Square};
use crate::types::{decode, PieceColor, PieceKind, EMPTY};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Every pseudo-legal move for `player`.
///
/// Origins are visited in board-scan order (rank 8 to rank 1, file a to h) and
/// each piece's moves follow the fixed direction tables above, so the output
/// order is deterministic.
pub fn all_legal_moves(board: &Board, player: PieceColor) -> Vec<Move> {
    let mut moves = Vec::new();
    for from in Square::all() {
        let Some((kind, color)) = decode(board.piece_on(from)) else {
            continue;
        };
        if color != player {
            continue;
        }
        match kind {
            PieceKind::Pawn => pawn_moves(board, from, color, &mut moves),
            PieceKind::Knight => leaper_moves(board, from, color, &KNIGHT_OFFSETS, &mut moves),
            PieceKind::King => leaper_moves(board, from, color, &KING_OFFSETS, &mut moves),
            PieceKind::Rook => slider_moves(board, from, color, &ROOK_DIRECTIONS, &mut moves),
            PieceKind::Bishop => slider_moves(board, from, color, &BISHOP_DIRECTIONS, &mut moves),
            PieceKind::Queen => {
                slider_moves(board, from, color, &ROOK_DIRECTIONS, &mut moves);
                slider_moves(board, from, color, &BISHOP_DIRECTIONS, &mut moves);
            }
        }
    }
    moves
}

fn is_enemy(board: &Board, square: Square, color: PieceColor) -> bool {
    PieceColor::of_code(board.piece_on(square)) == Some(color.opposite())
}

fn is_last_rank(square: Square, color: PieceColor) -> bool {
    match color {
        PieceColor::White => square.row() == 0,
        PieceColor::Black => square.row() == 7,
    }
}

fn pawn_moves(board: &Board, from: Square, color: PieceColor, moves: &mut Vec<Move>) {
    let dir = color.pawn_direction();
    let start_row = match color {
        PieceColor::White => 6,
        PieceColor::Black => 1,
    };

    if let Some(one) = from.offset(dir, 0) {
        if board.piece_on(one) == EMPTY && !is_last_rank(one, color) {
            moves.push(Move::normal(from, one));
            if from.row() == start_row {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.piece_on(two) == EMPTY {
                        moves.push(Move::normal(from, two));
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(target) = from.offset(dir, d_col) {
            if is_enemy(board, target, color) && !is_last_rank(target, color) {
                moves.push(Move::normal(from, target));
            }
        }
    }
}

fn leaper_moves(
    board: &Board,
    from: Square,
    color: PieceColor,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            if board.piece_on(to) == EMPTY || is_enemy(board, to, color) {
                moves.push(Move::normal(from, to));
            }
        }
    }
}

fn slider_moves(
    board: &Board,
    from: Square,
    color: PieceColor,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(d_row, d_col) in directions {
        let mut current = from;
        while let Some(to) = current.offset(d_row, d_col) {
            if board.piece_on(to) == EMPTY {
                moves.push(Move::normal(from, to));
                current = to;
                continue;
            }
            if is_enemy(board, to, color) {
                moves.push(Move::normal(from, to));
            }
            break;
        }
    }
}
