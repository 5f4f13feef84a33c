//! 8x8 board state.
//!
//! Row 0 is rank 8 and row 7 is rank 1; column 0 is file `a`. The board is a
//! plain state-transition executor: it applies whatever move it is given and
//! leaves legality to [`movegen`](crate::movegen).

use crate::types::{decode, PieceCode, PieceColor, PieceKind, EMPTY};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A square addressed by grid row and column, both in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 8 && col < 8).then_some(Self { row, col })
    }

    /// Offset this square, returning `None` when the result leaves the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Parse a file character (`a`..=`h`) and rank character (`1`..=`8`).
    pub fn from_chars(file: char, rank: char) -> Option<Self> {
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as u8 - b'a';
        let row = b'8' - rank as u8;
        Some(Self { row, col })
    }

    /// Parse algebraic form such as `e4`.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let (file, rank) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        Self::from_chars(file, rank)
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    pub fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    pub fn rank_char(self) -> char {
        (b'8' - self.row) as char
    }

    /// Every square in board-scan order: rank 8 to rank 1, file a to h.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// What a move does beyond relocating the piece on `from`.
///
/// The move generator and the notation resolver only produce
/// [`MoveKind::Normal`]; the other kinds exist so the coordinate contract can
/// grow without changing shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoveKind {
    #[default]
    Normal,
    /// Pawn reaches the last rank and becomes the given piece.
    Promotion(PieceKind),
    /// King moves two files; the rook on that side jumps over it.
    Castle,
    /// Pawn captures diagonally onto an empty square, removing the pawn beside it.
    EnPassant,
}

/// A move from one square to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Move {
    pub fn normal(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Normal,
        }
    }
}

/// Reasons a move pending validation is refused before it touches the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("There is no piece on {0}")]
    EmptySquare(Square),
    #[error("The piece on {square} belongs to {owner}")]
    NotYourPiece { square: Square, owner: PieceColor },
    #[error("The piece on {0} would not move")]
    NullMove(Square),
    #[error("{0} is occupied by your own piece")]
    OwnPiece(Square),
}

/// Board position plus side to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[PieceCode; 8]; 8],
    side_to_move: PieceColor,
}

impl Board {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        let mut squares = [[EMPTY; 8]; 8];
        for (col, kind) in BACK_RANK.iter().enumerate() {
            squares[0][col] = kind.code(PieceColor::Black);
            squares[1][col] = PieceKind::Pawn.code(PieceColor::Black);
            squares[6][col] = PieceKind::Pawn.code(PieceColor::White);
            squares[7][col] = kind.code(PieceColor::White);
        }
        Self {
            squares,
            side_to_move: PieceColor::White,
        }
    }

    /// Board with no pieces.
    pub fn empty(side_to_move: PieceColor) -> Self {
        Self {
            squares: [[EMPTY; 8]; 8],
            side_to_move,
        }
    }

    /// Piece code at a grid position. Both indices must be in `0..8`.
    pub fn piece_at(&self, row: usize, col: usize) -> PieceCode {
        self.squares[row][col]
    }

    pub fn piece_on(&self, square: Square) -> PieceCode {
        self.squares[square.row as usize][square.col as usize]
    }

    pub fn set_piece(&mut self, square: Square, code: PieceCode) {
        self.squares[square.row as usize][square.col as usize] = code;
    }

    /// Copy the piece from the source square to the destination and clear the
    /// source. Whatever stood on the destination is lost.
    pub fn move_piece(&mut self, from_row: usize, from_col: usize, to_row: usize, to_col: usize) {
        self.squares[to_row][to_col] = self.squares[from_row][from_col];
        self.squares[from_row][from_col] = EMPTY;
    }

    pub fn advance_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    pub fn current_player(&self) -> PieceColor {
        self.side_to_move
    }

    /// Check a move that has not been trusted yet. The origin must hold a piece
    /// of the side to move and the destination must be a different square not
    /// held by that side. Reachability is the resolver's job.
    pub fn validate_pending(&self, mv: &Move) -> Result<(), BoardError> {
        match decode(self.piece_on(mv.from)) {
            None => return Err(BoardError::EmptySquare(mv.from)),
            Some((_, owner)) if owner != self.side_to_move => {
                return Err(BoardError::NotYourPiece {
                    square: mv.from,
                    owner,
                })
            }
            Some(_) => {}
        }
        if mv.from == mv.to {
            return Err(BoardError::NullMove(mv.from));
        }
        if PieceColor::of_code(self.piece_on(mv.to)) == Some(self.side_to_move) {
            return Err(BoardError::OwnPiece(mv.to));
        }
        Ok(())
    }

    /// Apply a move without any legality check and return the code that was on
    /// the destination square. Does not flip the side to move.
    pub fn apply_trusted(&mut self, mv: &Move) -> PieceCode {
        let captured = self.piece_on(mv.to);
        let moving = self.piece_on(mv.from);
        self.relocate(mv.from, mv.to);

        match mv.kind {
            MoveKind::Normal => {}
            MoveKind::Promotion(kind) => {
                let color = PieceColor::of_code(moving).unwrap_or(self.side_to_move);
                self.set_piece(mv.to, kind.code(color));
            }
            MoveKind::Castle => {
                let kingside = mv.to.col > mv.from.col;
                let (rook_col, rook_to_col) = if kingside { (7, 5) } else { (0, 3) };
                let row = mv.from.row;
                self.move_piece(row as usize, rook_col, row as usize, rook_to_col);
            }
            MoveKind::EnPassant => {
                let taken = Square {
                    row: mv.from.row,
                    col: mv.to.col,
                };
                let code = self.piece_on(taken);
                self.set_piece(taken, EMPTY);
                return code;
            }
        }
        captured
    }

    fn relocate(&mut self, from: Square, to: Square) {
        self.move_piece(
            from.row as usize,
            from.col as usize,
            to.row as usize,
            to.col as usize,
        );
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Algebraic-style token for a move: piece letter, `x` on captures, then the
/// destination. Pawn captures lead with the origin file; a straight pawn
/// push is never written as a capture. No check marks.
pub fn to_display_notation(mv: &Move, moving_piece: PieceCode, was_capture: bool) -> String {
    if mv.kind == MoveKind::Castle {
        return if mv.to.col > mv.from.col {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        };
    }

    let mut token = String::new();
    match decode(moving_piece).map(|(kind, _)| kind) {
        Some(PieceKind::Pawn) | None => {
            let diagonal = mv.from.col != mv.to.col;
            if (was_capture && diagonal) || mv.kind == MoveKind::EnPassant {
                token.push(mv.from.file_char());
                token.push('x');
            }
        }
        Some(kind) => {
            token.push(kind.to_char_upper());
            if was_capture {
                token.push('x');
            }
        }
    }
    token.push_str(&mv.to.to_string());

    if let MoveKind::Promotion(kind) = mv.kind {
        token.push('=');
        token.push(kind.to_char_upper());
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_starting_position() {
        let board = Board::new();
        assert_eq!(board.piece_at(7, 4), 6);
        assert_eq!(board.piece_at(0, 3), -5);
        assert_eq!(board.piece_at(6, 0), 1);
        assert_eq!(board.piece_at(4, 4), EMPTY);
        assert_eq!(board.current_player(), PieceColor::White);
    }

    #[test]
    fn test_square_algebraic_mapping() {
        let e4 = sq("e4");
        assert_eq!((e4.row(), e4.col()), (4, 4));
        assert_eq!(sq("a8"), Square::new(0, 0).unwrap());
        assert_eq!(sq("h1").to_string(), "h1");
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a1x"), None);
    }

    #[test]
    fn test_move_piece_clears_source_and_overwrites_destination() {
        let mut board = Board::new();
        let moving = board.piece_at(6, 4);
        board.move_piece(6, 4, 1, 4);
        assert_eq!(board.piece_at(6, 4), EMPTY);
        assert_eq!(board.piece_at(1, 4), moving);
    }

    #[test]
    fn test_advance_turn_alternates() {
        let mut board = Board::new();
        board.advance_turn();
        assert_eq!(board.current_player(), PieceColor::Black);
        board.advance_turn();
        assert_eq!(board.current_player(), PieceColor::White);
    }

    #[test]
    fn test_validate_pending_checks_origin_owner() {
        let board = Board::new();
        assert!(board.validate_pending(&Move::normal(sq("e2"), sq("e4"))).is_ok());
        assert_eq!(
            board.validate_pending(&Move::normal(sq("e4"), sq("e5"))),
            Err(BoardError::EmptySquare(sq("e4")))
        );
        assert!(matches!(
            board.validate_pending(&Move::normal(sq("e7"), sq("e5"))),
            Err(BoardError::NotYourPiece {
                owner: PieceColor::Black,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_pending_rejects_null_and_own_destination() {
        let board = Board::new();
        assert_eq!(
            board.validate_pending(&Move::normal(sq("e2"), sq("e2"))),
            Err(BoardError::NullMove(sq("e2")))
        );
        assert_eq!(
            board.validate_pending(&Move::normal(sq("e2"), sq("e1"))),
            Err(BoardError::OwnPiece(sq("e1")))
        );
        assert_eq!(
            board.validate_pending(&Move::normal(sq("e1"), sq("e2"))),
            Err(BoardError::OwnPiece(sq("e2")))
        );
        assert!(board
            .validate_pending(&Move::normal(sq("d1"), sq("d7")))
            .is_ok());
    }

    #[test]
    fn test_apply_trusted_reports_capture() {
        let mut board = Board::new();
        let captured = board.apply_trusted(&Move::normal(sq("d1"), sq("d7")));
        assert_eq!(captured, -1);
        assert_eq!(board.piece_on(sq("d7")), 5);
        assert_eq!(board.current_player(), PieceColor::White);
    }

    #[test]
    fn test_apply_trusted_castle_moves_rook() {
        let mut board = Board::empty(PieceColor::Black);
        board.set_piece(sq("e8"), -6);
        board.set_piece(sq("h8"), -2);
        board.apply_trusted(&Move {
            from: sq("e8"),
            to: sq("g8"),
            kind: MoveKind::Castle,
        });
        assert_eq!(board.piece_on(sq("g8")), -6);
        assert_eq!(board.piece_on(sq("f8")), -2);
        assert_eq!(board.piece_on(sq("h8")), EMPTY);
    }

    #[test]
    fn test_apply_trusted_en_passant_and_promotion() {
        let mut board = Board::empty(PieceColor::White);
        board.set_piece(sq("e5"), 1);
        board.set_piece(sq("d5"), -1);
        let captured = board.apply_trusted(&Move {
            from: sq("e5"),
            to: sq("d6"),
            kind: MoveKind::EnPassant,
        });
        assert_eq!(captured, -1);
        assert_eq!(board.piece_on(sq("d5")), EMPTY);

        board.set_piece(sq("a7"), 1);
        board.apply_trusted(&Move {
            from: sq("a7"),
            to: sq("a8"),
            kind: MoveKind::Promotion(PieceKind::Queen),
        });
        assert_eq!(board.piece_on(sq("a8")), 5);
    }

    #[test]
    fn test_display_notation() {
        let mv = Move::normal(sq("g1"), sq("f3"));
        assert_eq!(to_display_notation(&mv, 3, false), "Nf3");
        assert_eq!(to_display_notation(&mv, -3, true), "Nxf3");

        let push = Move::normal(sq("e2"), sq("e4"));
        assert_eq!(to_display_notation(&push, 1, false), "e4");

        let capture = Move::normal(sq("e4"), sq("d5"));
        assert_eq!(to_display_notation(&capture, 1, true), "exd5");

        let blocked = Move::normal(sq("e4"), sq("e5"));
        assert_eq!(to_display_notation(&blocked, 1, true), "e5");

        let castle = Move {
            from: sq("e1"),
            to: sq("c1"),
            kind: MoveKind::Castle,
        };
        assert_eq!(to_display_notation(&castle, 6, false), "O-O-O");
    }
}
