//! Canonical piece and color types for the project.
//!
//! Squares on the [`Board`](crate::board::Board) store a signed [`PieceCode`]:
//! the magnitude names the piece kind, the sign names the color.

/// Signed piece code. Positive is White, negative is Black, zero is empty.
pub type PieceCode = i8;

/// Code stored on an empty square.
pub const EMPTY: PieceCode = 0;

/// Project-owned piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// Project-owned color type. Also names the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceColor {
    #[default]
    White,
    Black,
}

impl PieceKind {
    /// Magnitude of this kind's piece code.
    pub fn magnitude(self) -> PieceCode {
        match self {
            Self::Pawn => 1,
            Self::Rook => 2,
            Self::Knight => 3,
            Self::Bishop => 4,
            Self::Queen => 5,
            Self::King => 6,
        }
    }

    pub fn from_magnitude(magnitude: PieceCode) -> Option<Self> {
        match magnitude {
            1 => Some(Self::Pawn),
            2 => Some(Self::Rook),
            3 => Some(Self::Knight),
            4 => Some(Self::Bishop),
            5 => Some(Self::Queen),
            6 => Some(Self::King),
            _ => None,
        }
    }

    pub fn to_char_upper(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    pub fn to_char_lower(self) -> char {
        self.to_char_upper().to_ascii_lowercase()
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }

    /// Piece code for this kind in the given color.
    pub fn code(self, color: PieceColor) -> PieceCode {
        self.magnitude() * color.sign()
    }
}

impl PieceColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Sign applied to piece magnitudes of this color.
    pub fn sign(self) -> PieceCode {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Color owning a non-empty piece code.
    pub fn of_code(code: PieceCode) -> Option<Self> {
        match code.signum() {
            1 => Some(Self::White),
            -1 => Some(Self::Black),
            _ => None,
        }
    }

    /// Row delta of a single pawn push. Row 0 is rank 8.
    pub fn pawn_direction(self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Rank character pawns of this color start on.
    pub fn pawn_start_rank(self) -> char {
        match self {
            Self::White => '2',
            Self::Black => '7',
        }
    }

    /// Rank character a pawn reaches with a double push.
    pub fn pawn_double_push_rank(self) -> char {
        match self {
            Self::White => '4',
            Self::Black => '5',
        }
    }
}

/// Split a piece code into its kind and color. Returns `None` for empty squares
/// and codes outside the valid range.
pub fn decode(code: PieceCode) -> Option<(PieceKind, PieceColor)> {
    let kind = PieceKind::from_magnitude(code.abs())?;
    let color = PieceColor::of_code(code)?;
    Some((kind, color))
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char_upper())
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
