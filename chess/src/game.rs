use crate::board::{to_display_notation, Board, BoardError, Move};
use crate::pgn::{format_move_pairs, normalize_input, resolve_move, SanError};
use crate::types::{PieceCode, PieceColor, EMPTY};
use crate::uci::{format_coordinate_move, parse_coordinate_move, CoordinateError};

/// Board plus the two parallel move histories.
///
/// `raw_moves` holds coordinate tokens exactly as the engine is told them;
/// `display_moves` holds numbered algebraic tokens for people. Both grow by one
/// entry per half-move and are never rewritten.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    raw_moves: Vec<String>,
    display_moves: Vec<String>,
    turn: u32,
}

/// Record of one applied half-move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    pub coordinate: String,
    pub display: String,
    pub color: PieceColor,
    pub piece: PieceCode,
    pub captured: PieceCode,
}

impl Game {
    /// Create a new game from the standard starting position
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            raw_moves: Vec::new(),
            display_moves: Vec::new(),
            turn: 1,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Full-move number, incremented after each Black half-move.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn side_to_move(&self) -> PieceColor {
        self.board.current_player()
    }

    pub fn raw_history(&self) -> &[String] {
        &self.raw_moves
    }

    pub fn display_history(&self) -> &[String] {
        &self.display_moves
    }

    /// Raw history joined by spaces, ready for a `position ... moves` command.
    pub fn move_list(&self) -> String {
        self.raw_moves.join(" ")
    }

    /// Display history laid out two half-moves per line.
    pub fn history_lines(&self) -> Vec<String> {
        format_move_pairs(&self.display_moves)
    }

    /// Resolve text typed by the local player without touching the game.
    pub fn resolve_human(&self, input: &str, player: PieceColor) -> Result<Move, GameError> {
        let mv = resolve_move(&self.board, &normalize_input(input), player)?;
        self.board.validate_pending(&mv)?;
        Ok(mv)
    }

    /// Apply a move typed by the local player. Nothing changes on error.
    pub fn play_human(
        &mut self,
        input: &str,
        player: PieceColor,
    ) -> Result<HistoryEntry, GameError> {
        let mv = self.resolve_human(input, player)?;
        let token = format_coordinate_move(&mv);
        Ok(self.record(mv, token))
    }

    /// Apply a move reported by the engine.
    ///
    /// Engine moves are trusted: only the token's shape is checked, never its
    /// legality. The token is kept verbatim in the raw history.
    pub fn play_engine(&mut self, token: &str) -> Result<HistoryEntry, GameError> {
        let mv = parse_coordinate_move(token)?;
        Ok(self.record(mv, token.to_string()))
    }

    fn record(&mut self, mv: Move, token: String) -> HistoryEntry {
        let color = self.board.current_player();
        let piece = self.board.piece_on(mv.from);
        let was_capture = self.board.piece_on(mv.to) != EMPTY;

        let notation = to_display_notation(&mv, piece, was_capture);
        let display = match color {
            PieceColor::White => format!("{}. {}", self.turn, notation),
            PieceColor::Black => format!("{}... {}", self.turn, notation),
        };

        self.raw_moves.push(token.clone());
        self.display_moves.push(display.clone());

        let captured = self.board.apply_trusted(&mv);
        self.board.advance_turn();
        if color == PieceColor::Black {
            self.turn += 1;
        }

        HistoryEntry {
            mv,
            coordinate: token,
            display,
            color,
            piece,
            captured,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Notation(#[from] SanError),
    #[error(transparent)]
    IllegalMove(#[from] BoardError),
    #[error("Engine sent a malformed move: {0}")]
    EngineMove(#[from] CoordinateError),
}
