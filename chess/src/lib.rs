//! Chess rules and notation for the terminal game: board state, pseudo-legal
//! move generation, free-form move resolution and move history.

pub mod board;
pub mod board_display;
pub mod game;
pub mod movegen;
pub mod pgn;
pub mod types;
pub mod uci;

pub use board::{to_display_notation, Board, BoardError, Move, MoveKind, Square};
pub use board_display::render_board;
pub use game::{Game, GameError, HistoryEntry};
pub use movegen::all_legal_moves;
pub use pgn::{format_move_pairs, normalize_input, resolve_move, SanError};
pub use types::{PieceCode, PieceColor, PieceKind, EMPTY};
pub use uci::{format_coordinate_move, is_coordinate_move, parse_coordinate_move, CoordinateError};
