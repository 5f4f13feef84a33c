//! Plain-text board rendering for the terminal.

use crate::board::{Board, Square};
use crate::types::{decode, PieceColor};

/// Render the board with rank 8 on top. White pieces are upper-case, Black
/// lower-case, empty squares `.`.
pub fn render_board(board: &Board) -> Vec<String> {
    let mut lines = Vec::with_capacity(9);
    for row in 0..8u8 {
        let mut line = String::with_capacity(20);
        line.push((b'8' - row) as char);
        line.push(' ');
        for col in 0..8u8 {
            let glyph = Square::new(row, col)
                .and_then(|sq| decode(board.piece_on(sq)))
                .map(|(kind, color)| match color {
                    PieceColor::White => kind.to_char_upper(),
                    PieceColor::Black => kind.to_char_lower(),
                })
                .unwrap_or('.');
            line.push(' ');
            line.push(glyph);
        }
        lines.push(line);
    }
    lines.push("   a b c d e f g h".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position() {
        let lines = render_board(&Board::new());
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[1], "7  p p p p p p p p");
        assert_eq!(lines[4], "4  . . . . . . . .");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }

    #[test]
    fn test_empty_board() {
        let lines = render_board(&Board::empty(PieceColor::White));
        for line in &lines[..8] {
            assert!(!line[2..].chars().any(|c| c.is_alphabetic()));
        }
    }
}
