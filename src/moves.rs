use serde::{Deserialize, Serialize};

use crate::error::{CheckersError, CheckersResult};

/// A complete move for one side: the moving piece's square, the square it
/// finishes on, and every square whose piece is captured on the way.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: (usize, usize),
    pub to: (usize, usize),
    pub captured: Vec<(usize, usize)>,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    /// Convert to text notation, e.g. "c3-d4" for a step, "c3xe5" for a jump.
    pub fn to_notation(&self) -> String {
        let sep = if self.is_capture() { 'x' } else { '-' };
        format!("{}{sep}{}", square_name(self.from), square_name(self.to))
    }

    /// Parse the endpoints out of "c3-d4" or "c3xe5". The captured squares are
    /// not part of the notation; look them up in the board's legal moves.
    pub fn parse(s: &str) -> CheckersResult<((usize, usize), (usize, usize))> {
        let s = s.trim();
        let (from, to) = s
            .split_once(|c| c == '-' || c == 'x')
            .ok_or_else(|| CheckersError::InvalidNotation(s.to_string()))?;
        Ok((parse_square(from)?, parse_square(to)?))
    }
}

/// File a-h is the column, rank 1-8 counts up from the bottom row (row 7).
pub fn square_name((row, col): (usize, usize)) -> String {
    let file = (b'a' + col as u8) as char;
    let rank = 8 - row;
    format!("{file}{rank}")
}

pub fn parse_square(s: &str) -> CheckersResult<(usize, usize)> {
    let bytes = s.trim().as_bytes();
    if bytes.len() != 2 {
        return Err(CheckersError::InvalidSquare(s.to_string()));
    }
    let (file, rank) = (bytes[0].to_ascii_lowercase(), bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(CheckersError::InvalidSquare(s.to_string()));
    }
    let col = (file - b'a') as usize;
    let row = 8 - (rank - b'0') as usize;
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bottom_left_corner_is_a1() {
        assert_eq!(square_name((7, 0)), "a1");
        assert_eq!(square_name((0, 7)), "h8");
        assert_eq!(parse_square("a1").unwrap(), (7, 0));
        assert_eq!(parse_square("H8").unwrap(), (0, 7));
    }

    #[test]
    fn notation_marks_captures() {
        let step = Move { from: (5, 2), to: (4, 3), captured: vec![] };
        assert_eq!(step.to_notation(), "c3-d4");

        let jump = Move { from: (5, 2), to: (3, 4), captured: vec![(4, 3)] };
        assert_eq!(jump.to_notation(), "c3xe5");
        assert_eq!(Move::parse("c3xe5").unwrap(), ((5, 2), (3, 4)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse_square("i1"), Err(CheckersError::InvalidSquare(_))));
        assert!(matches!(parse_square("a9"), Err(CheckersError::InvalidSquare(_))));
        assert!(matches!(parse_square("a"), Err(CheckersError::InvalidSquare(_))));
        assert!(matches!(Move::parse("c3d4"), Err(CheckersError::InvalidNotation(_))));
        assert!(matches!(Move::parse("c3-z4"), Err(CheckersError::InvalidSquare(_))));
    }
}
