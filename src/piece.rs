use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// The human side. Starts on rows 5-7 and moves toward row 0.
    Red,
    /// The computer side. Starts on rows 0-2 and moves toward row 7.
    Grey,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::Red => Color::Grey,
            Color::Grey => Color::Red,
        }
    }

    /// Row delta of a forward step for a man of this color.
    pub fn forward(self) -> i32 {
        match self {
            Color::Red => -1,
            Color::Grey => 1,
        }
    }

    /// The row on which a man of this color is crowned.
    pub fn king_row(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Grey => 7,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Piece {
    pub row: usize,
    pub col: usize,
    pub color: Color,
    pub king: bool,
}

impl Piece {
    pub fn new(row: usize, col: usize, color: Color) -> Self {
        Piece { row, col, color, king: false }
    }

    pub fn crowned(row: usize, col: usize, color: Color) -> Self {
        Piece { row, col, color, king: true }
    }

    pub fn square(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Single-character symbol used by the text renderings: lowercase for men,
    /// uppercase for kings.
    pub fn symbol(&self) -> char {
        match (self.color, self.king) {
            (Color::Red, false) => 'r',
            (Color::Red, true) => 'R',
            (Color::Grey, false) => 'g',
            (Color::Grey, true) => 'G',
        }
    }
}
