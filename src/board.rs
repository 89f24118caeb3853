use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::moves::Move;
use crate::piece::{Color, Piece};

/// Legal destinations of one piece, each mapped to the pieces captured on the
/// way there. Ordered by `(row, col)` so that iteration is reproducible.
pub type MoveMap = BTreeMap<(usize, usize), Vec<Piece>>;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
    pub red_left: usize,
    pub grey_left: usize,
    pub red_kings: usize,
    pub grey_kings: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
            red_left: 0,
            grey_left: 0,
            red_kings: 0,
            grey_kings: 0,
        }
    }

    pub fn new() -> Self {
        let mut board = Board::empty();

        // Grey on rows 0-2, red on rows 5-7, dark squares only
        for row in 0..8 {
            for col in 0..8 {
                if !Self::is_playable(row, col) {
                    continue;
                }
                if row < 3 {
                    board.place(Piece::new(row, col, Color::Grey));
                } else if row > 4 {
                    board.place(Piece::new(row, col, Color::Red));
                }
            }
        }

        board
    }

    /// Dark squares, the only ones a piece can ever stand on.
    pub fn is_playable(row: usize, col: usize) -> bool {
        (row + col) % 2 == 1
    }

    fn in_bounds(row: i32, col: i32) -> bool {
        (0..8).contains(&row) && (0..8).contains(&col)
    }

    /// Put a piece on its square, replacing whatever stood there. Counts are
    /// kept in step with the grid.
    pub fn place(&mut self, piece: Piece) {
        debug_assert!(Self::is_playable(piece.row, piece.col), "light square {:?}", piece.square());
        self.clear(piece.row, piece.col);
        self.squares[piece.row][piece.col] = Some(piece);
        *self.left_mut(piece.color) += 1;
        if piece.king {
            *self.kings_mut(piece.color) += 1;
        }
    }

    fn clear(&mut self, row: usize, col: usize) -> Option<Piece> {
        let piece = self.squares[row][col].take()?;
        *self.left_mut(piece.color) -= 1;
        if piece.king {
            *self.kings_mut(piece.color) -= 1;
        }
        Some(piece)
    }

    fn left_mut(&mut self, color: Color) -> &mut usize {
        match color {
            Color::Red => &mut self.red_left,
            Color::Grey => &mut self.grey_left,
        }
    }

    fn kings_mut(&mut self, color: Color) -> &mut usize {
        match color {
            Color::Red => &mut self.red_kings,
            Color::Grey => &mut self.grey_kings,
        }
    }

    pub fn left(&self, color: Color) -> usize {
        match color {
            Color::Red => self.red_left,
            Color::Grey => self.grey_left,
        }
    }

    pub fn kings(&self, color: Color) -> usize {
        match color {
            Color::Red => self.red_kings,
            Color::Grey => self.grey_kings,
        }
    }

    pub fn get_piece(&self, row: usize, col: usize) -> Option<Piece> {
        if row < 8 && col < 8 {
            self.squares[row][col]
        } else {
            None
        }
    }

    /// All pieces of one color in grid scan order (row by row, left to right).
    pub fn pieces(&self, color: Color) -> Vec<Piece> {
        self.squares
            .iter()
            .flatten()
            .filter_map(|sq| *sq)
            .filter(|p| p.color == color)
            .collect()
    }

    /// Grey wins when red has nothing left and vice versa. A side with pieces
    /// but no legal move is not treated as lost.
    pub fn winner(&self) -> Option<Color> {
        if self.red_left == 0 {
            Some(Color::Grey)
        } else if self.grey_left == 0 {
            Some(Color::Red)
        } else {
            None
        }
    }

    /// Material score, positive when grey is ahead. Each king is worth half a
    /// man on top of the man it still counts as.
    pub fn evaluate(&self) -> f64 {
        let men = self.grey_left as f64 - self.red_left as f64;
        let kings = self.grey_kings as f64 - self.red_kings as f64;
        men + 0.5 * kings
    }

    // =========================================================================
    // Move generation
    // =========================================================================

    /// Every square `piece` can finish on this turn, with the pieces it jumps
    /// to get there.
    ///
    /// Men scan their two forward diagonals, kings all four. A jump lands on
    /// the empty square directly behind an opposing piece; from each landing
    /// square the chain continues in the same vertical direction over both
    /// diagonals. Every landing square of a chain is a destination of its own,
    /// so a chain may be stopped early. No simple step is allowed after a jump.
    ///
    /// Two chains can land on the same square (left-then-right versus
    /// right-then-left). They always have the same length since every jump
    /// covers two rows in the same direction, so the first one found is kept,
    /// and left scans run before right scans.
    pub fn legal_moves(&self, piece: &Piece) -> MoveMap {
        let mut moves = MoveMap::new();

        let forward = piece.color.forward();
        let mut directions = vec![forward];
        if piece.king {
            directions.push(-forward);
        }

        for dr in directions {
            for dc in [-1, 1] {
                self.scan(piece.row, piece.col, dr, dc, piece.color, &[], &mut moves);
            }
        }

        moves
    }

    /// Look one diagonal out from `(row, col)`. `captured` is the chain that
    /// brought the piece here; it is empty on the first hop.
    #[allow(clippy::too_many_arguments)]
    fn scan(
        &self,
        row: usize,
        col: usize,
        dr: i32,
        dc: i32,
        color: Color,
        captured: &[Piece],
        moves: &mut MoveMap,
    ) {
        let (r, c) = (row as i32 + dr, col as i32 + dc);
        if !Self::in_bounds(r, c) {
            return;
        }

        match self.squares[r as usize][c as usize] {
            None => {
                if captured.is_empty() {
                    moves.entry((r as usize, c as usize)).or_default();
                }
            }
            Some(p) if p.color == color => {}
            Some(victim) => {
                let (lr, lc) = (r + dr, c + dc);
                if !Self::in_bounds(lr, lc) || self.squares[lr as usize][lc as usize].is_some() {
                    return;
                }
                let (lr, lc) = (lr as usize, lc as usize);

                let mut chain = captured.to_vec();
                chain.push(victim);
                moves.entry((lr, lc)).or_insert_with(|| chain.clone());

                for next_dc in [-1, 1] {
                    self.scan(lr, lc, dr, next_dc, color, &chain, moves);
                }
            }
        }
    }

    /// Every legal move of `color`: pieces in grid scan order, then each
    /// piece's destinations in `(row, col)` order.
    pub fn all_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for piece in self.pieces(color) {
            for (to, captured) in self.legal_moves(&piece) {
                moves.push(Move {
                    from: piece.square(),
                    to,
                    captured: captured.iter().map(Piece::square).collect(),
                });
            }
        }
        moves
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Move `piece` to `(row, col)` and crown it if it reached its far row.
    /// No legality check: the destination must come from `legal_moves`.
    /// Returns the piece as it now stands on the board.
    pub fn apply_move(&mut self, piece: &Piece, row: usize, col: usize) -> Piece {
        let Some(mut moved) = self.squares[piece.row][piece.col].take() else {
            log::warn!("apply_move: no piece on {:?}", piece.square());
            return *piece;
        };
        debug_assert!(self.squares[row][col].is_none(), "destination {:?} occupied", (row, col));

        moved.row = row;
        moved.col = col;
        if !moved.king && row == moved.color.king_row() {
            moved.king = true;
            *self.kings_mut(moved.color) += 1;
        }
        self.squares[row][col] = Some(moved);
        moved
    }

    /// Take captured pieces off the board. Pieces no longer on their square
    /// are skipped so the counts never drift.
    pub fn remove(&mut self, pieces: &[Piece]) {
        for piece in pieces {
            if self.clear(piece.row, piece.col).is_none() {
                log::warn!("remove: square {:?} already empty", piece.square());
            }
        }
    }

    /// Apply a whole move, captures included.
    pub fn apply(&mut self, mv: &Move) {
        let Some(piece) = self.get_piece(mv.from.0, mv.from.1) else {
            log::warn!("apply: no piece on {:?}", mv.from);
            return;
        };
        let captured: Vec<Piece> = mv
            .captured
            .iter()
            .filter_map(|&(r, c)| self.get_piece(r, c))
            .collect();
        self.apply_move(&piece, mv.to.0, mv.to.1);
        self.remove(&captured);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - r)?;
            for (c, sq) in row.iter().enumerate() {
                let ch = match sq {
                    Some(p) => p.symbol(),
                    None if Self::is_playable(r, c) => '.',
                    None => ' ',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}
