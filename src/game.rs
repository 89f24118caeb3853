use crate::board::{Board, MoveMap};
use crate::engine::{pick_move, AiConfig};
use crate::error::CheckersResult;
use crate::moves::Move;
use crate::piece::{Color, Piece};

/// Turn orchestration between the human (red) and the computer (grey).
///
/// A presentation layer feeds clicks into [`Game::select`] and redraws from
/// [`Game::board`] and [`Game::valid_moves`] after every call. The computer's
/// turn goes through [`Game::computer_move`] or, for callers running the
/// search themselves, [`Game::replace_board`].
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Color,
    selected: Option<Piece>,
    valid_moves: MoveMap,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Board::new(), Color::Red)
    }

    /// Start from an arbitrary position with `turn` to move.
    pub fn from_position(board: Board, turn: Color) -> Self {
        Game {
            board,
            turn,
            selected: None,
            valid_moves: MoveMap::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn selected(&self) -> Option<Piece> {
        self.selected
    }

    /// Destinations of the selected piece with the pieces each one captures.
    /// Empty when nothing is selected.
    pub fn valid_moves(&self) -> &MoveMap {
        &self.valid_moves
    }

    pub fn winner(&self) -> Option<Color> {
        self.board.winner()
    }

    /// Handle a click on `(row, col)`.
    ///
    /// With a piece selected the click is first tried as its destination; a
    /// completed move hands the turn over and returns `false`. Otherwise the
    /// selection is dropped and the click is treated as picking a piece,
    /// which succeeds only for a piece of the side to move. Returns whether a
    /// new selection was made.
    pub fn select(&mut self, row: usize, col: usize) -> bool {
        if self.selected.is_some() {
            if self.move_selected(row, col) {
                return false;
            }
            self.deselect();
        }

        match self.board.get_piece(row, col) {
            Some(piece) if piece.color == self.turn => {
                self.valid_moves = self.board.legal_moves(&piece);
                self.selected = Some(piece);
                log::trace!("{:?} selected {:?}, {} moves", self.turn, piece.square(), self.valid_moves.len());
                true
            }
            _ => false,
        }
    }

    fn deselect(&mut self) {
        self.selected = None;
        self.valid_moves.clear();
    }

    /// Move the selected piece to `(row, col)` if that is one of its valid
    /// destinations.
    fn move_selected(&mut self, row: usize, col: usize) -> bool {
        let Some(piece) = self.selected else {
            return false;
        };
        if self.board.get_piece(row, col).is_some() {
            return false;
        }
        let Some(captured) = self.valid_moves.get(&(row, col)).cloned() else {
            return false;
        };

        self.board.apply_move(&piece, row, col);
        self.board.remove(&captured);
        log::debug!(
            "{:?} played {}",
            self.turn,
            Move {
                from: piece.square(),
                to: (row, col),
                captured: captured.iter().map(Piece::square).collect(),
            }
            .to_notation()
        );
        self.change_turn();
        true
    }

    fn change_turn(&mut self) {
        self.deselect();
        self.turn = self.turn.opposite();
    }

    /// Install a board produced by the search and pass the turn.
    pub fn replace_board(&mut self, board: Board) {
        self.board = board;
        self.change_turn();
    }

    /// Let the engine play its move if it is the engine's turn. Returns
    /// whether a move was made.
    pub fn computer_move(&mut self, config: &AiConfig) -> bool {
        if self.turn != config.computer || self.winner().is_some() {
            return false;
        }
        match pick_move(&self.board, config) {
            Some(result) => {
                self.replace_board(result.board);
                true
            }
            None => false,
        }
    }

    /// Play a move given as text ("c3-d4", "c3xe5") for the side to move, as
    /// two clicks. `Ok(false)` if the move is not legal.
    pub fn play_notation(&mut self, notation: &str) -> CheckersResult<bool> {
        let (from, to) = Move::parse(notation)?;
        let turn = self.turn;
        self.deselect();
        if !self.select(from.0, from.1) {
            return Ok(false);
        }
        self.select(to.0, to.1);
        if self.turn == turn {
            self.deselect();
            return Ok(false);
        }
        Ok(true)
    }
}
