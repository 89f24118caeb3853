// =============================================================================
// Checkers AI Engine
//
// Plain minimax with alpha-beta pruning over full board copies. Grey (the
// computer by default) is the maximizing side, red the minimizing side, and
// every score is Board::evaluate(), positive when grey is ahead.
//
// Each candidate move is played on its own clone of the board, so sibling
// lines never see each other's mutations and nothing has to be undone.
// Enumeration order is fixed (pieces in grid scan order, destinations in
// (row, col) order) and the first move reaching the best score wins, so a
// search is fully reproducible.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::CheckersResult;
use crate::piece::Color;

// =============================================================================
// Configuration
// =============================================================================

pub const DEFAULT_DEPTH: u32 = 1;
pub const MAX_DEPTH: u32 = 6;

/// Search settings. Loaded from JSON by the drivers; any field left out keeps
/// its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Search depth in plies (1..=MAX_DEPTH).
    pub depth: u32,
    /// The side the engine plays.
    pub computer: Color,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AiConfig {
    pub fn new() -> Self {
        AiConfig {
            depth: DEFAULT_DEPTH,
            computer: Color::Grey,
        }
    }

    pub fn from_json(json: &str) -> CheckersResult<Self> {
        let mut config: AiConfig = serde_json::from_str(json)?;
        config.depth = config.depth.clamp(1, MAX_DEPTH);
        Ok(config)
    }
}

/// The outcome of a root search: the board to install as the new game state,
/// its score, and the number of static evaluations it took.
#[derive(Clone, Debug)]
pub struct PickResult {
    pub score: f64,
    pub board: Board,
    pub evals: u64,
}

// =============================================================================
// Successor generation
// =============================================================================

/// Every board reachable by one move of `color`, captures applied.
pub fn successors(board: &Board, color: Color) -> Vec<Board> {
    let mut boards = Vec::new();
    for piece in board.pieces(color) {
        for ((row, col), captured) in board.legal_moves(&piece) {
            let mut next = board.clone();
            next.apply_move(&piece, row, col);
            next.remove(&captured);
            boards.push(next);
        }
    }
    boards
}

fn side(maximizing: bool) -> Color {
    if maximizing {
        Color::Grey
    } else {
        Color::Red
    }
}

// =============================================================================
// Search
// =============================================================================

/// Minimax with alpha-beta pruning.
///
/// Returns the best score reachable within `depth` plies and the successor
/// board that leads to it. At a leaf (depth exhausted or a side wiped out) or
/// when the side to move has no move at all, the input board comes back with
/// its static score.
pub fn best_move(board: &Board, alpha: f64, beta: f64, depth: u32, maximizing: bool) -> (f64, Board) {
    let mut evals = 0;
    let (score, best) = alpha_beta(board, alpha, beta, depth, maximizing, &mut evals);
    (score, best.unwrap_or_else(|| board.clone()))
}

fn alpha_beta(
    board: &Board,
    mut alpha: f64,
    mut beta: f64,
    depth: u32,
    maximizing: bool,
    evals: &mut u64,
) -> (f64, Option<Board>) {
    if depth == 0 || board.winner().is_some() {
        *evals += 1;
        return (board.evaluate(), None);
    }

    let children = successors(board, side(maximizing));
    if children.is_empty() {
        *evals += 1;
        return (board.evaluate(), None);
    }

    let mut best_score = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
    let mut best_board = None;

    for child in children {
        let (score, _) = alpha_beta(&child, alpha, beta, depth - 1, !maximizing, evals);
        if maximizing {
            if score > best_score {
                best_score = score;
                best_board = Some(child);
            }
            alpha = alpha.max(best_score);
        } else {
            if score < best_score {
                best_score = score;
                best_board = Some(child);
            }
            beta = beta.min(best_score);
        }
        if alpha >= beta {
            break;
        }
    }

    (best_score, best_board)
}

/// Unpruned minimax with the same enumeration order and tie-break as
/// [`best_move`]. Exponentially slower; kept as the reference the pruned
/// search is checked against.
pub fn minimax(board: &Board, depth: u32, maximizing: bool) -> (f64, Board) {
    if depth == 0 || board.winner().is_some() {
        return (board.evaluate(), board.clone());
    }

    let children = successors(board, side(maximizing));
    if children.is_empty() {
        return (board.evaluate(), board.clone());
    }

    let mut best: Option<(f64, Board)> = None;
    for child in children {
        let (score, _) = minimax(&child, depth - 1, !maximizing);
        let better = match &best {
            None => true,
            Some((b, _)) if maximizing => score > *b,
            Some((b, _)) => score < *b,
        };
        if better {
            best = Some((score, child));
        }
    }

    best.unwrap_or_else(|| (board.evaluate(), board.clone()))
}

// =============================================================================
// Move selection
// =============================================================================

/// Pick the computer's reply on `board`.
///
/// Returns `None` when the game is already decided or the computer has no
/// legal move; the caller then leaves the position as it is.
pub fn pick_move(board: &Board, config: &AiConfig) -> Option<PickResult> {
    if board.winner().is_some() {
        return None;
    }

    let maximizing = config.computer == Color::Grey;
    let mut evals = 0;
    let (score, best) = alpha_beta(
        board,
        f64::NEG_INFINITY,
        f64::INFINITY,
        config.depth.max(1),
        maximizing,
        &mut evals,
    );

    match best {
        Some(board) => {
            log::debug!(
                "{:?} search depth {}: score {score}, {evals} evals",
                config.computer,
                config.depth
            );
            Some(PickResult { score, board, evals })
        }
        None => {
            log::info!("{:?} has no legal move", config.computer);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;

    /// Grey on (2,5) can step to (3,4), where red on (4,3) jumps it, or to
    /// (3,6), which is safe. Both look equal one ply deep.
    fn board_with_hanging_step() -> Board {
        let mut board = Board::empty();
        board.place(Piece::new(2, 5, Color::Grey));
        board.place(Piece::new(4, 3, Color::Red));
        board.place(Piece::new(7, 0, Color::Red));
        board
    }

    /// A handful of opening moves so both sides have contact and captures.
    fn midgame() -> Board {
        let mut board = Board::new();
        for (from, to) in [
            ((5, 2), (4, 3)),
            ((2, 5), (3, 4)),
            ((5, 6), (4, 5)),
            ((2, 1), (3, 2)),
        ] {
            let piece = board.get_piece(from.0, from.1).unwrap();
            let captured = board.legal_moves(&piece)[&to].clone();
            board.apply_move(&piece, to.0, to.1);
            board.remove(&captured);
        }
        board
    }

    #[test]
    fn takes_a_free_piece() {
        let mut board = Board::empty();
        board.place(Piece::new(3, 2, Color::Grey));
        board.place(Piece::new(4, 3, Color::Red));
        board.place(Piece::new(7, 0, Color::Red));

        let (score, next) = best_move(&board, f64::NEG_INFINITY, f64::INFINITY, 1, true);
        assert_eq!(score, 0.0);
        assert!(next.get_piece(4, 3).is_none(), "red piece should be captured");
        assert_eq!(next.get_piece(5, 4).map(|p| p.color), Some(Color::Grey));
        // The live board is untouched.
        assert_eq!(board.red_left, 2);
    }

    #[test]
    fn depth_zero_is_a_leaf() {
        let board = Board::new();
        let (score, next) = best_move(&board, f64::NEG_INFINITY, f64::INFINITY, 0, true);
        assert_eq!(score, 0.0);
        assert_eq!(next, board);
    }

    #[test]
    fn decided_game_is_a_leaf() {
        let mut board = Board::empty();
        board.place(Piece::new(0, 1, Color::Grey));
        let (score, next) = best_move(&board, f64::NEG_INFINITY, f64::INFINITY, 3, false);
        assert_eq!(score, 1.0);
        assert_eq!(next, board);
    }

    #[test]
    fn no_legal_move_returns_the_input() {
        let mut board = Board::empty();
        board.place(Piece::new(3, 0, Color::Grey));
        board.place(Piece::new(4, 1, Color::Red));
        board.place(Piece::new(5, 2, Color::Red));

        assert!(successors(&board, Color::Grey).is_empty());
        let (score, next) = best_move(&board, f64::NEG_INFINITY, f64::INFINITY, 2, true);
        assert_eq!(score, -1.0);
        assert_eq!(next, board);
        assert!(pick_move(&board, &AiConfig::new()).is_none());
    }

    #[test]
    fn deeper_search_avoids_hanging_a_piece() {
        let board = board_with_hanging_step();

        // One ply: every move scores the same, the first one wins the tie.
        let (shallow, next) = best_move(&board, f64::NEG_INFINITY, f64::INFINITY, 1, true);
        assert_eq!(shallow, -1.0);
        assert!(next.get_piece(3, 4).is_some());

        let (deep, next) = best_move(&board, f64::NEG_INFINITY, f64::INFINITY, 2, true);
        assert_eq!(deep, -1.0);
        assert!(next.get_piece(3, 6).is_some(), "should step away from the jump");
    }

    #[test]
    fn pruning_matches_full_minimax() {
        let positions = [Board::new(), midgame(), board_with_hanging_step()];
        for (i, board) in positions.iter().enumerate() {
            for depth in 1..=4 {
                for maximizing in [true, false] {
                    let (pruned_score, pruned_board) =
                        best_move(board, f64::NEG_INFINITY, f64::INFINITY, depth, maximizing);
                    let (full_score, full_board) = minimax(board, depth, maximizing);
                    assert_eq!(
                        pruned_score, full_score,
                        "position {i}, depth {depth}, maximizing {maximizing}"
                    );
                    assert_eq!(
                        pruned_board, full_board,
                        "position {i}, depth {depth}, maximizing {maximizing}"
                    );
                }
            }
        }
    }

    #[test]
    fn search_is_reproducible() {
        let board = midgame();
        let first = best_move(&board, f64::NEG_INFINITY, f64::INFINITY, 3, true);
        let second = best_move(&board, f64::NEG_INFINITY, f64::INFINITY, 3, true);
        assert_eq!(first, second);
    }

    #[test]
    fn pick_move_plays_for_grey() {
        let board = Board::new();
        let result = pick_move(&board, &AiConfig::new()).expect("should find a move");
        assert!(result.evals > 0, "should have evaluated at least one position");
        assert_eq!(result.board.grey_left, 12);
        assert_ne!(result.board.pieces(Color::Grey), board.pieces(Color::Grey));
        assert_eq!(result.board.pieces(Color::Red), board.pieces(Color::Red));
    }

    #[test]
    fn pick_move_can_play_red() {
        let config = AiConfig { depth: 2, computer: Color::Red };
        let board = Board::new();
        let result = pick_move(&board, &config).expect("should find a move");
        assert_ne!(result.board.pieces(Color::Red), board.pieces(Color::Red));
        assert_eq!(result.board.pieces(Color::Grey), board.pieces(Color::Grey));
    }

    #[test]
    fn config_from_json() {
        let config = AiConfig::from_json(r#"{"depth": 3}"#).unwrap();
        assert_eq!(config, AiConfig { depth: 3, computer: Color::Grey });

        let config = AiConfig::from_json(r#"{"depth": 99, "computer": "Red"}"#).unwrap();
        assert_eq!(config.depth, MAX_DEPTH);
        assert_eq!(config.computer, Color::Red);

        assert_eq!(AiConfig::from_json("{}").unwrap(), AiConfig::new());
        assert!(matches!(
            AiConfig::from_json("{\"depth\": -1}"),
            Err(crate::error::CheckersError::Config(_))
        ));
    }
}
