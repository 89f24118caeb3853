use std::io::Write;

use checkers::board::Board;
use checkers::engine::{pick_move, AiConfig, MAX_DEPTH};
use checkers::piece::Color;

const MAX_PLIES: u32 = 150;

#[derive(Debug, Default)]
struct MatchResult {
    a_wins: u32,
    b_wins: u32,
    draws: u32,
}

/// Play one engine-vs-engine game. The search is deterministic, so a pairing
/// always produces the same game; swapping colours gives the second sample.
fn play_game(red: &AiConfig, grey: &AiConfig) -> Option<Color> {
    let mut board = Board::new();
    let mut turn = Color::Red;

    for _ in 0..MAX_PLIES {
        if let Some(winner) = board.winner() {
            return Some(winner);
        }
        let config = if turn == Color::Red { red } else { grey };
        match pick_move(&board, config) {
            Some(result) => board = result.board,
            None => return None,
        }
        turn = turn.opposite();
    }

    board.winner()
}

fn engine(depth: u32, computer: Color) -> AiConfig {
    AiConfig { depth, computer }
}

fn run_matchup(depth_a: u32, depth_b: u32) -> MatchResult {
    let mut result = MatchResult::default();

    // A as red, B as grey
    match play_game(&engine(depth_a, Color::Red), &engine(depth_b, Color::Grey)) {
        Some(Color::Red) => result.a_wins += 1,
        Some(Color::Grey) => result.b_wins += 1,
        None => result.draws += 1,
    }

    // B as red, A as grey
    match play_game(&engine(depth_b, Color::Red), &engine(depth_a, Color::Grey)) {
        Some(Color::Red) => result.b_wins += 1,
        Some(Color::Grey) => result.a_wins += 1,
        None => result.draws += 1,
    }

    result
}

fn main() {
    env_logger::init();

    println!("=== Checkers search depth matchups ===");
    println!("Max plies per game: {MAX_PLIES}\n");

    for depth_a in 1..MAX_DEPTH {
        for depth_b in (depth_a + 1)..=MAX_DEPTH {
            print!("  depth {depth_a} vs depth {depth_b}... ");
            std::io::stdout().flush().ok();
            let result = run_matchup(depth_a, depth_b);
            println!(
                "d{depth_a} wins {}, d{depth_b} wins {}, unfinished {}",
                result.a_wins, result.b_wins, result.draws
            );
        }
    }
}
