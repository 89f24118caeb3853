// Plays the engine (grey) against a random mover (red) and reports how the
// games end. Set RUST_LOG=debug to follow the engine's searches, or pass a
// JSON engine config as the first argument, e.g. '{"depth": 3}'.

use checkers::engine::AiConfig;
use checkers::game::Game;
use checkers::piece::Color;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

const GAMES: usize = 20;
const MAX_MOVES: u32 = 200;
const SEED: u64 = 7;

enum Outcome {
    Won(Color),
    Stuck(Color),
    MoveLimit,
}

fn play_game(config: &AiConfig, rng: &mut StdRng) -> (Outcome, u32) {
    let mut game = Game::new();
    let human = config.computer.opposite();

    for ply in 0..MAX_MOVES {
        if let Some(winner) = game.winner() {
            return (Outcome::Won(winner), ply);
        }

        let moved = if game.turn() == config.computer {
            game.computer_move(config)
        } else {
            let moves = game.board().all_moves(human);
            match moves.choose(rng) {
                Some(mv) => game.play_notation(&mv.to_notation()).unwrap_or(false),
                None => false,
            }
        };

        if !moved {
            return (Outcome::Stuck(game.turn()), ply);
        }
    }

    (Outcome::MoveLimit, MAX_MOVES)
}

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(json) => match AiConfig::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(2);
            }
        },
        None => AiConfig::new(),
    };
    log::info!("engine config: {config:?}");

    let mut rng = StdRng::seed_from_u64(SEED);
    let (mut engine_wins, mut random_wins, mut unfinished) = (0, 0, 0);

    for i in 0..GAMES {
        let (outcome, plies) = play_game(&config, &mut rng);
        let summary = match outcome {
            Outcome::Won(color) if color == config.computer => {
                engine_wins += 1;
                format!("{color:?} (engine) wins")
            }
            Outcome::Won(color) => {
                random_wins += 1;
                format!("{color:?} (random) wins")
            }
            Outcome::Stuck(color) => {
                unfinished += 1;
                format!("{color:?} has no move")
            }
            Outcome::MoveLimit => {
                unfinished += 1;
                "move limit".to_string()
            }
        };
        println!("game {:>2}: {summary} after {plies} plies", i + 1);
    }

    println!("\nengine {engine_wins}, random {random_wins}, unfinished {unfinished} (out of {GAMES})");
}
