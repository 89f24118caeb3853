use crate::board::Board;
use crate::engine::{pick_move, AiConfig};
use crate::game::Game;
use crate::moves::square_name;
use crate::piece::Color;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SquarePiece {
    color: String,
    king: bool,
}

#[derive(Serialize)]
struct TargetJson {
    to: [usize; 2],
    captured: Vec<[usize; 2]>,
}

#[derive(Serialize)]
struct BoardState {
    squares: Vec<Vec<Option<SquarePiece>>>,
    current_turn: String,
    winner: Option<String>,
    selected: Option<[usize; 2]>,
    valid_moves: Vec<TargetJson>,
    red_left: usize,
    grey_left: usize,
    red_kings: usize,
    grey_kings: usize,
    score: f64,
}

fn color_to_string(c: Color) -> String {
    match c {
        Color::Red => "Red".to_string(),
        Color::Grey => "Grey".to_string(),
    }
}

fn build_board_state(game: &Game) -> BoardState {
    let board: &Board = game.board();
    let squares: Vec<Vec<Option<SquarePiece>>> = board
        .squares
        .iter()
        .map(|row| {
            row.iter()
                .map(|sq| {
                    sq.map(|p| SquarePiece {
                        color: color_to_string(p.color),
                        king: p.king,
                    })
                })
                .collect()
        })
        .collect();

    let valid_moves: Vec<TargetJson> = game
        .valid_moves()
        .iter()
        .map(|(&(r, c), captured)| TargetJson {
            to: [r, c],
            captured: captured.iter().map(|p| [p.row, p.col]).collect(),
        })
        .collect();

    BoardState {
        squares,
        current_turn: color_to_string(game.turn()),
        winner: game.winner().map(color_to_string),
        selected: game.selected().map(|p| [p.row, p.col]),
        valid_moves,
        red_left: board.red_left,
        grey_left: board.grey_left,
        red_kings: board.red_kings,
        grey_kings: board.grey_kings,
        score: board.evaluate(),
    }
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    ai_config: AiConfig,
    last_evals: u64,
    last_think_ms: f64,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        WebGame {
            game: Game::new(),
            ai_config: AiConfig::new(),
            last_evals: 0,
            last_think_ms: 0.0,
        }
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.ai_config.depth = depth.clamp(1, crate::engine::MAX_DEPTH);
    }

    /// Replace the engine settings with a JSON config. Returns an error
    /// message, or null on success.
    pub fn load_config(&mut self, json: &str) -> Option<String> {
        match AiConfig::from_json(json) {
            Ok(config) => {
                self.ai_config = config;
                None
            }
            Err(e) => Some(e.to_string()),
        }
    }

    pub fn get_board_state(&self) -> JsValue {
        let state = build_board_state(&self.game);
        serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL)
    }

    /// A click on a board cell. Returns whether a piece is now selected, so
    /// the page knows to highlight its targets.
    pub fn click(&mut self, row: usize, col: usize) -> bool {
        self.game.select(row, col)
    }

    pub fn is_computer_turn(&self) -> bool {
        self.game.winner().is_none() && self.game.turn() == self.ai_config.computer
    }

    pub fn make_ai_move(&mut self) -> JsValue {
        if self.is_computer_turn() {
            let started = js_sys::Date::now();
            if let Some(result) = pick_move(self.game.board(), &self.ai_config) {
                self.last_evals = result.evals;
                self.game.replace_board(result.board);
            }
            self.last_think_ms = js_sys::Date::now() - started;
        }
        self.get_board_state()
    }

    pub fn reset(&mut self) {
        self.game.reset();
        self.last_evals = 0;
    }

    pub fn square_name(&self, row: usize, col: usize) -> String {
        if row < 8 && col < 8 {
            square_name((row, col))
        } else {
            String::new()
        }
    }

    pub fn get_last_evals(&self) -> u64 {
        self.last_evals
    }

    pub fn get_last_think_ms(&self) -> f64 {
        self.last_think_ms
    }
}
