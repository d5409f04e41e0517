use serde::{Deserialize, Serialize};

use crate::games::SessionRng;
use crate::log_debug;
use super::board::{Grid, get_available_moves};
use super::game_controller::GameController;
use super::types::{CELL_COUNT, Mark, Position};
use super::win_detector::{count_empty, find_line_winner, is_terminal};

/// Opening cells and their draw weights: the center, then the four corners.
const OPENING_MOVES: [(Position, f64); 5] = [
    (Position { row: 1, col: 1 }, 0.5),
    (Position { row: 0, col: 0 }, 0.125),
    (Position { row: 0, col: 2 }, 0.125),
    (Position { row: 2, col: 0 }, 0.125),
    (Position { row: 2, col: 2 }, 0.125),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BotType {
    Random,
    Minimax,
}

/// Everything a bot may look at: a copy of the grid and the turn context.
#[derive(Debug, Clone)]
pub struct BotInput {
    pub grid: Grid,
    pub current_player: usize,
    pub player_count: usize,
}

impl BotInput {
    pub fn from_controller(controller: &GameController) -> Self {
        Self {
            grid: controller.snapshot_grid(),
            current_player: controller.current_player(),
            player_count: controller.player_count(),
        }
    }
}

/// Proposes a move for the player about to move. Implementations only read
/// the input; the controller re-validates whatever they return.
pub trait Agent {
    fn select_move(&mut self, input: &BotInput) -> Option<Position>;
}

pub struct Bot {
    bot_type: BotType,
    rng: SessionRng,
}

impl Bot {
    pub fn new(bot_type: BotType, rng: SessionRng) -> Self {
        Self { bot_type, rng }
    }

    pub fn bot_type(&self) -> BotType {
        self.bot_type
    }
}

impl Agent for Bot {
    fn select_move(&mut self, input: &BotInput) -> Option<Position> {
        calculate_move(self.bot_type, input, &mut self.rng)
    }
}

pub fn calculate_move(
    bot_type: BotType,
    input: &BotInput,
    rng: &mut SessionRng,
) -> Option<Position> {
    match bot_type {
        BotType::Random => calculate_random_move(input, rng),
        BotType::Minimax => calculate_minimax_move(input, rng),
    }
}

fn calculate_random_move(input: &BotInput, rng: &mut SessionRng) -> Option<Position> {
    let available_moves = get_available_moves(&input.grid);
    if available_moves.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..available_moves.len());
    Some(available_moves[idx])
}

struct SearchContext {
    maximizing_mark: Mark,
    player_count: usize,
}

/// Exhaustive minimax for the player to move. An empty grid short-cuts to
/// a weighted opening draw; equal best scores are broken at random.
pub fn calculate_minimax_move(input: &BotInput, rng: &mut SessionRng) -> Option<Position> {
    let available_moves = get_available_moves(&input.grid);
    if available_moves.is_empty() {
        return None;
    }

    if available_moves.len() == CELL_COUNT {
        return Some(opening_move(rng));
    }

    let mover = input.current_player;
    let context = SearchContext {
        maximizing_mark: Mark::for_player(mover),
        player_count: input.player_count,
    };
    let depth = available_moves.len();
    let mut grid = input.grid;

    let mut best_moves = Vec::new();
    let mut best_score = i32::MIN;

    for pos in available_moves {
        grid.put(pos, context.maximizing_mark);
        let score = minimax(&mut grid, depth, false, mover, &context);
        log_debug!("Candidate ({}, {}) scored {}\n{}", pos.row, pos.col, score, grid);
        grid.put(pos, Mark::EMPTY);

        if score > best_score {
            best_score = score;
            best_moves.clear();
            best_moves.push(pos);
        } else if score == best_score {
            best_moves.push(pos);
        }
    }

    let idx = rng.random_range(0..best_moves.len());
    Some(best_moves[idx])
}

fn opening_move(rng: &mut SessionRng) -> Position {
    let weights = OPENING_MOVES.map(|(_, weight)| weight);
    let idx = rng.choose_weighted(&weights).unwrap_or(0);
    OPENING_MOVES[idx].0
}

/// `mover` is the player who produced `grid`; children are built for the
/// next player in turn order. Maximizing and minimizing plies alternate
/// regardless of how many players there are.
fn minimax(
    grid: &mut Grid,
    depth: usize,
    is_maximizing: bool,
    mover: usize,
    context: &SearchContext,
) -> i32 {
    if depth == 0 || is_terminal(grid) {
        return evaluate(grid, context.maximizing_mark);
    }

    let next_mover = (mover + 1) % context.player_count;
    let next_mark = Mark::for_player(next_mover);

    let mut best = if is_maximizing { i32::MIN } else { i32::MAX };
    for pos in get_available_moves(grid) {
        grid.put(pos, next_mark);
        let score = minimax(grid, depth - 1, !is_maximizing, next_mover, context);
        grid.put(pos, Mark::EMPTY);

        best = if is_maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

/// Faster wins score higher, slower losses score lower.
fn evaluate(grid: &Grid, maximizing_mark: Mark) -> i32 {
    let empty = count_empty(grid) as i32;
    match find_line_winner(grid).winner() {
        Some(mark) if mark == maximizing_mark => 1 + empty,
        Some(_) => -(1 + empty),
        None => 0,
    }
}
