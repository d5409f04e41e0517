use std::sync::Arc;

use tictactoe_common::games::GameBroadcaster;
use tictactoe_common::games::tictactoe::{GRID_SIZE, GameSnapshot, Grid, Outcome, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place { row: usize, col: usize },
    Restart,
    Quit,
    Unknown,
}

/// Parses `row col` (zero-based), `r` or `q`. Coordinates outside the grid
/// are treated as unknown input and never reach the game.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "q" | "quit" => return Command::Quit,
        "r" | "restart" => return Command::Restart,
        _ => {}
    }

    let parts: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .collect();
    let [row, col] = parts.as_slice() else {
        return Command::Unknown;
    };
    match (row.parse::<usize>(), col.parse::<usize>()) {
        (Ok(row), Ok(col)) if row < GRID_SIZE && col < GRID_SIZE => Command::Place { row, col },
        _ => Command::Unknown,
    }
}

pub fn symbol_for(symbols: &[String], player_index: usize) -> String {
    symbols
        .get(player_index)
        .cloned()
        .unwrap_or_else(|| (player_index + 1).to_string())
}

/// Draws the grid, bracketing the cells of a winning line.
pub fn render_grid(grid: &Grid, symbols: &[String], outcome: &Outcome) -> String {
    let highlighted: Vec<Position> = match outcome {
        Outcome::Win(line) => line.cells().to_vec(),
        Outcome::NoWinner => Vec::new(),
    };

    let mut lines = Vec::with_capacity(GRID_SIZE * 2);
    for (row, cells) in grid.rows().iter().enumerate() {
        let rendered: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(col, mark)| {
                let text = match mark.player_index() {
                    Some(player) => symbol_for(symbols, player),
                    None => ".".to_string(),
                };
                if highlighted.contains(&Position::new(row, col)) {
                    format!("[{}]", text)
                } else {
                    format!(" {} ", text)
                }
            })
            .collect();
        lines.push(rendered.join("|"));
        if row + 1 < GRID_SIZE {
            lines.push("---+---+---".to_string());
        }
    }
    lines.join("\n")
}

pub fn describe_result(snapshot: &GameSnapshot, symbols: &[String]) -> String {
    match snapshot.outcome {
        Outcome::Win(line) => match line.player_index() {
            Some(player) => format!("{} wins!", symbol_for(symbols, player)),
            None => "Game over".to_string(),
        },
        Outcome::NoWinner if snapshot.finished => "It's a tie.".to_string(),
        Outcome::NoWinner => "Game stopped.".to_string(),
    }
}

/// Prints session snapshots to stdout. With `show_moves` off only final
/// results are printed.
#[derive(Clone)]
pub struct TerminalBroadcaster {
    symbols: Arc<Vec<String>>,
    show_moves: bool,
}

impl TerminalBroadcaster {
    pub fn new(symbols: Vec<String>, show_moves: bool) -> Self {
        Self {
            symbols: Arc::new(symbols),
            show_moves,
        }
    }
}

impl GameBroadcaster for TerminalBroadcaster {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        if !self.show_moves || snapshot.finished {
            return;
        }
        println!("\n{}", render_grid(&snapshot.grid, &self.symbols, &snapshot.outcome));
        println!("{} to move", symbol_for(&self.symbols, snapshot.current_player));
    }

    async fn broadcast_game_over(&self, snapshot: GameSnapshot) {
        if self.show_moves {
            println!("\n{}", render_grid(&snapshot.grid, &self.symbols, &snapshot.outcome));
        }
        println!("{}", describe_result(&snapshot, &self.symbols));
    }
}
