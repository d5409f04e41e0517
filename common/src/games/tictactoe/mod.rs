mod board;
mod bot_controller;
mod game_controller;
mod session;
mod settings;
mod turn_sequencer;
mod types;
mod validate;
mod win_detector;

pub use board::{Grid, get_available_moves};
pub use bot_controller::{Agent, Bot, BotInput, BotType, calculate_minimax_move, calculate_move};
pub use game_controller::GameController;
pub use session::{GameSnapshot, TicTacToeSession, TicTacToeSessionState};
pub use settings::TicTacToeSettings;
pub use turn_sequencer::TurnSequencer;
pub use types::{
    BoardError, CELL_COUNT, GRID_SIZE, GameStatus, LineKind, Mark, MoveResult, Outcome, Position,
    WinningLine,
};
pub use win_detector::{count_empty, find_line_winner, is_full, is_terminal};
