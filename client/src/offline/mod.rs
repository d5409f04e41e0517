mod tictactoe_runner;

pub use tictactoe_runner::{run_interactive, run_self_play};
