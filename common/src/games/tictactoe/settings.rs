use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeSettings {
    pub player_count: usize,
    pub first_player_offset: usize,
}

impl Default for TicTacToeSettings {
    fn default() -> Self {
        Self {
            player_count: 2,
            first_player_offset: 0,
        }
    }
}
