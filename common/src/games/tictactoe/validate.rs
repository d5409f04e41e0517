use crate::config::Validate;
use super::settings::TicTacToeSettings;
use super::types::CELL_COUNT;

impl Validate for TicTacToeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.player_count < 2 {
            return Err("TicTacToe requires at least 2 players".to_string());
        }
        if self.player_count > CELL_COUNT {
            return Err(format!(
                "Player count ({}) cannot exceed the number of cells ({})",
                self.player_count, CELL_COUNT
            ));
        }
        if self.first_player_offset >= self.player_count {
            return Err(format!(
                "First player offset ({}) must be below player count ({})",
                self.first_player_offset, self.player_count
            ));
        }
        Ok(())
    }
}
