use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tictactoe_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use tictactoe_common::games::tictactoe::{BotType, TicTacToeSettings};
use tictactoe_common::logger::LogLevel;

pub const CONFIG_FILE: &str = "tictactoe_config.yaml";

pub fn get_config_manager(
    path: &Path,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub game: TicTacToeSettings,
    pub players: Vec<PlayerConfig>,
    pub log_level: LogLevel,
}

/// How one player index is shown and who plays it. No bot means a human
/// at the terminal.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct PlayerConfig {
    pub symbol: String,
    pub bot: Option<BotType>,
}

impl Config {
    pub fn symbols(&self) -> Vec<String> {
        self.players.iter().map(|p| p.symbol.clone()).collect()
    }

    pub fn bot_assignments(&self) -> HashMap<usize, BotType> {
        self.players
            .iter()
            .enumerate()
            .filter_map(|(index, player)| player.bot.map(|bot| (index, bot)))
            .collect()
    }

    pub fn all_bots(&self) -> bool {
        self.players.iter().all(|p| p.bot.is_some())
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        if self.players.len() != self.game.player_count {
            return Err(format!(
                "players lists {} entries but player_count is {}",
                self.players.len(),
                self.game.player_count
            ));
        }
        let mut seen = HashSet::new();
        for player in &self.players {
            player.validate()?;
            if !seen.insert(player.symbol.as_str()) {
                return Err(format!(
                    "symbol '{}' is used by more than one player",
                    player.symbol
                ));
            }
        }
        Ok(())
    }
}

impl Validate for PlayerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.symbol.trim().is_empty() {
            return Err("player symbol must not be empty".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: TicTacToeSettings::default(),
            players: vec![
                PlayerConfig {
                    symbol: "X".to_string(),
                    bot: None,
                },
                PlayerConfig {
                    symbol: "O".to_string(),
                    bot: Some(BotType::Minimax),
                },
            ],
            log_level: LogLevel::Info,
        }
    }
}
