use tokio::io::{AsyncBufReadExt, BufReader};

use tictactoe_common::games::tictactoe::{
    GameSnapshot, MoveResult, Outcome, TicTacToeSession, TicTacToeSessionState,
};
use tictactoe_common::{log, log_debug};
use crate::config::Config;
use crate::terminal::{Command, TerminalBroadcaster, parse_command, symbol_for};

const HELP: &str = "Enter a move as `row col` (0-2), `r` to restart or `q` to quit";

/// Plays games at the terminal until the user quits. Bots in the config
/// move on their own; every other player types moves on stdin.
pub async fn run_interactive(config: &Config, seed: u64) -> Result<(), String> {
    let session_state =
        TicTacToeSessionState::create(&config.game, config.bot_assignments(), seed)?;
    let broadcaster = TerminalBroadcaster::new(config.symbols(), true);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);

    loop {
        let mut game_handle = tokio::spawn(TicTacToeSession::run(
            session_state.clone(),
            broadcaster.clone(),
        ));

        loop {
            tokio::select! {
                result = &mut game_handle => {
                    let snapshot = result.map_err(|e| format!("Game task failed: {}", e))?;
                    log_debug!("Game finished with {:?}", snapshot.outcome);
                    break;
                }
                line = lines.next_line() => {
                    let line = line.map_err(|e| format!("Failed to read input: {}", e))?;
                    match line.as_deref().map(parse_command) {
                        None | Some(Command::Quit) => {
                            game_handle.abort();
                            return Ok(());
                        }
                        Some(Command::Restart) => session_state.restart().await,
                        Some(Command::Place { row, col }) => {
                            let result = session_state.submit_move(row, col).await;
                            if result != MoveResult::Accepted {
                                println!("{}", result);
                            }
                        }
                        Some(Command::Unknown) => println!("{}", HELP),
                    }
                }
            }
        }

        println!("Play again? [y/N]");
        match lines.next_line().await {
            Ok(Some(answer)) if answer.trim().eq_ignore_ascii_case("y") => {
                session_state.restart().await;
            }
            _ => return Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelfPlayTally {
    pub wins: Vec<u32>,
    pub ties: u32,
}

impl SelfPlayTally {
    pub fn new(player_count: usize) -> Self {
        Self {
            wins: vec![0; player_count],
            ties: 0,
        }
    }

    pub fn record(&mut self, snapshot: &GameSnapshot) {
        match snapshot.outcome {
            Outcome::Win(line) => {
                if let Some(count) = line.player_index().and_then(|p| self.wins.get_mut(p)) {
                    *count += 1;
                }
            }
            Outcome::NoWinner => self.ties += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.wins.iter().sum::<u32>() + self.ties
    }

    pub fn summary(&self, symbols: &[String]) -> String {
        let mut parts: Vec<String> = self
            .wins
            .iter()
            .enumerate()
            .map(|(player, wins)| format!("{}: {} wins", symbol_for(symbols, player), wins))
            .collect();
        parts.push(format!("ties: {}", self.ties));
        format!("{} games | {}", self.games(), parts.join(", "))
    }
}

/// Plays `games` bot-only games back to back. Restarting between games
/// rotates who opens.
pub async fn run_self_play(
    config: &Config,
    games: u32,
    seed: u64,
) -> Result<SelfPlayTally, String> {
    if !config.all_bots() {
        return Err("Self-play requires a bot for every player".to_string());
    }

    let session_state =
        TicTacToeSessionState::create(&config.game, config.bot_assignments(), seed)?;
    let broadcaster = TerminalBroadcaster::new(config.symbols(), false);
    let mut tally = SelfPlayTally::new(config.game.player_count);

    for game in 0..games {
        if game > 0 {
            session_state.restart().await;
        }
        let snapshot = TicTacToeSession::run(session_state.clone(), broadcaster.clone()).await;
        if !snapshot.finished {
            return Err(format!("Game {} stopped before it finished", game + 1));
        }
        tally.record(&snapshot);
    }

    log!("Self-play done: {}", tally.summary(&config.symbols()));
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerConfig;
    use tictactoe_common::games::tictactoe::{BotType, TicTacToeSettings};

    fn bot_config(bots: &[BotType]) -> Config {
        Config {
            game: TicTacToeSettings {
                player_count: bots.len(),
                first_player_offset: 0,
            },
            players: bots
                .iter()
                .enumerate()
                .map(|(i, bot)| PlayerConfig {
                    symbol: format!("P{}", i),
                    bot: Some(*bot),
                })
                .collect(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_minimax_self_play_always_ties() {
        let config = bot_config(&[BotType::Minimax, BotType::Minimax]);
        let tally = run_self_play(&config, 4, 3).await.unwrap();
        assert_eq!(tally, SelfPlayTally { wins: vec![0, 0], ties: 4 });
    }

    #[tokio::test]
    async fn test_minimax_never_loses_to_random() {
        let config = bot_config(&[BotType::Random, BotType::Minimax]);
        let tally = run_self_play(&config, 6, 8).await.unwrap();
        assert_eq!(tally.wins[0], 0);
        assert_eq!(tally.games(), 6);
    }

    #[tokio::test]
    async fn test_three_random_bots_finish_every_game() {
        let config = bot_config(&[BotType::Random, BotType::Random, BotType::Random]);
        let tally = run_self_play(&config, 5, 12).await.unwrap();
        assert_eq!(tally.games(), 5);
    }

    #[tokio::test]
    async fn test_self_play_requires_bots() {
        assert!(run_self_play(&Config::default(), 1, 0).await.is_err());
    }

    #[test]
    fn test_summary_lists_every_player() {
        let tally = SelfPlayTally { wins: vec![2, 1], ties: 3 };
        let symbols = vec!["X".to_string(), "O".to_string()];
        assert_eq!(tally.summary(&symbols), "6 games | X: 2 wins, O: 1 wins, ties: 3");
    }
}
