use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

use crate::config::Validate;
use crate::games::{GameBroadcaster, SessionRng};
use crate::{log, log_warn};
use super::board::Grid;
use super::bot_controller::{BotInput, BotType, calculate_move};
use super::game_controller::GameController;
use super::settings::TicTacToeSettings;
use super::types::{MoveResult, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub grid: Grid,
    pub current_player: usize,
    pub finished: bool,
    pub outcome: Outcome,
}

impl GameSnapshot {
    pub fn from_controller(controller: &GameController) -> Self {
        Self {
            grid: controller.snapshot_grid(),
            current_player: controller.current_player(),
            finished: controller.is_finished(),
            outcome: controller.current_outcome(),
        }
    }
}

/// Shared handle to one live game. All mutation goes through the inner
/// controller under its lock; bot searches run on copies outside it.
#[derive(Clone)]
pub struct TicTacToeSessionState {
    pub game: Arc<Mutex<GameController>>,
    pub bots: HashMap<usize, BotType>,
    pub rng: Arc<Mutex<SessionRng>>,
    pub turn_notify: Arc<Notify>,
}

impl TicTacToeSessionState {
    /// `bots` maps player indices to the bot that plays them; every other
    /// player is expected to move through `submit_move`.
    pub fn create(
        settings: &TicTacToeSettings,
        bots: HashMap<usize, BotType>,
        seed: u64,
    ) -> Result<Self, String> {
        settings.validate()?;

        if let Some(player) = bots.keys().find(|&&player| player >= settings.player_count) {
            return Err(format!(
                "Bot assigned to player {} but the game has {} players",
                player, settings.player_count
            ));
        }

        Ok(Self {
            game: Arc::new(Mutex::new(GameController::new(settings))),
            bots,
            rng: Arc::new(Mutex::new(SessionRng::new(seed))),
            turn_notify: Arc::new(Notify::new()),
        })
    }

    pub fn is_bot(&self, player: usize) -> bool {
        self.bots.contains_key(&player)
    }

    /// Human move. Moves attempted on a bot's turn are rejected as illegal.
    pub async fn submit_move(&self, row: usize, col: usize) -> MoveResult {
        let result = {
            let mut game = self.game.lock().await;
            if !game.is_finished() && self.is_bot(game.current_player()) {
                return MoveResult::RejectedIllegal;
            }
            game.apply_move(row, col)
        };

        if result.is_accepted() {
            self.turn_notify.notify_one();
        }
        result
    }

    pub async fn restart(&self) {
        self.game.lock().await.restart();
        self.turn_notify.notify_one();
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_controller(&*self.game.lock().await)
    }
}

pub struct TicTacToeSession;

impl TicTacToeSession {
    /// Drives one game to its end: bots move on their own, humans are
    /// awaited via the notify. Returns the final state.
    pub async fn run<B: GameBroadcaster>(
        session_state: TicTacToeSessionState,
        broadcaster: B,
    ) -> GameSnapshot {
        loop {
            let snapshot = session_state.snapshot().await;
            broadcaster.broadcast_state(snapshot.clone()).await;

            if snapshot.finished {
                break;
            }

            if session_state.is_bot(snapshot.current_player) {
                if play_bot_turn(&session_state).await == MoveResult::NotApplicable {
                    log_warn!(
                        "Bot for player {} could not move, stopping session",
                        snapshot.current_player
                    );
                    break;
                }
            } else {
                session_state.turn_notify.notified().await;
            }
        }

        let final_snapshot = session_state.snapshot().await;
        match final_snapshot.outcome {
            Outcome::Win(line) => log!("Game over: player {:?} won", line.player_index()),
            Outcome::NoWinner if final_snapshot.finished => log!("Game over: tie"),
            Outcome::NoWinner => log!("Session stopped before the game finished"),
        }
        broadcaster.broadcast_game_over(final_snapshot.clone()).await;
        final_snapshot
    }
}

/// Snapshots under the lock, searches without it, then re-validates the
/// proposal against the live board.
async fn play_bot_turn(session_state: &TicTacToeSessionState) -> MoveResult {
    let (bot_input, bot_type) = {
        let game = session_state.game.lock().await;
        if game.is_finished() {
            return MoveResult::NotApplicable;
        }
        let Some(&bot_type) = session_state.bots.get(&game.current_player()) else {
            return MoveResult::NotApplicable;
        };
        (BotInput::from_controller(&game), bot_type)
    };

    let mut rng = session_state.rng.lock().await.fork();
    let search_input = bot_input.clone();
    let calculated_move = tokio::task::spawn_blocking(move || {
        calculate_move(bot_type, &search_input, &mut rng)
    })
    .await;

    match calculated_move {
        Ok(proposal) => session_state
            .game
            .lock()
            .await
            .apply_proposal(&bot_input, proposal),
        Err(err) => {
            log_warn!("Bot search task failed: {}", err);
            MoveResult::NotApplicable
        }
    }
}
