use crate::{log_debug, log_warn};
use super::board::Grid;
use super::bot_controller::{Agent, BotInput};
use super::settings::TicTacToeSettings;
use super::turn_sequencer::TurnSequencer;
use super::types::{GameStatus, Mark, MoveResult, Outcome, Position};
use super::win_detector::{find_line_winner, is_full};

/// Owns the grid and the turn order of one game and is the only place
/// either is mutated.
#[derive(Debug, Clone)]
pub struct GameController {
    grid: Grid,
    turns: TurnSequencer,
    status: GameStatus,
}

impl GameController {
    pub fn new(settings: &TicTacToeSettings) -> Self {
        Self::with_turns(TurnSequencer::new(
            settings.player_count,
            settings.first_player_offset,
        ))
    }

    pub fn with_turns(turns: TurnSequencer) -> Self {
        Self {
            grid: Grid::new(),
            turns,
            status: GameStatus::InProgress,
        }
    }

    pub fn apply_move(&mut self, row: usize, col: usize) -> MoveResult {
        if self.status == GameStatus::Finished {
            return MoveResult::RejectedGameOver;
        }

        let cell = match self.grid.get(row, col) {
            Ok(cell) => cell,
            Err(err) => {
                log_warn!("Rejected move: {}", err);
                return MoveResult::RejectedInvalidCoords;
            }
        };

        if !cell.is_empty() {
            return MoveResult::RejectedIllegal;
        }

        let player = self.turns.current_player();
        self.grid.put(Position::new(row, col), Mark::for_player(player));
        self.turns.advance();
        self.update_status();

        log_debug!("Player {} placed at ({}, {})", player, row, col);
        MoveResult::Accepted
    }

    pub fn bot_move<A: Agent + ?Sized>(&mut self, agent: &mut A) -> MoveResult {
        if self.status == GameStatus::Finished {
            return MoveResult::NotApplicable;
        }

        let input = BotInput::from_controller(self);
        let proposal = agent.select_move(&input);
        self.apply_proposal(&input, proposal)
    }

    /// Applies a bot's proposal computed from `input`, which may be older
    /// than the live board. A proposal for another turn or another grid is
    /// stale, and an occupied target is an agent contract violation.
    pub fn apply_proposal(&mut self, input: &BotInput, proposal: Option<Position>) -> MoveResult {
        if self.status == GameStatus::Finished {
            return MoveResult::NotApplicable;
        }

        if input.current_player != self.current_player() || input.grid != self.grid {
            log_warn!(
                "Discarding stale bot move searched for player {}, player {} is to move\n{}",
                input.current_player,
                self.current_player(),
                self.grid
            );
            return MoveResult::RejectedIllegal;
        }

        let Some(pos) = proposal else {
            log_warn!("Bot returned no move on an unfinished board\n{}", self.grid);
            return MoveResult::NotApplicable;
        };

        if let Ok(cell) = self.grid.get(pos.row, pos.col)
            && !cell.is_empty()
        {
            log_warn!(
                "Bot proposed occupied cell ({}, {})\n{}",
                pos.row,
                pos.col,
                self.grid
            );
            return MoveResult::RejectedIllegal;
        }

        self.apply_move(pos.row, pos.col)
    }

    pub fn restart(&mut self) {
        self.grid.clear();
        self.turns.start_new_round();
        self.status = GameStatus::InProgress;
    }

    fn update_status(&mut self) {
        if find_line_winner(&self.grid).is_win() || is_full(&self.grid) {
            self.status = GameStatus::Finished;
        }
    }

    pub fn current_outcome(&self) -> Outcome {
        find_line_winner(&self.grid)
    }

    pub fn is_tie(&self) -> bool {
        self.is_finished() && !self.current_outcome().is_win()
    }

    pub fn snapshot_grid(&self) -> Grid {
        self.grid
    }

    pub fn current_player(&self) -> usize {
        self.turns.current_player()
    }

    pub fn player_count(&self) -> usize {
        self.turns.player_count()
    }

    pub fn turns(&self) -> &TurnSequencer {
        &self.turns
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;
    use crate::games::tictactoe::{Bot, BotType, LineKind, count_empty};

    fn two_player_game() -> GameController {
        GameController::new(&TicTacToeSettings::default())
    }

    struct FixedAgent(Option<Position>);

    impl Agent for FixedAgent {
        fn select_move(&mut self, _input: &BotInput) -> Option<Position> {
            self.0
        }
    }

    #[test]
    fn test_move_writes_one_based_mark_and_advances() {
        let mut game = two_player_game();
        assert_eq!(game.apply_move(1, 1), MoveResult::Accepted);
        assert_eq!(game.snapshot_grid().get(1, 1), Ok(Mark::from_value(1)));
        assert_eq!(game.current_player(), 1);
    }

    #[test]
    fn test_second_move_on_same_cell_is_illegal() {
        let mut game = two_player_game();
        assert_eq!(game.apply_move(0, 0), MoveResult::Accepted);
        assert_eq!(game.apply_move(0, 0), MoveResult::RejectedIllegal);
        assert_eq!(game.current_player(), 1);
    }

    #[test]
    fn test_out_of_range_is_invalid_coords() {
        let mut game = two_player_game();
        assert_eq!(game.apply_move(3, 0), MoveResult::RejectedInvalidCoords);
        assert_eq!(game.apply_move(0, 7), MoveResult::RejectedInvalidCoords);
        assert_eq!(game.snapshot_grid(), Grid::new());
        assert_eq!(game.current_player(), 0);
    }

    #[test]
    fn test_win_finishes_game() {
        let mut game = two_player_game();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            assert!(game.apply_move(row, col).is_accepted());
        }
        assert!(game.is_finished());
        match game.current_outcome() {
            Outcome::Win(line) => {
                assert_eq!(line.player_index(), Some(0));
                assert_eq!(line.kind, LineKind::Row);
                assert_eq!(line.index, 0);
            }
            Outcome::NoWinner => panic!("expected a win"),
        }
        assert_eq!(game.apply_move(2, 2), MoveResult::RejectedGameOver);
        assert_eq!(
            game.bot_move(&mut FixedAgent(Some(Position::new(2, 2)))),
            MoveResult::NotApplicable
        );
    }

    #[test]
    fn test_full_grid_without_line_is_tie() {
        let mut game = two_player_game();
        let moves = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ];
        for (row, col) in moves {
            assert!(game.apply_move(row, col).is_accepted());
        }
        assert!(game.is_finished());
        assert_eq!(game.current_outcome(), Outcome::NoWinner);
        assert!(game.is_tie());
    }

    #[test]
    fn test_restart_clears_and_rotates_first_player() {
        let mut game = GameController::new(&TicTacToeSettings {
            player_count: 3,
            first_player_offset: 0,
        });
        let mut starters = Vec::new();
        for _ in 0..3 {
            game.apply_move(0, 0);
            game.restart();
            assert_eq!(game.snapshot_grid(), Grid::new());
            assert!(!game.is_finished());
            starters.push(game.current_player());
        }
        starters.sort();
        assert_eq!(starters, vec![0, 1, 2]);
    }

    #[test]
    fn test_restart_after_finish_reenters_progress() {
        let mut game = two_player_game();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            game.apply_move(row, col);
        }
        game.restart();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.current_outcome(), Outcome::NoWinner);
        assert_eq!(game.current_player(), 1);
    }

    #[test]
    fn test_bot_occupied_proposal_is_rejected() {
        let mut game = two_player_game();
        game.apply_move(1, 1);
        let before = game.snapshot_grid();
        let result = game.bot_move(&mut FixedAgent(Some(Position::new(1, 1))));
        assert_eq!(result, MoveResult::RejectedIllegal);
        assert_eq!(game.snapshot_grid(), before);
        assert_eq!(game.current_player(), 1);
    }

    #[test]
    fn test_bot_without_proposal_is_not_applicable() {
        let mut game = two_player_game();
        assert_eq!(game.bot_move(&mut FixedAgent(None)), MoveResult::NotApplicable);
    }

    #[test]
    fn test_proposal_from_before_restart_is_discarded() {
        let mut game = GameController::new(&TicTacToeSettings {
            player_count: 2,
            first_player_offset: 1,
        });
        let input = BotInput::from_controller(&game);
        assert_eq!(input.current_player, 1);
        let proposal = Bot::new(BotType::Minimax, SessionRng::new(8)).select_move(&input);
        assert!(proposal.is_some());

        game.restart();
        assert_eq!(game.current_player(), 0);
        assert_eq!(game.apply_proposal(&input, proposal), MoveResult::RejectedIllegal);
        assert_eq!(game.snapshot_grid(), Grid::new());
        assert_eq!(game.current_player(), 0);
    }

    #[test]
    fn test_proposal_for_changed_grid_is_discarded() {
        let mut game = two_player_game();
        game.apply_move(0, 0);
        let input = BotInput::from_controller(&game);
        game.apply_move(1, 1);
        game.apply_move(2, 2);
        assert_eq!(game.current_player(), input.current_player);
        let before = game.snapshot_grid();
        let result = game.apply_proposal(&input, Some(Position::new(0, 1)));
        assert_eq!(result, MoveResult::RejectedIllegal);
        assert_eq!(game.snapshot_grid(), before);
    }

    #[test]
    fn test_no_player_moves_twice_in_a_row() {
        let mut rng = SessionRng::new(21);
        let mut bot = Bot::new(BotType::Random, rng.fork());
        for _ in 0..20 {
            let mut game = GameController::new(&TicTacToeSettings {
                player_count: 2 + rng.random_range(0..3usize),
                first_player_offset: 0,
            });
            let mut last_player = None;
            while !game.is_finished() {
                let mover = game.current_player();
                assert_ne!(Some(mover), last_player);
                assert!(game.bot_move(&mut bot).is_accepted());
                last_player = Some(mover);
            }
        }
    }

    #[test]
    fn test_minimax_never_loses_to_random() {
        for seed in 0..10 {
            let mut rng = SessionRng::new(seed);
            let mut minimax = Bot::new(BotType::Minimax, rng.fork());
            let mut random = Bot::new(BotType::Random, rng.fork());
            let mut game = GameController::new(&TicTacToeSettings {
                player_count: 2,
                first_player_offset: (seed % 2) as usize,
            });
            while !game.is_finished() {
                let result = if game.current_player() == 0 {
                    game.bot_move(&mut minimax)
                } else {
                    game.bot_move(&mut random)
                };
                assert!(result.is_accepted());
            }
            assert_ne!(game.current_outcome().winner(), Some(Mark::for_player(1)));
        }
    }

    #[test]
    fn test_minimax_self_play_is_a_tie() {
        let mut rng = SessionRng::new(4);
        let mut bot = Bot::new(BotType::Minimax, rng.fork());
        let mut game = two_player_game();
        while !game.is_finished() {
            assert!(game.bot_move(&mut bot).is_accepted());
        }
        assert!(game.is_tie());
        assert_eq!(count_empty(&game.snapshot_grid()), 0);
    }
}
