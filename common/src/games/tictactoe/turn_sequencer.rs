use crate::games::SessionRng;

/// Round-robin turn order. The first mover rotates on every new round so
/// that `player_count` consecutive rounds give each player one start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnSequencer {
    player_count: usize,
    first_player: usize,
    current_player: usize,
}

impl TurnSequencer {
    /// `player_count` must be at least 2; settings validation guarantees it.
    pub fn new(player_count: usize, turn_offset: usize) -> Self {
        debug_assert!(player_count >= 2);
        let first_player = turn_offset % player_count;
        Self {
            player_count,
            first_player,
            current_player: first_player,
        }
    }

    pub fn advance(&mut self) {
        self.current_player = (self.current_player + 1) % self.player_count;
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn first_player(&self) -> usize {
        self.first_player
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn start_new_round(&mut self) {
        self.first_player = (self.first_player + 1) % self.player_count;
        self.current_player = self.first_player;
    }

    /// Hands the turn to a random player without touching the rotation.
    pub fn randomize(&mut self, rng: &mut SessionRng) -> usize {
        self.current_player = rng.random_range(0..self.player_count);
        self.current_player
    }

    /// Starts a round with a random first mover, which also becomes the
    /// base for later rotations.
    pub fn random_restart(&mut self, rng: &mut SessionRng) -> usize {
        self.first_player = rng.random_range(0..self.player_count);
        self.current_player = self.first_player;
        self.current_player
    }
}
