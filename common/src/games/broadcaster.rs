use std::future::Future;

use super::tictactoe::GameSnapshot;

/// Receives every state the session loop observes. Renderers implement
/// this; the loop never knows how snapshots are shown.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;
}
