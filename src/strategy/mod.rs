//! Move-selection strategies.
//!
//! A strategy picks one move for a team from the moves the generator
//! allows. Strategies are trait objects so each side of a session can be
//! configured independently:
//! - `RandomStrategy`: uniform piece, then uniform destination
//!
//! Randomness always comes from the `GameRng` passed into `select_move`,
//! never from a strategy-owned or global source, so a session replays
//! exactly from its seed.

pub mod random;

pub use random::RandomStrategy;

use crate::board::BoardState;
use crate::core::{GameRng, MoveChoice, StrategyKind, Team};
use crate::error::Result;

/// Move-selection capability.
///
/// ## Implementation Notes
///
/// - `select_move` must only return moves `rules::is_legal` accepts; the
///   episode controller treats anything else as a fatal defect
/// - return `Error::NoLegalMove` when the team has no movable piece
/// - `episode_finished` is the hook for strategies that learn between
///   episodes; the default does nothing
pub trait Strategy: Send {
    /// Choose a move for `team`.
    fn select_move(
        &mut self,
        board: &BoardState,
        team: Team,
        rng: &mut GameRng,
    ) -> Result<MoveChoice>;

    /// Display name.
    fn name(&self) -> &str;

    /// Called once when an episode this strategy played in ends.
    fn episode_finished(&mut self, _team: Team, _won: bool) {}
}

impl StrategyKind {
    /// Build a fresh strategy of this kind.
    #[must_use]
    pub fn build(self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy::new()),
        }
    }
}
