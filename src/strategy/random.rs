//! Two-stage random strategy.
//!
//! Sampling is not uniform over the flattened move set. A piece is drawn
//! uniformly from the pieces that can move, then a destination uniformly
//! from that piece's moves. A piece with a single move is picked as often as
//! a piece with three, so its one move is three times as likely as any one
//! of the other piece's moves.

use crate::board::BoardState;
use crate::core::{GameRng, MoveChoice, Team};
use crate::error::{Error, Result};
use crate::rules::movable_pieces;

use super::Strategy;

/// Uniform piece, then uniform destination.
#[derive(Clone, Debug, Default)]
pub struct RandomStrategy;

impl RandomStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for RandomStrategy {
    fn select_move(
        &mut self,
        board: &BoardState,
        team: Team,
        rng: &mut GameRng,
    ) -> Result<MoveChoice> {
        let movable = movable_pieces(board, team);

        let (piece_id, destinations) = rng
            .choose(&movable)
            .ok_or(Error::NoLegalMove { team })?;
        let destination = rng
            .choose(destinations)
            .ok_or(Error::NoLegalMove { team })?;

        Ok(MoveChoice::new(*piece_id, *destination))
    }

    fn name(&self) -> &str {
        "Random"
    }
}
