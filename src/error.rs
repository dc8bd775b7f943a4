//! Engine error types.
//!
//! Errors fall into three families:
//!
//! - **Configuration**: rejected at construction, never retried.
//! - **Internal consistency**: a move that the generator would never produce
//!   reached `apply_move`, an episode overran its ply bound, or a strategy
//!   claimed a stalemate while moves existed. These signal a defect in move
//!   generation or a strategy and are fatal.
//! - **No legal move**: the active team cannot move. The episode controller
//!   resolves this as a stalemate loss, so it never leaves an episode.

use thiserror::Error;

use crate::core::{MoveChoice, PieceId, Square, Team};

/// Errors produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board size {size}: must be between 2 and {max}")]
    InvalidBoardSize { size: usize, max: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("unknown piece {0}")]
    UnknownPiece(PieceId),

    #[error("{square} is already occupied by a {team} piece")]
    OccupiedByOwnTeam { square: Square, team: Team },

    #[error("{square} is off a board of size {size}")]
    OutOfBounds { square: Square, size: usize },

    #[error("two pieces placed on {0}")]
    DuplicatePosition(Square),

    #[error("{team} strategy chose an illegal move: {choice}")]
    IllegalChoice { team: Team, choice: MoveChoice },

    #[error("episode exceeded its ply bound of {limit}")]
    PlyLimitExceeded { limit: usize },

    #[error("{team} has no piece with a legal move")]
    NoLegalMove { team: Team },

    #[error("{team} strategy reported no legal move, but {movable} pieces can move")]
    FalseStalemate { team: Team, movable: usize },
}

impl Error {
    /// True for errors caused by invalid configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::InvalidBoardSize { .. } | Error::InvalidConfig { .. })
    }

    /// True for errors that indicate a broken engine invariant.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::UnknownPiece(_)
                | Error::OccupiedByOwnTeam { .. }
                | Error::OutOfBounds { .. }
                | Error::DuplicatePosition(_)
                | Error::IllegalChoice { .. }
                | Error::PlyLimitExceeded { .. }
                | Error::FalseStalemate { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
