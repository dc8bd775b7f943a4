//! Piece identification.
//!
//! Every piece on a board has a `PieceId` allocated when the board is built.
//! Ids are stable for the life of the board: a piece keeps its id as it
//! moves, and a captured piece's id is retired rather than reused.
//!
//! ## ID Layout
//!
//! `BoardState::initialize` allocates ids in placement order: Attacker
//! pieces get `0..N` by column, Defender pieces get `N..2N`.

use serde::{Deserialize, Serialize};

use super::square::Square;
use super::team::Team;

/// Stable identifier for a piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl PieceId {
    /// Create a piece ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// A live piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub team: Team,
    pub position: Square,
}

impl Piece {
    #[must_use]
    pub const fn new(id: PieceId, team: Team, position: Square) -> Self {
        Self { id, team, position }
    }

    /// True if `other` belongs to the opposing team.
    #[must_use]
    pub fn is_opponent_of(&self, other: &Piece) -> bool {
        self.team != other.team
    }
}
