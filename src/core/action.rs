//! Move representation.
//!
//! A `MoveChoice` is what a strategy hands back to the episode controller:
//! the piece to move and where to put it. `MoveRecord` is the controller's
//! log of an applied move.

use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceId};
use super::square::Square;
use super::team::Team;

/// A selected move: which piece goes where.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveChoice {
    pub piece_id: PieceId,
    pub destination: Square,
}

impl MoveChoice {
    #[must_use]
    pub const fn new(piece_id: PieceId, destination: Square) -> Self {
        Self {
            piece_id,
            destination,
        }
    }
}

impl std::fmt::Display for MoveChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.piece_id, self.destination)
    }
}

/// An applied move with the context needed to replay or inspect it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Team that moved.
    pub team: Team,

    /// The move taken.
    pub choice: MoveChoice,

    /// Square the piece left.
    pub from: Square,

    /// Opponent piece removed by this move, if any.
    pub captured: Option<Piece>,

    /// Ply number (starts at 1).
    pub ply: usize,
}

impl MoveRecord {
    /// Check whether the move captured a piece.
    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_display() {
        let choice = MoveChoice::new(PieceId(2), Square::new(4, 1));
        assert_eq!(choice.to_string(), "Piece(2) -> (4, 1)");
    }

    #[test]
    fn test_choice_equality() {
        let a = MoveChoice::new(PieceId(1), Square::new(2, 2));
        let b = MoveChoice::new(PieceId(1), Square::new(2, 2));
        let c = MoveChoice::new(PieceId(1), Square::new(2, 3));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_record_capture_flag() {
        let choice = MoveChoice::new(PieceId(0), Square::new(2, 1));
        let mut record = MoveRecord {
            team: Team::Defender,
            choice,
            from: Square::new(1, 2),
            captured: None,
            ply: 1,
        };
        assert!(!record.is_capture());

        record.captured = Some(Piece::new(PieceId(5), Team::Attacker, Square::new(2, 1)));
        assert!(record.is_capture());
    }

    #[test]
    fn test_record_serialization() {
        let record = MoveRecord {
            team: Team::Attacker,
            choice: MoveChoice::new(PieceId(3), Square::new(4, 4)),
            from: Square::new(5, 4),
            captured: None,
            ply: 7,
        };
        let json = serde_json::to_string(&record).unwrap();
        let restored: MoveRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, restored);
    }
}
