//! Terminal-result detection.
//!
//! Outcome labels are fixed to the Attacker's perspective: "win" in a tally
//! always means a win for player 1.

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::core::Team;

/// Status of a board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// No piece has reached its goal row.
    #[default]
    InProgress,
    /// An Attacker piece is on row 1.
    AttackerReachedGoal,
    /// A Defender piece is on row N.
    DefenderReachedGoal,
}

impl GameResult {
    /// Check if the game has ended.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }

    /// Winning team, if the game has ended.
    #[must_use]
    pub fn winner(self) -> Option<Team> {
        match self {
            GameResult::InProgress => None,
            GameResult::AttackerReachedGoal => Some(Team::Attacker),
            GameResult::DefenderReachedGoal => Some(Team::Defender),
        }
    }
}

/// Evaluate a board.
///
/// Both goal conditions are checked on every call. If both hold at once,
/// which normal play cannot produce, the Attacker wins.
#[must_use]
pub fn evaluate(board: &BoardState) -> GameResult {
    let size = board.size();
    let reached = |team: Team| {
        board
            .team_pieces(team)
            .any(|p| p.position.row == team.goal_row(size))
    };

    if reached(Team::Attacker) {
        GameResult::AttackerReachedGoal
    } else if reached(Team::Defender) {
        GameResult::DefenderReachedGoal
    } else {
        GameResult::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Square;

    #[test]
    fn test_initial_in_progress() {
        for n in 2..=8 {
            let board = BoardState::initialize(n).unwrap();
            assert_eq!(evaluate(&board), GameResult::InProgress);
        }
    }

    #[test]
    fn test_attacker_goal() {
        let board = BoardState::from_pieces(4, [(Team::Attacker, Square::new(1, 3))]).unwrap();
        assert_eq!(evaluate(&board), GameResult::AttackerReachedGoal);
    }

    #[test]
    fn test_defender_goal() {
        let board = BoardState::from_pieces(
            4,
            [
                (Team::Defender, Square::new(4, 1)),
                (Team::Attacker, Square::new(3, 3)),
            ],
        )
        .unwrap();
        assert_eq!(evaluate(&board), GameResult::DefenderReachedGoal);
    }

    #[test]
    fn test_attacker_precedence() {
        let board = BoardState::from_pieces(
            3,
            [
                (Team::Defender, Square::new(3, 1)),
                (Team::Attacker, Square::new(1, 3)),
            ],
        )
        .unwrap();
        assert_eq!(evaluate(&board), GameResult::AttackerReachedGoal);
    }

    #[test]
    fn test_winner() {
        assert_eq!(GameResult::InProgress.winner(), None);
        assert_eq!(GameResult::AttackerReachedGoal.winner(), Some(Team::Attacker));
        assert_eq!(GameResult::DefenderReachedGoal.winner(), Some(Team::Defender));
        assert!(!GameResult::InProgress.is_terminal());
        assert!(GameResult::DefenderReachedGoal.is_terminal());
    }
}
