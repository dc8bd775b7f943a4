//! Legal move generation.
//!
//! Every piece has at most three candidate destinations, all one row
//! forward for its team:
//!
//! | Direction       | Empty | Opponent | Own team |
//! |-----------------|-------|----------|----------|
//! | Forward-left    | legal | capture  | illegal  |
//! | Straight        | legal | illegal  | illegal  |
//! | Forward-right   | legal | capture  | illegal  |
//!
//! Destinations are always listed left diagonal, straight, right diagonal,
//! so sampling over them is reproducible.

use smallvec::SmallVec;

use crate::board::BoardState;
use crate::core::{MoveChoice, Piece, PieceId, Square, Team};

/// Legal destinations for one piece (never more than three).
pub type Destinations = SmallVec<[Square; 3]>;

/// All legal destinations for `piece` on `board`.
#[must_use]
pub fn legal_destinations(piece: &Piece, board: &BoardState) -> Destinations {
    let mut out = Destinations::new();
    let forward = piece.team.forward();

    for (d_col, diagonal) in [(-1, true), (0, false), (1, true)] {
        let Some(square) = piece.position.offset(forward, d_col, board.size()) else {
            continue;
        };
        let legal = match board.find(square) {
            None => true,
            Some(occupant) => diagonal && occupant.is_opponent_of(piece),
        };
        if legal {
            out.push(square);
        }
    }

    out
}

/// Pieces of `team` with at least one legal destination, in id order.
#[must_use]
pub fn movable_pieces(board: &BoardState, team: Team) -> Vec<(PieceId, Destinations)> {
    board
        .team_pieces(team)
        .filter_map(|piece| {
            let dests = legal_destinations(piece, board);
            (!dests.is_empty()).then_some((piece.id, dests))
        })
        .collect()
}

/// Check whether `team` may legally play `choice` on `board`.
#[must_use]
pub fn is_legal(board: &BoardState, team: Team, choice: &MoveChoice) -> bool {
    match board.piece(choice.piece_id) {
        Some(piece) if piece.team == team => {
            legal_destinations(piece, board).contains(&choice.destination)
        }
        _ => false,
    }
}
