//! Board state: the grid dimension and the live pieces.
//!
//! Pieces are stored in a persistent ordered map keyed by `PieceId`:
//! - O(1) clone, so strategies can copy a board cheaply
//! - iteration in id order, so anything sampling over pieces is
//!   reproducible from a seed
//!
//! The only mutation is [`BoardState::apply_move`]. Pieces are never added
//! after construction, and a capture removes the captured id from the map.

use im::OrdMap;
use rustc_hash::FxHashSet;
use serde::Serialize;

use super::snapshot::{Cell, Snapshot};
use crate::core::config::validate_board_size;
use crate::core::{Piece, PieceId, Square, Team};
use crate::error::{Error, Result};

/// Result of a successful `apply_move`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Square the mover left.
    pub from: Square,

    /// Opponent piece removed from the board, if any.
    pub captured: Option<Piece>,
}

/// An N×N Breakthrough board.
///
/// Serializes for output only. Boards are built through
/// [`BoardState::initialize`] or [`BoardState::from_pieces`], which check
/// bounds and uniqueness.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardState {
    size: usize,
    pieces: OrdMap<PieceId, Piece>,
}

impl BoardState {
    /// Create the starting position for a board of size `n`.
    ///
    /// Each team gets one piece per column on its home row: Attacker on row
    /// `n`, Defender on row 1.
    ///
    /// ```
    /// use breakthrough::board::BoardState;
    /// use breakthrough::core::{Square, Team};
    ///
    /// let board = BoardState::initialize(3).unwrap();
    /// assert_eq!(board.piece_count(), 6);
    /// assert_eq!(board.find(Square::new(3, 2)).unwrap().team, Team::Attacker);
    /// assert!(board.find(Square::new(2, 2)).is_none());
    /// ```
    pub fn initialize(n: usize) -> Result<Self> {
        validate_board_size(n)?;

        let placements = Team::ALL.into_iter().flat_map(|team| {
            let row = team.home_row(n);
            (1..=n).map(move |col| (team, Square::new(row, col)))
        });

        Self::from_pieces(n, placements)
    }

    /// Create a board with arbitrary placements.
    ///
    /// Ids are allocated in iteration order starting from 0. Fails if the
    /// size is out of range, a square is off the board, or two placements
    /// share a square.
    pub fn from_pieces(
        n: usize,
        placements: impl IntoIterator<Item = (Team, Square)>,
    ) -> Result<Self> {
        validate_board_size(n)?;

        let mut pieces = OrdMap::new();
        let mut seen = FxHashSet::default();

        for (raw, (team, square)) in (0u32..).zip(placements) {
            if !square.is_on_board(n) {
                return Err(Error::OutOfBounds { square, size: n });
            }
            if !seen.insert(square) {
                return Err(Error::DuplicatePosition(square));
            }
            let id = PieceId::new(raw);
            pieces.insert(id, Piece::new(id, team, square));
        }

        Ok(Self { size: n, pieces })
    }

    /// Board dimension.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Piece occupying a square, if any.
    ///
    /// Linear in the number of live pieces.
    #[must_use]
    pub fn find(&self, square: Square) -> Option<&Piece> {
        self.pieces.values().find(|p| p.position == square)
    }

    /// Piece with the given id, if it is still on the board.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    /// All live pieces in id order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    /// Live pieces of one team in id order.
    pub fn team_pieces(&self, team: Team) -> impl Iterator<Item = &Piece> {
        self.pieces.values().filter(move |p| p.team == team)
    }

    /// Total live pieces.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Live pieces of one team.
    #[must_use]
    pub fn team_count(&self, team: Team) -> usize {
        self.team_pieces(team).count()
    }

    /// Observer's view of the board, top row first.
    #[must_use]
    pub fn physical_snapshot(&self) -> Snapshot {
        let mut cells = vec![Cell::Empty; self.size * self.size];
        for piece in self.pieces.values() {
            cells[Snapshot::index_of(self.size, piece.position)] = Cell::Occupied(piece.team);
        }
        Snapshot::new(self.size, cells)
    }

    /// Move a piece, capturing any opponent on the destination.
    ///
    /// The captured piece is removed from the board before the mover's
    /// position is updated. Straight-move and direction rules are the move
    /// generator's job; this only rejects moves that would break the board's
    /// own invariants.
    pub fn apply_move(&mut self, piece_id: PieceId, destination: Square) -> Result<MoveOutcome> {
        let mover = *self
            .pieces
            .get(&piece_id)
            .ok_or(Error::UnknownPiece(piece_id))?;

        if !destination.is_on_board(self.size) {
            return Err(Error::OutOfBounds {
                square: destination,
                size: self.size,
            });
        }

        let captured = match self.find(destination).copied() {
            Some(occupant) if occupant.team == mover.team => {
                return Err(Error::OccupiedByOwnTeam {
                    square: destination,
                    team: mover.team,
                });
            }
            Some(occupant) => {
                self.pieces.remove(&occupant.id);
                Some(occupant)
            }
            None => None,
        };

        if let Some(piece) = self.pieces.get_mut(&piece_id) {
            piece.position = destination;
        }

        Ok(MoveOutcome {
            from: mover.position,
            captured,
        })
    }

    /// Verify the bounds and position-uniqueness invariants.
    pub fn check_invariants(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for piece in self.pieces.values() {
            if !piece.position.is_on_board(self.size) {
                return Err(Error::OutOfBounds {
                    square: piece.position,
                    size: self.size,
                });
            }
            if !seen.insert(piece.position) {
                return Err(Error::DuplicatePosition(piece.position));
            }
        }
        Ok(())
    }
}
