//! Physical snapshot of a board.
//!
//! A snapshot is the board as an observer sees it: one marker per cell, with
//! piece identity erased. Cells are stored row-major from row `N` down to
//! row 1, columns ascending, which is also the order they print in.

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::core::{Square, Team};

/// Contents of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Occupied(Team),
}

impl Cell {
    /// Single-character marker (`.` for empty).
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Occupied(team) => team.marker(),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// Ordered cell markers for a whole board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Snapshot {
    size: usize,
    cells: Vec<Cell>,
}

impl Snapshot {
    pub(crate) fn new(size: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    /// Index into `cells` for a square, top row first.
    pub(crate) fn index_of(size: usize, square: Square) -> usize {
        (size - square.row) * size + (square.col - 1)
    }

    /// Board size the snapshot was taken from.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// All cells in traversal order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells (always `size * size`).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a snapshot with no cells, which a validated board never produces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at a square, or `None` if the square is off the board.
    #[must_use]
    pub fn cell(&self, square: Square) -> Option<Cell> {
        if square.is_on_board(self.size) {
            Some(self.cells[Self::index_of(self.size, square)])
        } else {
            None
        }
    }

    /// Count of cells holding the given team.
    #[must_use]
    pub fn count(&self, team: Team) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Occupied(team))
            .count()
    }

    /// Fast non-cryptographic fingerprint of the cell layout.
    ///
    /// Equal snapshots always share a fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.size.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Snapshot {
        Snapshot::new(
            2,
            vec![
                Cell::Occupied(Team::Attacker),
                Cell::Empty,
                Cell::Empty,
                Cell::Occupied(Team::Defender),
            ],
        )
    }

    #[test]
    fn test_index_order() {
        assert_eq!(Snapshot::index_of(3, Square::new(3, 1)), 0);
        assert_eq!(Snapshot::index_of(3, Square::new(3, 3)), 2);
        assert_eq!(Snapshot::index_of(3, Square::new(1, 1)), 6);
        assert_eq!(Snapshot::index_of(3, Square::new(1, 3)), 8);
    }

    #[test]
    fn test_cell_lookup() {
        let snap = two_by_two();
        assert_eq!(snap.cell(Square::new(2, 1)), Some(Cell::Occupied(Team::Attacker)));
        assert_eq!(snap.cell(Square::new(1, 2)), Some(Cell::Occupied(Team::Defender)));
        assert_eq!(snap.cell(Square::new(1, 1)), Some(Cell::Empty));
        assert_eq!(snap.cell(Square::new(3, 1)), None);
    }

    #[test]
    fn test_counts() {
        let snap = two_by_two();
        assert_eq!(snap.len(), 4);
        assert!(!snap.is_empty());
        assert_eq!(snap.count(Team::Attacker), 1);
        assert_eq!(snap.count(Team::Defender), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(two_by_two().to_string(), "X .\n. O\n");
    }

    #[test]
    fn test_fingerprint_tracks_layout() {
        let a = two_by_two();
        let b = two_by_two();
        let c = Snapshot::new(2, vec![Cell::Empty; 4]);

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
