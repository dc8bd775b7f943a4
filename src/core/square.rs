//! Board coordinates.
//!
//! Squares are 1-based: on a board of size `N`, rows and columns run from
//! `1` to `N` inclusive. Row `N` is the Attacker's home row and row `1` the
//! Defender's.

use serde::{Deserialize, Serialize};

/// A (row, col) coordinate on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    /// Create a square. No bounds check is made; see [`Square::is_on_board`].
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check whether the square lies within `[1, size] x [1, size]`.
    ///
    /// ```
    /// use breakthrough::core::Square;
    ///
    /// assert!(Square::new(1, 5).is_on_board(5));
    /// assert!(!Square::new(0, 3).is_on_board(5));
    /// assert!(!Square::new(3, 6).is_on_board(5));
    /// ```
    #[must_use]
    pub const fn is_on_board(self, size: usize) -> bool {
        self.row >= 1 && self.row <= size && self.col >= 1 && self.col <= size
    }

    /// Shift the square by a row and column delta.
    ///
    /// Returns `None` if the result would leave a board of size `size`.
    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize, size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Self { row, col }).filter(|sq| sq.is_on_board(size))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_board_corners() {
        for size in [2, 5, 8] {
            assert!(Square::new(1, 1).is_on_board(size));
            assert!(Square::new(size, size).is_on_board(size));
            assert!(!Square::new(size + 1, 1).is_on_board(size));
            assert!(!Square::new(1, 0).is_on_board(size));
        }
    }

    #[test]
    fn test_offset() {
        let sq = Square::new(2, 2);
        assert_eq!(sq.offset(-1, -1, 3), Some(Square::new(1, 1)));
        assert_eq!(sq.offset(1, 0, 3), Some(Square::new(3, 2)));
        assert_eq!(sq.offset(1, 1, 2), None);
        assert_eq!(Square::new(1, 3).offset(-1, 0, 3), None);
        assert_eq!(Square::new(3, 1).offset(0, -1, 3), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Square::new(4, 2).to_string(), "(4, 2)");
    }
}
