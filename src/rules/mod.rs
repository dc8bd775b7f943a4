//! Breakthrough rules: move legality and terminal detection.
//!
//! Both are pure functions of a `BoardState`. Neither mutates the board;
//! the episode controller is the only caller that applies moves.

pub mod movegen;
pub mod result;

pub use movegen::{is_legal, legal_destinations, movable_pieces, Destinations};
pub use result::{evaluate, GameResult};
