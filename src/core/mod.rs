//! Core engine types: squares, teams, pieces, moves, RNG, configuration.
//!
//! Everything here is plain data. Rules live in `rules`, board mutation in
//! `board`.

pub mod square;
pub mod team;
pub mod piece;
pub mod action;
pub mod rng;
pub mod config;

pub use square::Square;
pub use team::{Team, TeamMap};
pub use piece::{Piece, PieceId};
pub use action::{MoveChoice, MoveRecord};
pub use rng::{GameRng, GameRngState};
pub use config::{SessionConfig, StrategyKind, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
