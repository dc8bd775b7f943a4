//! # breakthrough
//!
//! A Breakthrough board game engine for running randomized self-play
//! sessions.
//!
//! Two teams of pieces start on opposite back rows of an N×N board. Pieces
//! step one row forward, straight onto an empty square or diagonally onto an
//! empty or opponent-held square (capturing it). The first team to reach the
//! opposite back row wins; a team with no legal move on its turn loses.
//!
//! ## Design Principles
//!
//! 1. **Explicit randomness**: every random draw comes from a `GameRng`
//!    passed in by the caller, so episodes and sessions replay from a seed.
//!
//! 2. **Stable identity**: pieces are keyed by `PieceId` in a persistent
//!    ordered map. Capture removes the id; nothing is added after setup.
//!
//! 3. **Pluggable strategies**: move selection sits behind the `Strategy`
//!    trait. `RandomStrategy` is the built-in implementation.
//!
//! ## Modules
//!
//! - `core`: Squares, teams, piece IDs, moves, RNG, configuration
//! - `board`: Board state, move application with capture, snapshots
//! - `rules`: Legal move generation and terminal detection
//! - `strategy`: Strategy trait and the random strategy
//! - `episode`: Episode controller and session runner

pub mod core;
pub mod error;
pub mod board;
pub mod rules;
pub mod strategy;
pub mod episode;

// Re-export commonly used types
pub use crate::core::{
    Square, Team, TeamMap,
    Piece, PieceId,
    MoveChoice, MoveRecord,
    GameRng, GameRngState,
    SessionConfig, StrategyKind,
};

pub use crate::error::{Error, Result};

pub use crate::board::{BoardState, Cell, MoveOutcome, Snapshot};

pub use crate::rules::{evaluate, is_legal, legal_destinations, movable_pieces, Destinations, GameResult};

pub use crate::strategy::{RandomStrategy, Strategy};

pub use crate::episode::{EpisodeController, EpisodeRecord, Record, SessionRunner, Tally, Termination};
