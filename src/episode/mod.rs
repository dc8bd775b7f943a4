//! Episode and session orchestration.
//!
//! - `EpisodeController`: one game, ply by ply, until a terminal state
//! - `SessionRunner`: many games, with a running `Tally`

pub mod controller;
pub mod session;

pub use controller::{EpisodeController, EpisodeRecord, Termination};
pub use session::{Record, SessionRunner, Tally};
