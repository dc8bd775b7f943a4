//! Board state and its physical snapshot.
//!
//! `BoardState` owns the pieces and is the only place they are mutated.
//! `Snapshot` is the identity-free view used for comparison, fingerprints
//! and debug output.

pub mod state;
pub mod snapshot;

pub use state::{BoardState, MoveOutcome};
pub use snapshot::{Cell, Snapshot};
