//! Workflow Module
//!
//! Orchestrates movement synthesis from plan to sampled path, parallel
//! batches, and the on-disk format for batches of movements.

pub mod batch;
pub mod movement_set;
pub mod synthesizer;

pub use batch::{synthesize_batch, BatchSpec};
pub use movement_set::{Movement, MovementSet, MovementSetMetadata};
pub use synthesizer::{Synthesis, Synthesizer};
