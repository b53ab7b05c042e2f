//! Trajectory engine
//!
//! Turns solved stroke parameters into a sampled, screen-bounded pointer
//! path on an irregular time grid.

pub mod config;
pub mod event_log;
pub mod kinematics;
pub mod noise;
pub mod time_grid;
pub mod trajectory;
pub mod velocity;

pub use config::{EngineConfig, NoiseConfig};
pub use time_grid::TimeGrid;
pub use trajectory::{SampledPath, TrajectoryEngine};
