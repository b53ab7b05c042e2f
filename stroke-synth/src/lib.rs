//! # Stroke Synth
//!
//! Synthesizes human-like pointer trajectories from the sigma-lognormal
//! model of rapid hand movement.
//!
//! ## Overview
//!
//! A movement is planned as a duration, a starting point, a number of
//! strokes and optionally an endpoint per stroke. Every stroke gets a set of
//! lognormal parameters: solved in closed form so it lands exactly on its
//! endpoint, or sampled at random and corrected until its peak velocity is
//! plausible. The strokes are then evaluated on an irregular time grid,
//! chained into one continuous path and serialized as a compact pointer
//! event log.
//!
//! ## Quick Start
//!
//! ```no_run
//! use stroke_synth::{Point, StrokePlan, Synthesizer, Targets};
//! use rand::SeedableRng;
//!
//! let plan = StrokePlan::new(
//!     Some(1.5),
//!     Point::new(100.0, 100.0),
//!     2,
//!     Targets::PerStroke(vec![Point::new(300.0, 200.0), Point::new(500.0, 180.0)]),
//! )?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let synthesis = Synthesizer::default().synthesize(&plan, &mut rng)?;
//! println!("{}", synthesis.sensor_data());
//! # Ok::<(), stroke_synth::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`plan`]: movement plans, endpoints and screen settings
//! - [`solver`]: lognormal parameter derivation per stroke
//! - [`engine`]: time grid, stroke composition, post-processing, event log
//! - [`workflow`]: the end-to-end synthesizer and batch file format
//! - [`service`]: request/response contract for remote callers
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ StrokePlan  │───▶│   Stroke    │───▶│ Trajectory  │───▶│  Event log  │
//! │             │    │   solver    │    │   engine    │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//! ```

pub mod plan;
pub mod solver;
pub mod engine;
pub mod workflow;
pub mod service;
pub mod app;

// Re-export commonly used types
pub use engine::{EngineConfig, SampledPath, TrajectoryEngine};
pub use plan::{PlanSettings, Point, ScreenBounds, StrokePlan, TargetAxis, Targets};
pub use solver::{ParameterSource, SolverConfig, SolverState, StrokeParameterSolver, StrokeParameters};
pub use workflow::{Synthesis, Synthesizer};

/// Result type alias for stroke synthesis
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for stroke synthesis
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Numeric degeneracy in stroke {stroke}: {reason}")]
    NumericDegeneracy {
        stroke: usize,
        #[source]
        reason: solver::Degeneracy,
        state: Box<SolverState>,
    },

    #[error("Peak velocity {peak_velocity:.1} still out of bounds after {attempts} retries")]
    BoundsExhausted {
        attempts: u32,
        peak_velocity: f64,
        state: Box<SolverState>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Solver state captured when the error was raised
    pub fn diagnostic_state(&self) -> Option<&SolverState> {
        match self {
            Error::NumericDegeneracy { state, .. } | Error::BoundsExhausted { state, .. } => Some(state.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_config_error_has_no_state() {
        let err = Error::Config("duration is required".to_string());
        assert!(err.diagnostic_state().is_none());
        assert_eq!(err.to_string(), "Configuration error: duration is required");
    }

    #[test]
    fn test_degeneracy_exposes_reason_and_state() {
        let plan = StrokePlan::new(
            Some(1.0),
            Point::ORIGIN,
            1,
            Targets::Single(Point::new(10.0, 0.0)),
        )
        .unwrap();
        let err = Error::NumericDegeneracy {
            stroke: 0,
            reason: solver::Degeneracy::ZeroDisplacement,
            state: Box::new(SolverState::from_plan(&plan)),
        };

        assert!(err.to_string().starts_with("Numeric degeneracy in stroke 0"));
        assert!(err.source().is_some());
        assert_eq!(err.diagnostic_state().map(|s| s.stroke_count), Some(1));
    }
}
