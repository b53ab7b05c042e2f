//! Stroke parameter derivation
//!
//! Infers the lognormal parameters (amplitude, heading angles, log-time
//! mean and deviation) that drive each stroke of a planned movement.

pub mod config;
pub mod diagnostics;
pub mod lognormal;
pub mod parameters;
pub mod stroke_solver;

pub use config::{ExhaustionPolicy, SolverConfig, UniformRange};
pub use diagnostics::SolverState;
pub use parameters::{LogTimeShape, ParameterSource, StrokeParameters, VelocityCorrection};
pub use stroke_solver::{check_endpoint, solve_stroke, Degeneracy, StrokeParameterSolver};
