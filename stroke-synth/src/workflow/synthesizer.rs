//! Movement Synthesizer
//!
//! Runs the full pipeline for one plan: derive stroke parameters, then
//! sample the trajectory.

use crate::engine::{EngineConfig, SampledPath, TrajectoryEngine};
use crate::plan::StrokePlan;
use crate::solver::{ParameterSource, SolverConfig, StrokeParameterSolver};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Result of synthesizing one movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Synthesis {
    /// Stroke parameters that produced the path
    pub parameters: ParameterSource,
    /// Sampled, clipped trajectory
    pub path: SampledPath,
}

impl Synthesis {
    /// Compact event log for the sampled path
    pub fn sensor_data(&self) -> String {
        self.path.to_event_log()
    }
}

/// Solver and engine wired together
#[derive(Debug, Clone, Default)]
pub struct Synthesizer {
    solver: StrokeParameterSolver,
    engine: TrajectoryEngine,
}

impl Synthesizer {
    pub fn new(solver_config: SolverConfig, engine_config: EngineConfig) -> Self {
        Self::from_parts(
            StrokeParameterSolver::new(solver_config),
            TrajectoryEngine::new(engine_config),
        )
    }

    pub fn from_parts(solver: StrokeParameterSolver, engine: TrajectoryEngine) -> Self {
        Self { solver, engine }
    }

    pub fn solver(&self) -> &StrokeParameterSolver {
        &self.solver
    }

    pub fn engine(&self) -> &TrajectoryEngine {
        &self.engine
    }

    /// Synthesize one movement.
    ///
    /// The caller's plan is left untouched; the solver works on its own
    /// rewound copy.
    pub fn synthesize<R: Rng>(&self, plan: &StrokePlan, rng: &mut R) -> crate::Result<Synthesis> {
        debug!(
            duration = plan.duration(),
            strokes = plan.stroke_count(),
            constrained = plan.is_constrained(),
            "Synthesizing movement"
        );

        let parameters = self.solver.solve(plan, rng)?;
        let path = self.engine.generate(plan, &parameters, rng)?;

        info!(
            samples = path.len(),
            peak_velocity = path.peak_velocity(),
            "Synthesized movement"
        );

        Ok(Synthesis { parameters, path })
    }
}
