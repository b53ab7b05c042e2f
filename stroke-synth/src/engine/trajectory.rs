//! Trajectory synthesis
//!
//! Walks a non-uniform time grid, evaluates every stroke in its own time
//! window and chains the strokes into one continuous path, then applies
//! optional noise, the plan's start offset and screen clipping.

use super::config::EngineConfig;
use super::event_log;
use super::kinematics::position_at;
use super::noise;
use super::time_grid::TimeGrid;
use super::velocity::speeds;
use crate::plan::{Point, StrokePlan};
use crate::solver::{Degeneracy, ParameterSource, SolverState};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sampled trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledPath {
    /// Strictly increasing timestamps (s)
    pub times: Vec<f64>,
    /// Clipped screen positions
    pub positions: Vec<Point>,
    /// Speed magnitude at each sample (units/s)
    pub velocities: Vec<f64>,
    /// Per-axis mean-square power of the composed strokes
    pub signal_power: Point,
    /// Per-axis noise power derived from the plan's SNR
    pub noise_power: Point,
    /// Whether noise was added to `positions`
    pub noise_applied: bool,
}

impl SampledPath {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Highest finite-difference speed along the path
    pub fn peak_velocity(&self) -> f64 {
        self.velocities.iter().copied().fold(0.0, f64::max)
    }

    /// Serialize into the compact pointer event log
    pub fn to_event_log(&self) -> String {
        event_log::serialize(&self.positions, &self.times)
    }
}

/// Generates sampled paths from a plan and its stroke parameters
#[derive(Debug, Clone, Default)]
pub struct TrajectoryEngine {
    config: EngineConfig,
}

impl TrajectoryEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Sampling grid over `[0, duration]` using the configured frequencies
    pub fn time_grid<'a, R: Rng>(&self, duration: f64, rng: &'a mut R) -> TimeGrid<'a, R> {
        TimeGrid::new(duration, self.config.min_frequency, self.config.max_frequency, rng)
    }

    /// Evaluate every stroke over its window and chain them.
    ///
    /// Window `i` covers `[i·T, (i+1)·T)` with `T` the nominal stroke
    /// duration; the last window also takes samples landing exactly on the
    /// plan's duration. Each stroke is offset by the final sample of the
    /// previous non-empty window. Positions are relative to the plan start.
    pub fn compose_strokes(
        &self,
        plan: &StrokePlan,
        params: &ParameterSource,
        times: &[f64],
    ) -> Result<Vec<Point>, crate::Error> {
        let stroke_count = plan.stroke_count();
        let window = plan.stroke_duration();
        let mut positions = Vec::with_capacity(times.len());
        let mut offset = Point::ORIGIN;
        let mut begin = 0;

        for stroke in 0..stroke_count {
            let stroke_params = params.for_stroke(stroke).ok_or_else(|| {
                crate::Error::Config(format!("no parameters for stroke {} of {}", stroke, stroke_count))
            })?;

            let t_start = stroke as f64 * window;
            let end = if stroke + 1 == stroke_count {
                times.len()
            } else {
                let t_end = (stroke + 1) as f64 * window;
                begin + times[begin..].partition_point(|&t| t < t_end)
            };

            if begin == end {
                debug!(stroke, t_start, "Stroke window holds no samples");
                continue;
            }

            for &t in &times[begin..end] {
                let position = position_at(t, t_start, stroke_params).ok_or_else(|| {
                    let reason = if stroke_params.heading_sweep() == 0.0 {
                        Degeneracy::ZeroSweep
                    } else {
                        Degeneracy::NonFinite("position")
                    };
                    crate::Error::NumericDegeneracy {
                        stroke,
                        reason,
                        state: Box::new(SolverState::with_parameters(plan, params.all())),
                    }
                })?;
                positions.push(position + offset);
            }

            if let Some(&last) = positions.last() {
                offset = last;
            }
            begin = end;
        }

        Ok(positions)
    }

    /// Produce the full sampled path for a plan
    pub fn generate<R: Rng>(
        &self,
        plan: &StrokePlan,
        params: &ParameterSource,
        rng: &mut R,
    ) -> Result<SampledPath, crate::Error> {
        let times: Vec<f64> = self.time_grid(plan.duration(), rng).collect();
        let mut positions = self.compose_strokes(plan, params, &times)?;

        let signal_power = noise::signal_power(&positions);
        let noise_power = noise::noise_power(signal_power, plan.settings().snr);
        let noise_applied = self.config.noise.enabled;
        if noise_applied {
            noise::add_noise(
                &mut positions,
                noise_power,
                plan.duration(),
                self.config.noise.scale,
                rng,
            );
        }

        let start = plan.start();
        let screen = plan.settings().screen;
        let positions: Vec<Point> = positions.into_iter().map(|p| screen.clip(p + start)).collect();
        let velocities = speeds(&positions, &times);

        debug!(
            samples = times.len(),
            strokes = plan.stroke_count(),
            signal_power_x = signal_power.x,
            signal_power_y = signal_power.y,
            noise_applied,
            "Generated trajectory"
        );

        Ok(SampledPath {
            times,
            positions,
            velocities,
            signal_power,
            noise_power,
            noise_applied,
        })
    }
}
