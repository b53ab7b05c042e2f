//! Stroke parameter derivation
//!
//! Two modes:
//! - unconstrained: every parameter is drawn from its configured range, then
//!   the log-time mean is redrawn (a bounded number of times) until the
//!   profile's peak velocity falls inside the acceptance envelope;
//! - constrained: amplitude and heading-end are solved in closed form so
//!   that each stroke lands exactly on its relative endpoint by the end of
//!   its window. The heading-end of one stroke is the heading-start of the
//!   next.
//!
//! The constrained solve inverts the endpoint of the closed-form position
//! (see `engine::kinematics`). With `T` the stroke window minus the end
//! margin:
//!
//! ```text
//! e  = erf(√2 (μ - ln T) / (2σ))
//! a  = atan2(Δx tan(θs/2) - Δy, Δx + Δy tan(θs/2))
//! θe = (θs e + θs + 4a) / (e - 1)
//! D  = Δx (-4a - 2θs) / ((e - 1)(sin θs + sin 2a))
//!    = Δy (4a + 2θs)  / ((e - 1)(cos θs - cos 2a))
//! ```

use super::config::{ExhaustionPolicy, SolverConfig};
use super::diagnostics::SolverState;
use super::lognormal::peak_velocity;
use super::parameters::{LogTimeShape, ParameterSource, StrokeParameters, VelocityCorrection};
use crate::engine::kinematics::position_at;
use crate::plan::{Point, StrokePlan};
use rand::Rng;
use std::f64::consts::SQRT_2;
use tracing::{debug, warn};

/// Denominators smaller than this are treated as vanished
const DENOMINATOR_TOLERANCE: f64 = 1e-12;

/// Displacements shorter than this are treated as zero
const MIN_DISPLACEMENT: f64 = 1e-9;

/// Largest accepted distance (px) between a solved endpoint and its target
const ENDPOINT_TOLERANCE: f64 = 1e-6;

/// Why a closed-form stroke solve has no meaningful answer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Degeneracy {
    #[error("relative target coincides with the stroke origin")]
    ZeroDisplacement,

    #[error("stroke solve time {0}s has no finite logarithm")]
    NonFiniteLogTime(f64),

    #[error("error-function term saturated (erf = {0})")]
    SaturatedErf(f64),

    #[error("heading end coincides with heading start")]
    ZeroSweep,

    #[error("amplitude denominator vanished")]
    VanishingDenominator,

    #[error("solved {0} is not finite")]
    NonFinite(&'static str),

    #[error("solved stroke misses its endpoint by {0} px")]
    IllConditioned(f64),
}

/// Solve amplitude and heading-end for one stroke.
///
/// `displacement` is the stroke's endpoint relative to its origin and
/// `solve_time` the stroke-local time at which it must be reached.
pub fn solve_stroke(
    heading_start: f64,
    shape: LogTimeShape,
    displacement: Point,
    solve_time: f64,
) -> Result<StrokeParameters, Degeneracy> {
    let Point { x: dx, y: dy } = displacement;
    if !displacement.is_finite() {
        return Err(Degeneracy::NonFinite("displacement"));
    }
    if displacement.magnitude() < MIN_DISPLACEMENT {
        return Err(Degeneracy::ZeroDisplacement);
    }

    let log_time = solve_time.ln();
    if !log_time.is_finite() {
        return Err(Degeneracy::NonFiniteLogTime(solve_time));
    }

    let e = libm::erf(SQRT_2 * (shape.mean - log_time) / (2.0 * shape.std_dev));
    let e_minus_one = e - 1.0;
    if !e.is_finite() || e_minus_one.abs() < DENOMINATOR_TOLERANCE {
        return Err(Degeneracy::SaturatedErf(e));
    }

    let theta_s = heading_start;
    let half_tan = (theta_s / 2.0).tan();
    let a = (dx * half_tan - dy).atan2(dx + dy * half_tan);

    let sweep_numerator = 4.0 * a + 2.0 * theta_s;
    let heading_end = (theta_s * e + theta_s + 4.0 * a) / e_minus_one;
    if !heading_end.is_finite() {
        return Err(Degeneracy::NonFinite("heading end"));
    }
    if (heading_end - theta_s).abs() < DENOMINATOR_TOLERANCE {
        return Err(Degeneracy::ZeroSweep);
    }

    // Both forms land on (Δx, Δy); use the better conditioned one
    let x_denominator = e_minus_one * (theta_s.sin() + (2.0 * a).sin());
    let y_denominator = e_minus_one * (theta_s.cos() - (2.0 * a).cos());
    let amplitude = if x_denominator.abs() >= y_denominator.abs() {
        if x_denominator.abs() < DENOMINATOR_TOLERANCE {
            return Err(Degeneracy::VanishingDenominator);
        }
        -dx * sweep_numerator / x_denominator
    } else {
        if y_denominator.abs() < DENOMINATOR_TOLERANCE {
            return Err(Degeneracy::VanishingDenominator);
        }
        dy * sweep_numerator / y_denominator
    };
    if !amplitude.is_finite() {
        return Err(Degeneracy::NonFinite("amplitude"));
    }

    let params = StrokeParameters {
        heading_start: theta_s,
        heading_end,
        log_time_mean: shape.mean,
        log_time_std_dev: shape.std_dev,
        amplitude,
    };
    check_endpoint(&params, displacement, solve_time)?;
    Ok(params)
}

/// Evaluate the solved stroke at `solve_time` and reject it unless it lands
/// on `displacement`.
///
/// Near erf saturation the heading sweep grows so large that the trig terms
/// lose all precision while every intermediate value stays finite.
pub fn check_endpoint(params: &StrokeParameters, displacement: Point, solve_time: f64) -> Result<(), Degeneracy> {
    let reached = position_at(solve_time, 0.0, params).ok_or(Degeneracy::NonFinite("endpoint"))?;
    let residual = (reached - displacement).magnitude();
    if residual.is_nan() || residual > ENDPOINT_TOLERANCE {
        return Err(Degeneracy::IllConditioned(residual));
    }
    Ok(())
}

/// Derives lognormal parameters for the strokes of a plan
#[derive(Debug, Clone, Default)]
pub struct StrokeParameterSolver {
    config: SolverConfig,
}

impl StrokeParameterSolver {
    pub fn new(config: SolverConfig) -> Self {
        if config.velocity_bounds_diverge() {
            debug!(
                acceptance_min = config.velocity_acceptance.min,
                acceptance_max = config.velocity_acceptance.max,
                nominal_min = config.nominal_velocity.min,
                nominal_max = config.nominal_velocity.max,
                "Velocity acceptance envelope differs from nominal operating range"
            );
        }
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Derive parameters for every stroke of `plan`.
    ///
    /// Plans with endpoints are solved in closed form from a random
    /// heading-start and log-time shape; plans without endpoints get one
    /// shared, velocity-corrected random parameter set.
    pub fn solve<R: Rng>(&self, plan: &StrokePlan, rng: &mut R) -> Result<ParameterSource, crate::Error> {
        if plan.is_constrained() {
            let heading_start = self.config.heading.sample(rng);
            let shape = self.sample_shape(rng);
            let strokes = self.solve_constrained(plan, heading_start, shape)?;
            Ok(ParameterSource::Constrained { strokes })
        } else {
            self.sample_unconstrained(plan, rng)
        }
    }

    /// Draw a log-time shape from the configured ranges
    pub fn sample_shape<R: Rng>(&self, rng: &mut R) -> LogTimeShape {
        let std_dev = self.config.log_time_std_dev.sample(rng);
        let mean = self.config.log_time_mean.sample(rng);
        LogTimeShape { mean, std_dev }
    }

    /// Solve every stroke of a plan with explicit endpoints.
    ///
    /// The plan is walked from its first stroke on a private copy; the
    /// caller's plan is left untouched.
    pub fn solve_constrained(
        &self,
        plan: &StrokePlan,
        heading_start: f64,
        shape: LogTimeShape,
    ) -> Result<Vec<StrokeParameters>, crate::Error> {
        if !plan.is_constrained() {
            return Err(crate::Error::Config(
                "constrained solve needs a plan with explicit endpoints".to_string(),
            ));
        }

        let solve_time = plan.stroke_duration() - self.config.end_margin;
        let mut state = SolverState::from_plan(plan);
        state.set_shape(shape);

        let mut cursor = plan.rewound();
        let mut strokes = Vec::with_capacity(plan.stroke_count());
        let mut heading_start = heading_start;

        loop {
            let index = cursor.current_stroke();
            let displacement = cursor
                .current_relative_target()
                .ok_or_else(|| crate::Error::Config("plan lost its endpoints".to_string()))?;

            let params = match solve_stroke(heading_start, shape, displacement, solve_time) {
                Ok(params) => params,
                Err(reason) => {
                    state.heading_starts.push(heading_start);
                    warn!(stroke = index, %reason, "Stroke solve is degenerate");
                    return Err(crate::Error::NumericDegeneracy {
                        stroke: index,
                        reason,
                        state: Box::new(state),
                    });
                }
            };

            debug!(
                stroke = index,
                dx = displacement.x,
                dy = displacement.y,
                heading_start = params.heading_start,
                heading_end = params.heading_end,
                amplitude = params.amplitude,
                "Solved stroke"
            );

            state.record(&params);
            heading_start = params.heading_end;
            strokes.push(params);

            if !cursor.advance_stroke() {
                break;
            }
        }

        Ok(strokes)
    }

    /// Sample one shared parameter set for a plan without endpoints
    pub fn sample_unconstrained<R: Rng>(
        &self,
        plan: &StrokePlan,
        rng: &mut R,
    ) -> Result<ParameterSource, crate::Error> {
        let heading_start = self.config.heading.sample(rng);
        let shape = self.sample_shape(rng);
        let heading_end = self.config.heading.sample(rng);
        let amplitude = self.config.amplitude.sample(rng);

        let mut parameters = StrokeParameters {
            heading_start,
            heading_end,
            log_time_mean: shape.mean,
            log_time_std_dev: shape.std_dev,
            amplitude,
        };
        let correction = self.correct_velocity(&mut parameters, rng);

        if !correction.satisfied {
            warn!(
                attempts = correction.attempts,
                peak_velocity = correction.peak_velocity,
                "Peak velocity outside acceptance envelope after all retries"
            );
            if self.config.on_exhaustion == ExhaustionPolicy::Fail {
                return Err(crate::Error::BoundsExhausted {
                    attempts: correction.attempts,
                    peak_velocity: correction.peak_velocity,
                    state: Box::new(SolverState::with_parameters(plan, &[parameters])),
                });
            }
        }

        Ok(ParameterSource::Unconstrained { parameters, correction })
    }

    /// Redraw the log-time mean until the peak velocity is acceptable or
    /// the retry budget runs out
    fn correct_velocity<R: Rng>(&self, params: &mut StrokeParameters, rng: &mut R) -> VelocityCorrection {
        let acceptance = self.config.velocity_acceptance;
        let mut peak = peak_velocity(params);
        let mut attempts = 0;

        while !acceptance.contains(peak) && attempts < self.config.max_velocity_retries {
            params.log_time_mean = self.config.log_time_mean.sample(rng);
            peak = peak_velocity(params);
            attempts += 1;
        }

        VelocityCorrection {
            attempts,
            peak_velocity: peak,
            satisfied: acceptance.contains(peak),
            within_nominal: self.config.nominal_velocity.contains(peak),
        }
    }
}
