//! Solver configuration

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Closed interval sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub min: f64,
    pub max: f64,
}

impl UniformRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn validate(&self, name: &str) -> Result<(), crate::Error> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(crate::Error::Config(format!(
                "{} must be a finite range with min <= max, got [{}, {}]",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// What to do when the velocity rejection loop runs out of retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Keep the last draw and record that the bound was missed
    AcceptLast,
    /// Fail the synthesis
    Fail,
}

/// Sampling ranges and limits for stroke parameter derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Heading-start / heading-end range (radians)
    pub heading: UniformRange,
    /// Log-time standard deviation range (σ)
    pub log_time_std_dev: UniformRange,
    /// Log-time mean range (μ)
    pub log_time_mean: UniformRange,
    /// Amplitude range for unconstrained strokes
    pub amplitude: UniformRange,
    /// Peak-velocity envelope enforced by the rejection loop (units/s)
    pub velocity_acceptance: UniformRange,
    /// Nominal operating peak-velocity range (units/s), reported only
    pub nominal_velocity: UniformRange,
    /// Maximum number of log-time-mean redraws
    pub max_velocity_retries: u32,
    /// Behaviour once `max_velocity_retries` is exhausted
    pub on_exhaustion: ExhaustionPolicy,
    /// Margin (s) subtracted from the stroke window when solving endpoints
    pub end_margin: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            heading: UniformRange::new(-PI, PI),
            log_time_std_dev: UniformRange::new(0.1, 3.0),
            log_time_mean: UniformRange::new(-3.0, 3.0),
            amplitude: UniformRange::new(100.0, 1200.0),
            velocity_acceptance: UniformRange::new(300.0, 1300.0),
            nominal_velocity: UniformRange::new(200.0, 1200.0),
            max_velocity_retries: 1000,
            on_exhaustion: ExhaustionPolicy::AcceptLast,
            end_margin: 0.01,
        }
    }
}

impl SolverConfig {
    /// Validate ranges and limits
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.heading.validate("solver.heading")?;
        self.log_time_std_dev.validate("solver.log_time_std_dev")?;
        self.log_time_mean.validate("solver.log_time_mean")?;
        self.amplitude.validate("solver.amplitude")?;
        self.velocity_acceptance.validate("solver.velocity_acceptance")?;
        self.nominal_velocity.validate("solver.nominal_velocity")?;

        if self.log_time_std_dev.min <= 0.0 {
            return Err(crate::Error::Config(format!(
                "solver.log_time_std_dev must be strictly positive, got min {}",
                self.log_time_std_dev.min
            )));
        }
        if !self.end_margin.is_finite() || self.end_margin < 0.0 {
            return Err(crate::Error::Config(format!(
                "solver.end_margin must be >= 0, got {}",
                self.end_margin
            )));
        }
        Ok(())
    }

    /// Acceptance envelope differs from the nominal operating range
    pub fn velocity_bounds_diverge(&self) -> bool {
        self.velocity_acceptance != self.nominal_velocity
    }
}
