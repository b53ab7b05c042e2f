//! Lognormal velocity profile
//!
//! The speed of a stroke started at `t0` follows
//!
//! ```text
//! v(t) = D / ((t - t0) σ √(2π)) · exp(-(ln(t - t0) - μ)² / (2σ²))
//! ```
//!
//! which peaks at the mode `t0 + exp(μ - σ²)`.

use super::parameters::StrokeParameters;
use std::f64::consts::PI;

/// Floor applied to `t - t0` before taking its logarithm
pub const TIME_FLOOR: f64 = 1e-10;

/// Elapsed stroke time, floored so `ln` stays finite at onset
#[inline]
pub fn elapsed(t: f64, stroke_start: f64) -> f64 {
    (t - stroke_start).max(TIME_FLOOR)
}

/// Speed of the stroke at time `t`
pub fn velocity_profile(t: f64, stroke_start: f64, params: &StrokeParameters) -> f64 {
    let dt = elapsed(t, stroke_start);
    let sigma = params.log_time_std_dev;
    let log_offset = dt.ln() - params.log_time_mean;
    params.amplitude / (dt * sigma * (2.0 * PI).sqrt())
        * (-(log_offset * log_offset) / (2.0 * sigma * sigma)).exp()
}

/// Time after onset at which the profile peaks
pub fn mode_offset(log_time_mean: f64, log_time_std_dev: f64) -> f64 {
    (log_time_mean - log_time_std_dev * log_time_std_dev).exp()
}

/// Speed at the profile's mode
pub fn peak_velocity(params: &StrokeParameters) -> f64 {
    let t_peak = mode_offset(params.log_time_mean, params.log_time_std_dev);
    velocity_profile(t_peak, 0.0, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(mu: f64, sigma: f64, amplitude: f64) -> StrokeParameters {
        StrokeParameters {
            heading_start: 0.0,
            heading_end: 1.0,
            log_time_mean: mu,
            log_time_std_dev: sigma,
            amplitude,
        }
    }

    #[test]
    fn test_velocity_is_finite_at_onset() {
        let p = params(-1.0, 0.5, 500.0);
        let v = velocity_profile(0.3, 0.3, &p);
        assert!(v.is_finite());
        assert!(v >= 0.0);
    }

    #[test]
    fn test_peak_matches_closed_form() {
        let p = params(-1.2, 0.4, 800.0);
        let sigma: f64 = 0.4;
        let t_peak = (-1.2 - sigma * sigma).exp();
        let expected = 800.0 / (t_peak * sigma * (2.0 * PI).sqrt()) * (-(sigma * sigma) / 2.0).exp();
        assert_relative_eq!(peak_velocity(&p), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_peak_is_maximum() {
        let p = params(-1.0, 0.3, 600.0);
        let peak = peak_velocity(&p);
        let t_peak = mode_offset(-1.0, 0.3);
        for factor in [0.5, 0.9, 1.1, 2.0] {
            assert!(velocity_profile(t_peak * factor, 0.0, &p) < peak);
        }
    }

    #[test]
    fn test_profile_is_shift_invariant() {
        let p = params(-0.8, 0.6, 300.0);
        let a = velocity_profile(0.25, 0.0, &p);
        let b = velocity_profile(1.25, 1.0, &p);
        assert_relative_eq!(a, b, max_relative = 1e-9);
    }
}
