//! Closed-form stroke kinematics
//!
//! The heading sweeps sigmoidally from θs to θe along the lognormal time
//! course; integrating speed times heading gives the stroke position in
//! closed form.

use crate::plan::Point;
use crate::solver::lognormal::elapsed;
use crate::solver::StrokeParameters;
use std::f64::consts::SQRT_2;

/// Heading at time `t` for a stroke started at `stroke_start`
pub fn angle_at(t: f64, stroke_start: f64, params: &StrokeParameters) -> f64 {
    let z = (elapsed(t, stroke_start).ln() - params.log_time_mean) / (params.log_time_std_dev * SQRT_2);
    params.heading_start + params.heading_sweep() / 2.0 * (1.0 + libm::erf(z))
}

/// Displacement from the stroke origin at time `t`.
///
/// Returns `None` when the heading sweep is zero, where the closed form
/// divides by zero.
pub fn position_at(t: f64, stroke_start: f64, params: &StrokeParameters) -> Option<Point> {
    let sweep = params.heading_sweep();
    if sweep == 0.0 {
        return None;
    }
    let phi = angle_at(t, stroke_start, params);
    let theta_s = params.heading_start;
    let position = Point::new(
        params.amplitude * (phi.sin() - theta_s.sin()) / sweep,
        params.amplitude * (theta_s.cos() - phi.cos()) / sweep,
    );
    position.is_finite().then_some(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> StrokeParameters {
        StrokeParameters {
            heading_start: 0.2,
            heading_end: 1.4,
            log_time_mean: -1.2,
            log_time_std_dev: 0.35,
            amplitude: 400.0,
        }
    }

    #[test]
    fn test_angle_starts_at_heading_start() {
        let p = params();
        assert_relative_eq!(angle_at(0.5, 0.5, &p), p.heading_start, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_approaches_heading_end() {
        let p = params();
        assert_relative_eq!(angle_at(50.0, 0.0, &p), p.heading_end, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_at_median_is_midpoint() {
        let p = params();
        let median = p.log_time_mean.exp();
        assert_relative_eq!(
            angle_at(1.0 + median, 1.0, &p),
            (p.heading_start + p.heading_end) / 2.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_angle_before_onset_is_floored() {
        let p = params();
        let a = angle_at(0.1, 0.5, &p);
        assert!(a.is_finite());
        assert_relative_eq!(a, p.heading_start, epsilon = 1e-9);
    }

    #[test]
    fn test_position_starts_at_origin() {
        let p = params();
        let origin = position_at(0.0, 0.0, &p).unwrap();
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_position_converges_to_chord() {
        // Long after the stroke, the displacement is D·(sin θe − sin θs)/(θe − θs)
        let p = params();
        let end = position_at(100.0, 0.0, &p).unwrap();
        let sweep = p.heading_end - p.heading_start;
        assert_relative_eq!(
            end.x,
            p.amplitude * (p.heading_end.sin() - p.heading_start.sin()) / sweep,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            end.y,
            p.amplitude * (p.heading_start.cos() - p.heading_end.cos()) / sweep,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_zero_sweep_has_no_position() {
        let p = StrokeParameters {
            heading_end: 0.2,
            ..params()
        };
        assert!(position_at(0.3, 0.0, &p).is_none());
    }
}
