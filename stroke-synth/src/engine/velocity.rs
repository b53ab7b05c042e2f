//! Finite-difference velocity on a non-uniform grid

use crate::plan::Point;

/// Derivative of `values` with respect to `times`.
///
/// Interior samples use the second-order central difference for uneven
/// spacing; the two ends use one-sided first-order differences. A single
/// sample has zero derivative.
pub fn gradient(values: &[f64], times: &[f64]) -> Vec<f64> {
    debug_assert_eq!(values.len(), times.len());
    let n = values.len().min(times.len());
    match n {
        0 => return Vec::new(),
        1 => return vec![0.0],
        _ => {}
    }

    let mut out = Vec::with_capacity(n);
    out.push((values[1] - values[0]) / (times[1] - times[0]));
    for i in 1..n - 1 {
        let hs = times[i] - times[i - 1];
        let hd = times[i + 1] - times[i];
        let derivative = (hs * hs * values[i + 1] + (hd * hd - hs * hs) * values[i] - hd * hd * values[i - 1])
            / (hs * hd * (hd + hs));
        out.push(derivative);
    }
    out.push((values[n - 1] - values[n - 2]) / (times[n - 1] - times[n - 2]));
    out
}

/// Speed magnitude at every sample of a path
pub fn speeds(positions: &[Point], times: &[f64]) -> Vec<f64> {
    let xs: Vec<f64> = positions.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = positions.iter().map(|p| p.y).collect();
    gradient(&xs, times)
        .into_iter()
        .zip(gradient(&ys, times))
        .map(|(vx, vy)| vx.hypot(vy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gradient_empty_and_single() {
        assert!(gradient(&[], &[]).is_empty());
        assert_eq!(gradient(&[3.0], &[0.1]), vec![0.0]);
    }

    #[test]
    fn test_gradient_of_linear_is_constant() {
        let times = [0.0, 0.01, 0.035, 0.04, 0.1];
        let values: Vec<f64> = times.iter().map(|t| 5.0 * t + 2.0).collect();
        for d in gradient(&values, &times) {
            assert_relative_eq!(d, 5.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_gradient_is_exact_for_quadratic_interior() {
        let times = [0.0, 0.1, 0.25, 0.3, 0.5];
        let values: Vec<f64> = times.iter().map(|t| t * t).collect();
        let d = gradient(&values, &times);
        for i in 1..times.len() - 1 {
            assert_relative_eq!(d[i], 2.0 * times[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_speeds_combine_axes() {
        let times = [0.0, 1.0, 2.0];
        let positions = [Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(6.0, 8.0)];
        for speed in speeds(&positions, &times) {
            assert_relative_eq!(speed, 5.0, epsilon = 1e-12);
        }
    }
}
