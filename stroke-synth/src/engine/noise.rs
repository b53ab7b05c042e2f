//! Sensor-style noise sized from a signal-to-noise ratio

use crate::plan::Point;
use rand::Rng;
use rand_distr::StandardNormal;

/// Per-axis mean-square power of a path (zero for an empty path)
pub fn signal_power(positions: &[Point]) -> Point {
    if positions.is_empty() {
        return Point::ORIGIN;
    }
    let n = positions.len() as f64;
    let (sx, sy) = positions
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x * p.x, sy + p.y * p.y));
    Point::new(sx / n, sy / n)
}

/// Noise power implied by `snr`, per axis
pub fn noise_power(signal: Point, snr: f64) -> Point {
    Point::new(signal.x / snr, signal.y / snr)
}

/// Add zero-mean Gaussian noise with per-axis deviation
/// `sqrt(noise_power / duration) * scale`
pub fn add_noise<R: Rng>(positions: &mut [Point], noise: Point, duration: f64, scale: f64, rng: &mut R) {
    let sigma_x = (noise.x / duration).sqrt() * scale;
    let sigma_y = (noise.y / duration).sqrt() * scale;
    for p in positions.iter_mut() {
        let nx: f64 = rng.sample(StandardNormal);
        let ny: f64 = rng.sample(StandardNormal);
        p.x += nx * sigma_x;
        p.y += ny * sigma_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_signal_power_is_mean_square() {
        let power = signal_power(&[Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);
        assert_eq!(power, Point::new(5.0, 10.0));
        assert_eq!(signal_power(&[]), Point::ORIGIN);
    }

    #[test]
    fn test_noise_power_divides_by_snr() {
        let noise = noise_power(Point::new(10.0, 4.0), 2.0);
        assert_eq!(noise, Point::new(5.0, 2.0));
    }

    #[test]
    fn test_zero_scale_adds_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut positions = vec![Point::new(10.0, 10.0); 5];
        add_noise(&mut positions, Point::new(100.0, 100.0), 1.0, 0.0, &mut rng);
        assert!(positions.iter().all(|p| *p == Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_noise_is_zero_mean() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut positions = vec![Point::ORIGIN; 5000];
        add_noise(&mut positions, Point::new(1.0, 1.0), 1.0, 1.0, &mut rng);
        let mean = positions.iter().map(|p| p.x).sum::<f64>() / positions.len() as f64;
        assert!(mean.abs() < 0.1);
        assert!(positions.iter().any(|p| p.x != 0.0));
    }
}
