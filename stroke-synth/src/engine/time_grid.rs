//! Non-uniform sampling grid
//!
//! Each step draws a fresh sampling frequency, so inter-sample spacing is
//! irregular the way real pointer event streams are.

use rand::Rng;

/// Lazy sequence of strictly increasing timestamps in `(0, duration]`.
///
/// The grid consumes randomness as it goes and cannot be restarted; once
/// the next step would pass `duration` it is exhausted for good.
pub struct TimeGrid<'a, R> {
    rng: &'a mut R,
    duration: f64,
    min_frequency: f64,
    max_frequency: f64,
    t: f64,
    done: bool,
}

impl<'a, R: Rng> TimeGrid<'a, R> {
    /// Frequencies must satisfy `0 < min_frequency <= max_frequency`
    pub fn new(duration: f64, min_frequency: f64, max_frequency: f64, rng: &'a mut R) -> Self {
        Self {
            rng,
            duration,
            min_frequency,
            max_frequency,
            t: 0.0,
            done: false,
        }
    }
}

impl<R: Rng> Iterator for TimeGrid<'_, R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }
        let frequency = self.rng.gen_range(self.min_frequency..=self.max_frequency);
        let next = self.t + 1.0 / frequency;
        if next <= self.duration {
            self.t = next;
            Some(next)
        } else {
            self.done = true;
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = (self.duration - self.t).max(0.0);
        let upper = (remaining * self.max_frequency).floor() as usize + 1;
        (0, Some(upper))
    }
}
