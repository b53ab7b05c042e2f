//! Batch Synthesis
//!
//! Synthesizes many unconstrained movements from random origins in
//! parallel. Every movement owns an RNG derived from the batch seed and its
//! index, so a seeded batch is identical however the work is scheduled.

use super::movement_set::{Movement, MovementSet};
use super::synthesizer::Synthesizer;
use crate::plan::{PlanSettings, Point, StrokePlan, Targets};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{info, warn};

/// Parameters of one batch run
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSpec {
    /// Number of movements
    pub count: usize,
    /// Movement duration (s)
    pub duration: f64,
    /// Strokes per movement
    pub strokes: usize,
    /// Both origin coordinates are drawn uniformly from this range
    pub origin_range: (f64, f64),
    /// Batch seed; movement `i` is seeded with `seed + i`
    pub seed: Option<u64>,
}

impl BatchSpec {
    pub fn validate(&self) -> crate::Result<()> {
        let (min, max) = self.origin_range;
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(crate::Error::Config(format!("origin range is empty: [{}, {}]", min, max)));
        }
        Ok(())
    }

    fn rng_for(&self, index: usize) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_entropy(),
        }
    }
}

/// Synthesize a batch on the current rayon pool.
///
/// Failed movements are logged and counted in the set's metadata.
pub fn synthesize_batch(
    synthesizer: &Synthesizer,
    settings: PlanSettings,
    spec: &BatchSpec,
    name: String,
) -> crate::Result<MovementSet> {
    spec.validate()?;
    info!(
        count = spec.count,
        threads = rayon::current_num_threads(),
        duration = spec.duration,
        strokes = spec.strokes,
        "Starting batch"
    );

    let results: Vec<crate::Result<Movement>> = (0..spec.count)
        .into_par_iter()
        .map(|index| synthesize_one(synthesizer, settings, spec, index))
        .collect();

    let mut set = MovementSet::new(name, spec.seed);
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(movement) => set.push(movement),
            Err(e) => {
                warn!(index, error = %e, "Movement failed");
                set.record_failure();
            }
        }
    }
    set.finalize();

    info!(
        movements = set.metadata.movement_count,
        failed = set.metadata.failed_count,
        "Batch complete"
    );
    Ok(set)
}

fn synthesize_one(
    synthesizer: &Synthesizer,
    settings: PlanSettings,
    spec: &BatchSpec,
    index: usize,
) -> crate::Result<Movement> {
    let mut rng = spec.rng_for(index);
    let (min, max) = spec.origin_range;
    let origin = Point::new(rng.gen_range(min..=max), rng.gen_range(min..=max));

    let plan = StrokePlan::with_settings(Some(spec.duration), origin, spec.strokes, Targets::Unconstrained, settings)?;
    let synthesis = synthesizer.synthesize(&plan, &mut rng)?;
    Ok(Movement::new(origin, synthesis))
}
