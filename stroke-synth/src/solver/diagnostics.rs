//! Solver state dumps
//!
//! Captures enough of the plan and the partially solved parameters to
//! reproduce a failed synthesis offline.

use super::parameters::{LogTimeShape, StrokeParameters};
use crate::plan::{PlanSettings, Point, StrokePlan};
use serde::{Deserialize, Serialize};

/// Snapshot of solver inputs and progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverState {
    pub duration: f64,
    pub stroke_count: usize,
    pub settings: PlanSettings,
    pub start: Point,
    /// Absolute targets, absent for unconstrained movements
    pub targets: Option<Vec<Point>>,
    pub log_time_mean: Option<f64>,
    pub log_time_std_dev: Option<f64>,
    pub heading_starts: Vec<f64>,
    pub heading_ends: Vec<f64>,
    pub amplitudes: Vec<f64>,
}

impl SolverState {
    pub fn from_plan(plan: &StrokePlan) -> Self {
        Self {
            duration: plan.duration(),
            stroke_count: plan.stroke_count(),
            settings: *plan.settings(),
            start: plan.start(),
            targets: plan.targets_absolute().map(<[Point]>::to_vec),
            log_time_mean: None,
            log_time_std_dev: None,
            heading_starts: Vec::new(),
            heading_ends: Vec::new(),
            amplitudes: Vec::new(),
        }
    }

    /// State after a set of strokes has been fully derived
    pub fn with_parameters(plan: &StrokePlan, strokes: &[StrokeParameters]) -> Self {
        let mut state = Self::from_plan(plan);
        for params in strokes {
            state.record(params);
        }
        state
    }

    pub fn set_shape(&mut self, shape: LogTimeShape) {
        self.log_time_mean = Some(shape.mean);
        self.log_time_std_dev = Some(shape.std_dev);
    }

    /// Append a solved stroke
    pub fn record(&mut self, params: &StrokeParameters) {
        self.log_time_mean = Some(params.log_time_mean);
        self.log_time_std_dev = Some(params.log_time_std_dev);
        self.heading_starts.push(params.heading_start);
        self.heading_ends.push(params.heading_end);
        self.amplitudes.push(params.amplitude);
    }

    pub fn to_json_pretty(&self) -> Result<String, crate::Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Targets;

    #[test]
    fn test_state_records_parameters() {
        let plan = StrokePlan::new(
            Some(1.0),
            Point::new(1.0, 2.0),
            1,
            Targets::Single(Point::new(50.0, 60.0)),
        )
        .unwrap();
        let params = StrokeParameters {
            heading_start: 0.1,
            heading_end: 0.9,
            log_time_mean: -1.0,
            log_time_std_dev: 0.3,
            amplitude: 120.0,
        };

        let state = SolverState::with_parameters(&plan, &[params]);
        assert_eq!(state.heading_starts, vec![0.1]);
        assert_eq!(state.heading_ends, vec![0.9]);
        assert_eq!(state.amplitudes, vec![120.0]);
        assert_eq!(state.log_time_mean, Some(-1.0));
        assert_eq!(state.targets, Some(vec![Point::new(50.0, 60.0)]));
    }

    #[test]
    fn test_state_dumps_to_json() {
        let plan = StrokePlan::new(Some(1.2), Point::ORIGIN, 2, Targets::Unconstrained).unwrap();
        let json = SolverState::from_plan(&plan).to_json_pretty().unwrap();
        assert!(json.contains("\"duration\": 1.2"));
        assert!(json.contains("\"stroke_count\": 2"));
    }
}
