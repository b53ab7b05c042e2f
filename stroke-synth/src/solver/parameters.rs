//! Stroke parameter types

use serde::{Deserialize, Serialize};

/// Lognormal parameters of a single stroke
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeParameters {
    /// Heading at the start of the stroke (radians)
    pub heading_start: f64,
    /// Heading at the end of the stroke (radians)
    pub heading_end: f64,
    /// Mean of the log-time course (μ)
    pub log_time_mean: f64,
    /// Standard deviation of the log-time course (σ)
    pub log_time_std_dev: f64,
    /// Displacement scale (D)
    pub amplitude: f64,
}

impl StrokeParameters {
    /// Total heading sweep; zero means the closed-form position is undefined
    pub fn heading_sweep(&self) -> f64 {
        self.heading_end - self.heading_start
    }
}

/// Log-time course shared by the strokes of a constrained solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogTimeShape {
    pub mean: f64,
    pub std_dev: f64,
}

/// Outcome of the peak-velocity rejection loop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityCorrection {
    /// Number of log-time-mean redraws performed
    pub attempts: u32,
    /// Peak velocity of the accepted draw
    pub peak_velocity: f64,
    /// Peak velocity fell inside the acceptance envelope
    pub satisfied: bool,
    /// Peak velocity also fell inside the nominal operating range
    pub within_nominal: bool,
}

/// Parameters for every stroke of a movement.
///
/// Unconstrained movements share one freely sampled set; constrained
/// movements carry one solved set per stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ParameterSource {
    Unconstrained {
        parameters: StrokeParameters,
        correction: VelocityCorrection,
    },
    Constrained {
        strokes: Vec<StrokeParameters>,
    },
}

impl ParameterSource {
    /// Parameters driving stroke `index`
    pub fn for_stroke(&self, index: usize) -> Option<&StrokeParameters> {
        match self {
            ParameterSource::Unconstrained { parameters, .. } => Some(parameters),
            ParameterSource::Constrained { strokes } => strokes.get(index),
        }
    }

    pub fn is_constrained(&self) -> bool {
        matches!(self, ParameterSource::Constrained { .. })
    }

    /// Every distinct parameter set, in stroke order
    pub fn all(&self) -> &[StrokeParameters] {
        match self {
            ParameterSource::Unconstrained { parameters, .. } => std::slice::from_ref(parameters),
            ParameterSource::Constrained { strokes } => strokes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(heading_end: f64) -> StrokeParameters {
        StrokeParameters {
            heading_start: 0.5,
            heading_end,
            log_time_mean: -1.0,
            log_time_std_dev: 0.4,
            amplitude: 250.0,
        }
    }

    #[test]
    fn test_unconstrained_shares_parameters() {
        let source = ParameterSource::Unconstrained {
            parameters: sample(1.0),
            correction: VelocityCorrection {
                attempts: 0,
                peak_velocity: 500.0,
                satisfied: true,
                within_nominal: true,
            },
        };
        assert_eq!(source.for_stroke(0), source.for_stroke(7));
        assert_eq!(source.all().len(), 1);
        assert!(!source.is_constrained());
    }

    #[test]
    fn test_constrained_indexes_strokes() {
        let source = ParameterSource::Constrained {
            strokes: vec![sample(1.0), sample(2.0)],
        };
        assert_eq!(source.for_stroke(1).unwrap().heading_end, 2.0);
        assert!(source.for_stroke(2).is_none());
        assert!(source.is_constrained());
    }

    #[test]
    fn test_source_serializes_with_mode_tag() {
        let source = ParameterSource::Constrained { strokes: vec![sample(1.0)] };
        let json = serde_json::to_string(&source).unwrap();
        assert!(json.contains("\"mode\":\"constrained\""));
    }

    #[test]
    fn test_heading_sweep() {
        assert_eq!(sample(1.5).heading_sweep(), 1.0);
    }
}
