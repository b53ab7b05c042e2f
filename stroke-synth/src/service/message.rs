//! Request and response messages

use crate::plan::TargetAxis;
use serde::{Deserialize, Serialize};

/// Request for one synthesized movement.
///
/// Every field except `token` may be omitted; omitted values fall back to
/// the service defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationRequest {
    pub duration: Option<f64>,
    pub x0: Option<f64>,
    pub y0: Option<f64>,
    pub stroke_count: Option<usize>,
    /// A single value or one value per stroke
    pub targets_x: Option<TargetAxis>,
    pub targets_y: Option<TargetAxis>,
    /// Seed for a reproducible movement
    pub seed: Option<u64>,
    pub token: Option<String>,
}

/// Outcome of a generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResponse {
    Success {
        /// Compact pointer event log
        sensor_data: String,
    },
    Failure {
        error: String,
        /// Error source chain, outermost first
        trace: String,
        /// Pretty JSON of the solver state, when one was captured
        solver_dump: Option<String>,
    },
}

impl GenerationResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResponse::Success { .. })
    }
}
