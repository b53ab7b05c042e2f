//! Request handling
//!
//! Turns a `GenerationRequest` into a plan, runs the synthesizer and folds
//! every outcome, including failures, into a `GenerationResponse`.

use super::config::ServiceConfig;
use super::message::{GenerationRequest, GenerationResponse};
use crate::plan::{PlanSettings, Point, StrokePlan, Targets};
use crate::workflow::Synthesizer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Error returned for requests without a valid token
pub const DENIED_MESSAGE: &str = "request denied: missing or invalid token";

/// Synthesizes movements for authenticated requests
#[derive(Debug, Clone)]
pub struct SynthesisService {
    config: ServiceConfig,
    settings: PlanSettings,
    synthesizer: Synthesizer,
}

impl SynthesisService {
    pub fn new(config: ServiceConfig, settings: PlanSettings, synthesizer: Synthesizer) -> Self {
        if config.auth_token.is_none() {
            warn!("No service token configured; every request will be denied");
        }
        Self {
            config,
            settings,
            synthesizer,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Handle one request. Never fails; errors become `Failure` responses.
    pub fn handle(&self, request: &GenerationRequest) -> GenerationResponse {
        let request_id = Uuid::new_v4();

        if !self.is_authorized(request.token.as_deref()) {
            warn!(%request_id, "Denied request with missing or invalid token");
            return GenerationResponse::Failure {
                error: DENIED_MESSAGE.to_string(),
                trace: String::new(),
                solver_dump: None,
            };
        }

        debug!(
            %request_id,
            duration = ?request.duration,
            stroke_count = ?request.stroke_count,
            constrained = request.targets_x.is_some() || request.targets_y.is_some(),
            "Handling generation request"
        );

        let mut rng = match request.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        match self.generate(request, &mut rng) {
            Ok(sensor_data) => {
                info!(%request_id, bytes = sensor_data.len(), "Generated sensor data");
                GenerationResponse::Success { sensor_data }
            }
            Err(e) => {
                error!(%request_id, error = %e, "Sensor data generation failed");
                failure(&e)
            }
        }
    }

    fn is_authorized(&self, token: Option<&str>) -> bool {
        match (self.config.auth_token.as_deref(), token) {
            (Some(expected), Some(given)) => expected == given,
            _ => false,
        }
    }

    /// Build the plan for a request, applying service defaults
    pub fn plan_for(&self, request: &GenerationRequest) -> crate::Result<StrokePlan> {
        let stroke_count = request.stroke_count.unwrap_or(self.config.default_stroke_count);
        if stroke_count > self.config.max_stroke_count {
            return Err(crate::Error::Config(format!(
                "stroke_count {} exceeds the service limit of {}",
                stroke_count, self.config.max_stroke_count
            )));
        }
        let origin = Point::new(
            request.x0.unwrap_or(self.config.default_origin.x),
            request.y0.unwrap_or(self.config.default_origin.y),
        );
        let targets = Targets::from_axes(request.targets_x.clone(), request.targets_y.clone(), stroke_count)?;

        StrokePlan::with_settings(
            request.duration.or(self.config.default_duration),
            origin,
            stroke_count,
            targets,
            self.settings,
        )
    }

    fn generate(&self, request: &GenerationRequest, rng: &mut StdRng) -> crate::Result<String> {
        let plan = self.plan_for(request)?;
        let synthesis = self.synthesizer.synthesize(&plan, rng)?;
        Ok(synthesis.sensor_data())
    }
}

/// Fold an error into a failure response with its source chain and any
/// captured solver state
fn failure(err: &crate::Error) -> GenerationResponse {
    let trace = std::iter::successors(Some(err as &dyn std::error::Error), |e| e.source())
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\ncaused by: ");

    let solver_dump = err.diagnostic_state().and_then(|state| match state.to_json_pretty() {
        Ok(json) => Some(json),
        Err(e) => {
            warn!(error = %e, "Could not serialize solver state");
            None
        }
    });

    GenerationResponse::Failure {
        error: err.to_string(),
        trace,
        solver_dump,
    }
}
