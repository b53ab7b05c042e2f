//! Service defaults and credentials

use crate::plan::Point;
use serde::{Deserialize, Serialize};

/// Service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Pre-shared token every request must carry; no token denies all requests
    pub auth_token: Option<String>,
    /// Duration used when a request omits one (s)
    pub default_duration: Option<f64>,
    /// Start point used when a request omits `x0` / `y0`
    pub default_origin: Point,
    /// Stroke count used when a request omits one
    pub default_stroke_count: usize,
    /// Largest stroke count a request may ask for
    pub max_stroke_count: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            auth_token: None,
            default_duration: None,
            default_origin: Point::new(308.0, 0.0),
            default_stroke_count: 2,
            max_stroke_count: 64,
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), crate::Error> {
        if let Some(token) = &self.auth_token {
            if token.is_empty() {
                return Err(crate::Error::Config("service.auth_token must not be empty".to_string()));
            }
        }
        if let Some(duration) = self.default_duration {
            if !duration.is_finite() || duration <= 0.0 {
                return Err(crate::Error::Config(format!(
                    "service.default_duration must be positive, got {}",
                    duration
                )));
            }
        }
        if !self.default_origin.is_finite() {
            return Err(crate::Error::Config("service.default_origin must be finite".to_string()));
        }
        if self.default_stroke_count == 0 {
            return Err(crate::Error::Config("service.default_stroke_count must be > 0".to_string()));
        }
        if self.default_stroke_count > self.max_stroke_count {
            return Err(crate::Error::Config(format!(
                "service.default_stroke_count ({}) exceeds service.max_stroke_count ({})",
                self.default_stroke_count, self.max_stroke_count
            )));
        }
        Ok(())
    }
}
