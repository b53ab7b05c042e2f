//! Stroke endpoint bookkeeping
//!
//! A `StrokePlan` holds the requested movement and tracks the origin of the
//! current stroke together with the remaining targets expressed relative to
//! that origin. Advancing the plan rebases every remaining target on the
//! endpoint of the stroke that just completed.

use super::targets::Targets;
use super::types::{PlanSettings, Point};

/// Absolute endpoints and their offsets from the active origin
#[derive(Debug, Clone, PartialEq)]
struct Endpoints {
    absolute: Vec<Point>,
    relative: Vec<Point>,
}

/// Requested movement: duration, start, stroke count and endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePlan {
    duration: f64,
    stroke_count: usize,
    settings: PlanSettings,
    start: Point,
    origin: Point,
    endpoints: Option<Endpoints>,
    current_stroke: usize,
}

impl StrokePlan {
    /// Build a plan with default settings.
    ///
    /// Fails when `duration` is absent or not a positive number, when
    /// `stroke_count` is zero, or when per-stroke targets do not match
    /// `stroke_count`.
    pub fn new(
        duration: Option<f64>,
        origin: Point,
        stroke_count: usize,
        targets: Targets,
    ) -> Result<Self, crate::Error> {
        Self::with_settings(duration, origin, stroke_count, targets, PlanSettings::default())
    }

    /// Build a plan with explicit sample-rate, SNR and screen settings
    pub fn with_settings(
        duration: Option<f64>,
        origin: Point,
        stroke_count: usize,
        targets: Targets,
        settings: PlanSettings,
    ) -> Result<Self, crate::Error> {
        let duration = duration.ok_or_else(|| crate::Error::Config("duration is required".to_string()))?;
        if !duration.is_finite() || duration <= 0.0 {
            return Err(crate::Error::Config(format!(
                "duration must be a positive number of seconds, got {}",
                duration
            )));
        }
        if stroke_count == 0 {
            return Err(crate::Error::Config("stroke_count must be at least 1".to_string()));
        }
        if !origin.is_finite() {
            return Err(crate::Error::Config(format!(
                "origin must be finite, got ({}, {})",
                origin.x, origin.y
            )));
        }
        settings.validate()?;

        let absolute = match targets {
            Targets::Unconstrained => None,
            Targets::Single(target) => Some(vec![target; stroke_count]),
            Targets::PerStroke(points) => {
                if points.len() != stroke_count {
                    return Err(crate::Error::Config(format!(
                        "expected {} targets (one per stroke), got {}",
                        stroke_count,
                        points.len()
                    )));
                }
                Some(points)
            }
        };

        if let Some(points) = &absolute {
            if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
                return Err(crate::Error::Config(format!(
                    "targets must be finite, got ({}, {})",
                    bad.x, bad.y
                )));
            }
        }

        let endpoints = absolute.map(|absolute| {
            let relative = absolute.iter().map(|&target| target - origin).collect();
            Endpoints { absolute, relative }
        });

        Ok(Self {
            duration,
            stroke_count,
            settings,
            start: origin,
            origin,
            endpoints,
            current_stroke: 0,
        })
    }

    /// Move the cursor to the next stroke and rebase the remaining targets.
    ///
    /// Returns `false` without touching anything when the plan is already at
    /// its last stroke or has no explicit endpoints.
    pub fn advance_stroke(&mut self) -> bool {
        let Some(endpoints) = self.endpoints.as_mut() else {
            return false;
        };
        if self.current_stroke + 1 >= self.stroke_count {
            return false;
        }

        self.current_stroke += 1;
        self.origin = endpoints.absolute[self.current_stroke - 1];
        for i in self.current_stroke..self.stroke_count {
            endpoints.relative[i] = endpoints.absolute[i] - self.origin;
        }
        true
    }

    /// Copy of this plan reset to its first stroke
    pub fn rewound(&self) -> Self {
        let mut plan = self.clone();
        plan.current_stroke = 0;
        plan.origin = plan.start;
        if let Some(endpoints) = plan.endpoints.as_mut() {
            let start = plan.start;
            endpoints.relative = endpoints.absolute.iter().map(|&target| target - start).collect();
        }
        plan
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn stroke_count(&self) -> usize {
        self.stroke_count
    }

    /// Nominal duration of a single stroke window
    pub fn stroke_duration(&self) -> f64 {
        self.duration / self.stroke_count as f64
    }

    pub fn settings(&self) -> &PlanSettings {
        &self.settings
    }

    /// Origin the plan was constructed with
    pub fn start(&self) -> Point {
        self.start
    }

    /// Origin of the current stroke
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn current_stroke(&self) -> usize {
        self.current_stroke
    }

    pub fn is_constrained(&self) -> bool {
        self.endpoints.is_some()
    }

    pub fn is_last_stroke(&self) -> bool {
        self.current_stroke + 1 >= self.stroke_count
    }

    pub fn targets_absolute(&self) -> Option<&[Point]> {
        self.endpoints.as_ref().map(|e| e.absolute.as_slice())
    }

    pub fn targets_relative(&self) -> Option<&[Point]> {
        self.endpoints.as_ref().map(|e| e.relative.as_slice())
    }

    /// Displacement the current stroke has to cover
    pub fn current_relative_target(&self) -> Option<Point> {
        self.endpoints.as_ref().map(|e| e.relative[self.current_stroke])
    }
}
