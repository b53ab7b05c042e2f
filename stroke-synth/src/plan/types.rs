//! Geometry and settings shared by plans, solver and engine

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Point (or displacement) in screen space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length when the point is read as a displacement
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Drawable canvas; positions are clipped into `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub width: f64,
    pub height: f64,
}

impl ScreenBounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp a point to the nearest bound on each axis
    pub fn clip(&self, point: Point) -> Point {
        Point::new(point.x.clamp(0.0, self.width), point.y.clamp(0.0, self.height))
    }

    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Scalar settings carried by every plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSettings {
    /// Nominal sampling rate (Hz), kept for diagnostics
    pub sample_rate_hint: f64,
    /// Signal-to-noise ratio used to size optional sensor noise
    pub snr: f64,
    /// Canvas the trajectory is clipped to
    pub screen: ScreenBounds,
}

impl Default for PlanSettings {
    fn default() -> Self {
        Self {
            sample_rate_hint: 50.0,
            snr: 0.98,
            screen: ScreenBounds::default(),
        }
    }
}

impl PlanSettings {
    /// Validate settings, returning the first invalid field
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !self.sample_rate_hint.is_finite() || self.sample_rate_hint <= 0.0 {
            return Err(crate::Error::Config(format!(
                "sample_rate_hint must be positive, got {}",
                self.sample_rate_hint
            )));
        }
        if !self.snr.is_finite() || self.snr <= 0.0 {
            return Err(crate::Error::Config(format!(
                "snr must be positive, got {}",
                self.snr
            )));
        }
        let screen = &self.screen;
        if !screen.width.is_finite() || !screen.height.is_finite() || screen.width < 0.0 || screen.height < 0.0 {
            return Err(crate::Error::Config(format!(
                "screen bounds must be non-negative, got {}x{}",
                screen.width, screen.height
            )));
        }
        Ok(())
    }
}
