//! Stroke endpoint specification
//!
//! Targets arrive either as per-stroke points or, at the request boundary,
//! as separate X and Y axes that may each be absent, a single value, or a
//! list with one entry per stroke.

use super::types::Point;
use serde::{Deserialize, Serialize};

/// Endpoints requested for a movement
#[derive(Debug, Clone, PartialEq)]
pub enum Targets {
    /// No endpoints: stroke parameters are sampled freely
    Unconstrained,
    /// One absolute endpoint shared by every stroke
    Single(Point),
    /// One absolute endpoint per stroke
    PerStroke(Vec<Point>),
}

impl Targets {
    pub fn is_constrained(&self) -> bool {
        !matches!(self, Targets::Unconstrained)
    }

    /// Combine separate X and Y target axes.
    ///
    /// A single value paired with a list is broadcast over the list. Lists
    /// must hold exactly `stroke_count` entries.
    pub fn from_axes(
        x: Option<TargetAxis>,
        y: Option<TargetAxis>,
        stroke_count: usize,
    ) -> Result<Self, crate::Error> {
        match (x, y) {
            (None, None) => Ok(Targets::Unconstrained),
            (Some(_), None) | (None, Some(_)) => Err(crate::Error::Config(
                "targets_x and targets_y must be given together".to_string(),
            )),
            (Some(TargetAxis::Single(x)), Some(TargetAxis::Single(y))) => {
                Ok(Targets::Single(Point::new(x, y)))
            }
            (Some(x), Some(y)) => {
                let xs = x.expand("targets_x", stroke_count)?;
                let ys = y.expand("targets_y", stroke_count)?;
                Ok(Targets::PerStroke(
                    xs.into_iter().zip(ys).map(Point::from).collect(),
                ))
            }
        }
    }
}

/// One coordinate axis of the requested targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetAxis {
    Single(f64),
    List(Vec<f64>),
}

impl TargetAxis {
    fn expand(self, name: &str, stroke_count: usize) -> Result<Vec<f64>, crate::Error> {
        match self {
            TargetAxis::Single(value) => Ok(vec![value; stroke_count]),
            TargetAxis::List(values) if values.len() == stroke_count => Ok(values),
            TargetAxis::List(values) => Err(crate::Error::Config(format!(
                "{} has {} entries but stroke_count is {}",
                name,
                values.len(),
                stroke_count
            ))),
        }
    }
}
