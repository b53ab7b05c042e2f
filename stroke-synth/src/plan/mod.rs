//! Movement planning
//!
//! Describes what a synthesized movement has to achieve: how long it takes,
//! where it starts, how many strokes compose it and where each stroke ends.

pub mod stroke_plan;
pub mod targets;
pub mod types;

pub use stroke_plan::StrokePlan;
pub use targets::{TargetAxis, Targets};
pub use types::{PlanSettings, Point, ScreenBounds};
