//! Movement Set Format
//!
//! On-disk format for a batch of synthesized movements.

use super::synthesizer::Synthesis;
use crate::plan::Point;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current movement set format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Movement set metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSetMetadata {
    /// Unique set ID
    pub id: Uuid,
    /// Set name
    pub name: String,
    /// Seed the batch was derived from, if any
    pub seed: Option<u64>,
    /// Generation start time
    pub created_at: DateTime<Utc>,
    /// Generation end time
    pub completed_at: Option<DateTime<Utc>>,
    /// Movements that synthesized successfully
    pub movement_count: usize,
    /// Movements that failed and were left out
    pub failed_count: usize,
    /// Version of the set format
    pub format_version: String,
}

impl MovementSetMetadata {
    pub fn new(name: String, seed: Option<u64>) -> Self {
        Self {
            name,
            seed,
            ..Default::default()
        }
    }
}

impl Default for MovementSetMetadata {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            seed: None,
            created_at: Utc::now(),
            completed_at: None,
            movement_count: 0,
            failed_count: 0,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }
}

/// One synthesized movement and where it started
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub origin: Point,
    /// Compact event log of the path
    pub sensor_data: String,
    pub synthesis: Synthesis,
}

impl Movement {
    pub fn new(origin: Point, synthesis: Synthesis) -> Self {
        Self {
            origin,
            sensor_data: synthesis.sensor_data(),
            synthesis,
        }
    }
}

/// A batch of movements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementSet {
    pub metadata: MovementSetMetadata,
    pub movements: Vec<Movement>,
}

impl MovementSet {
    pub fn new(name: String, seed: Option<u64>) -> Self {
        Self {
            metadata: MovementSetMetadata::new(name, seed),
            movements: Vec::new(),
        }
    }

    pub fn push(&mut self, movement: Movement) {
        self.movements.push(movement);
    }

    pub fn record_failure(&mut self) {
        self.metadata.failed_count += 1;
    }

    /// Stamp completion time and counts
    pub fn finalize(&mut self) {
        self.metadata.completed_at = Some(Utc::now());
        self.metadata.movement_count = self.movements.len();
    }

    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a set from a file.
    ///
    /// A different format version is logged and loading continues.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let set: MovementSet = serde_json::from_str(&content)?;
        if set.metadata.format_version != CURRENT_FORMAT_VERSION {
            tracing::warn!(
                name = %set.metadata.name,
                found = %set.metadata.format_version,
                expected = CURRENT_FORMAT_VERSION,
                "Movement set has different format version; some fields may use default values"
            );
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }
}
