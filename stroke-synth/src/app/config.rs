//! Configuration Management

use crate::engine::EngineConfig;
use crate::plan::PlanSettings;
use crate::service::ServiceConfig;
use crate::solver::SolverConfig;
use crate::workflow::Synthesizer;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[derive(Default)]
#[serde(default)]
pub struct Config {
    /// Seed for reproducible runs (fresh entropy when absent)
    pub seed: Option<u64>,
    /// Plan settings: sample-rate hint, SNR, screen bounds
    pub plan: PlanSettings,
    /// Stroke parameter sampling ranges and velocity correction
    pub solver: SolverConfig,
    /// Time grid and noise settings
    pub engine: EngineConfig,
    /// Request defaults and credentials
    pub service: ServiceConfig,
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.plan.validate()?;
        self.solver.validate()?;
        self.engine.validate()?;
        self.service.validate()?;
        Ok(())
    }

    /// Synthesizer built from the solver and engine sections
    pub fn synthesizer(&self) -> Synthesizer {
        Synthesizer::new(self.solver.clone(), self.engine.clone())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".stroke_synth").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Look up a value by dotted key, e.g. `engine.noise.scale`
    pub fn get(&self, key: &str) -> Result<Option<toml::Value>, crate::Error> {
        let root = toml::Value::try_from(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        let value = key
            .split('.')
            .try_fold(&root, |value, part| value.get(part));
        Ok(value.cloned())
    }
}
