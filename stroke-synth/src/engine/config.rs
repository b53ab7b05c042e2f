//! Trajectory engine configuration

use serde::{Deserialize, Serialize};

/// Sampling and post-processing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lowest instantaneous sampling frequency (Hz)
    pub min_frequency: f64,
    /// Highest instantaneous sampling frequency (Hz)
    pub max_frequency: f64,
    /// Sensor-style noise stage
    #[serde(default)]
    pub noise: NoiseConfig,
}

/// Optional Gaussian noise sized from the plan's SNR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Add the noise to the trajectory (powers are computed either way)
    pub enabled: bool,
    /// Multiplier applied to `sqrt(noise_power / duration)`
    pub scale: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_frequency: 50.0,
            max_frequency: 140.0,
            noise: NoiseConfig::default(),
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            scale: 0.01,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !self.min_frequency.is_finite() || self.min_frequency <= 0.0 {
            return Err(crate::Error::Config(format!(
                "engine.min_frequency must be positive, got {}",
                self.min_frequency
            )));
        }
        if !self.max_frequency.is_finite() || self.max_frequency < self.min_frequency {
            return Err(crate::Error::Config(format!(
                "engine.max_frequency must be >= min_frequency ({}), got {}",
                self.min_frequency, self.max_frequency
            )));
        }
        if !self.noise.scale.is_finite() || self.noise.scale < 0.0 {
            return Err(crate::Error::Config(format!(
                "engine.noise.scale must be >= 0, got {}",
                self.noise.scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.min_frequency, 50.0);
        assert_eq!(config.max_frequency, 140.0);
        assert!(!config.noise.enabled);
        assert_eq!(config.noise.scale, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_frequencies_rejected() {
        let config = EngineConfig {
            min_frequency: 100.0,
            max_frequency: 50.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let config = EngineConfig {
            min_frequency: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_noise_section_is_optional() {
        let config: EngineConfig = toml::from_str("min_frequency = 60.0\nmax_frequency = 120.0\n").unwrap();
        assert_eq!(config.noise, NoiseConfig::default());
    }
}
