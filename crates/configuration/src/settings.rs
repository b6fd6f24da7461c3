use crate::error::ConfigError;
use core_types::Methodology;
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Accepted history lengths, in periods.
pub const HISTORY_PERIODS: RangeInclusive<usize> = 1..=100;
/// Accepted forecast horizons, in periods.
pub const FORECAST_PERIODS: RangeInclusive<usize> = 1..=24;
/// Accepted confidence levels.
pub const CONFIDENCE_LEVELS: RangeInclusive<f64> = 0.1..=1.0;

/// The root configuration structure for the entire application.
///
/// Every section is optional in `config.toml`; missing sections take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub series: SeriesSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Defaults applied to requests that leave a parameter out.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// History length when a request gives none.
    pub default_periods: usize,
    pub default_forecast_periods: usize,
    pub default_confidence: f64,
    pub default_methodology: Methodology,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            default_periods: 24,
            default_forecast_periods: 6,
            default_confidence: 0.8,
            default_methodology: Methodology::Linear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseMode {
    /// Reproducible noise derived from each request plus `seed`.
    #[default]
    Seeded,
    /// Fresh OS entropy for every series.
    Entropy,
}

/// Controls the synthetic data source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeriesSettings {
    pub noise: NoiseMode,
    pub seed: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// An `EnvFilter` directive, e.g. `info` or `info,analytics=debug`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "econotrends.log".to_string(),
        }
    }
}

impl Settings {
    /// Rejects defaults that no request could legally use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.analysis;
        if !HISTORY_PERIODS.contains(&a.default_periods) {
            return Err(ConfigError::ValidationError(format!(
                "analysis.default_periods must be in {HISTORY_PERIODS:?}, got {}",
                a.default_periods
            )));
        }
        if !FORECAST_PERIODS.contains(&a.default_forecast_periods) {
            return Err(ConfigError::ValidationError(format!(
                "analysis.default_forecast_periods must be in {FORECAST_PERIODS:?}, got {}",
                a.default_forecast_periods
            )));
        }
        if !CONFIDENCE_LEVELS.contains(&a.default_confidence) {
            return Err(ConfigError::ValidationError(format!(
                "analysis.default_confidence must be in {CONFIDENCE_LEVELS:?}, got {}",
                a.default_confidence
            )));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.analysis.default_periods, 24);
        assert_eq!(settings.analysis.default_methodology, Methodology::Linear);
        assert_eq!(settings.series.noise, NoiseMode::Seeded);
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_out_of_range_defaults_are_rejected() {
        let mut settings = Settings::default();
        settings.analysis.default_periods = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::ValidationError(_))));

        let mut settings = Settings::default();
        settings.analysis.default_forecast_periods = 25;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.analysis.default_confidence = 0.05;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }
}
