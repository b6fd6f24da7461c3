use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{
    AnalysisSettings, LoggingSettings, NoiseMode, SeriesSettings, ServerSettings, Settings,
    CONFIDENCE_LEVELS, FORECAST_PERIODS, HISTORY_PERIODS,
};
pub use error::ConfigError;
pub use telemetry::init_tracing;

/// Prefix for environment overrides, e.g. `ECONOTRENDS__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "ECONOTRENDS";

/// Loads the application configuration from `config.toml` in the working directory.
///
/// The file is optional; every value has a default and can be overridden through
/// `ECONOTRENDS__<SECTION>__<KEY>` environment variables. The result is validated.
pub fn load_config() -> Result<Settings, ConfigError> {
    build(config::File::with_name("config.toml").required(false))
}

/// Like `load_config`, but the file at `path` must exist.
pub fn load_config_from(path: &Path) -> Result<Settings, ConfigError> {
    build(config::File::from(path).required(true))
}

fn build<T>(file: T) -> Result<Settings, ConfigError>
where
    T: config::Source + Send + Sync + 'static,
{
    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("econotrends-{}-{name}.toml", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let path = write_temp(
            "partial",
            r#"
            [analysis]
            default_periods = 36
            default_methodology = "prophet"

            [series]
            noise = "entropy"
            "#,
        );
        let settings = load_config_from(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.analysis.default_periods, 36);
        assert_eq!(settings.analysis.default_methodology, core_types::Methodology::Prophet);
        assert_eq!(settings.analysis.default_forecast_periods, 6);
        assert_eq!(settings.series.noise, NoiseMode::Entropy);
        assert_eq!(settings.server.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_file_values_fail_validation() {
        let path = write_temp("invalid", "[analysis]\ndefault_confidence = 1.5\n");
        let result = load_config_from(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("econotrends-does-not-exist.toml");
        assert!(matches!(load_config_from(&path), Err(ConfigError::LoadError(_))));
    }
}
