use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_DATA_PATH, DEFAULT_LOCATION_COUNT, DEFAULT_PARAMETER,
    ENV_PREFIX, SETTINGS_FILE,
};
use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

/// Runtime settings: built-in defaults, then an optional TOML file, then
/// `AQ_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Settings {
    pub data_path: PathBuf,

    #[validate(range(min = 1))]
    pub cache_ttl_secs: u64,

    #[validate(length(min = 1))]
    pub default_parameter: String,

    #[validate(range(min = 1))]
    pub default_location_count: usize,

    #[validate(length(equal = 1))]
    pub delimiter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            default_parameter: DEFAULT_PARAMETER.to_string(),
            default_location_count: DEFAULT_LOCATION_COUNT,
            delimiter: ",".to_string(),
        }
    }
}

impl Settings {
    /// Load settings, reading `path` if given or `aq-processor.toml` in the
    /// working directory when it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let file_source = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(SETTINGS_FILE).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("data_path", defaults.data_path.to_string_lossy().to_string())?
            .set_default("cache_ttl_secs", defaults.cache_ttl_secs)?
            .set_default("default_parameter", defaults.default_parameter)?
            .set_default("default_location_count", defaults.default_location_count as u64)?
            .set_default("delimiter", defaults.delimiter)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(ProcessingError::InvalidFormat(format!(
                "Delimiter must be a single byte, got '{}'",
                self.delimiter
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn toml_file() -> NamedTempFile {
        Builder::new().suffix(".toml").tempfile().unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(settings.delimiter_byte().unwrap(), b',');
    }

    #[test]
    fn test_load_from_file_overrides_defaults() -> Result<()> {
        let mut file = toml_file();
        writeln!(file, "data_path = \"fixtures/aq.csv\"")?;
        writeln!(file, "cache_ttl_secs = 120")?;
        writeln!(file, "default_parameter = \"o3\"")?;

        let settings = Settings::load(Some(file.path()))?;

        assert_eq!(settings.data_path, PathBuf::from("fixtures/aq.csv"));
        assert_eq!(settings.cache_ttl_secs, 120);
        assert_eq!(settings.default_parameter, "o3");
        assert_eq!(settings.default_location_count, DEFAULT_LOCATION_COUNT);
        Ok(())
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = toml_file();
        writeln!(file, "cache_ttl_secs = 0").unwrap();

        assert!(matches!(
            Settings::load(Some(file.path())),
            Err(ProcessingError::Validation(_))
        ));
    }

    #[test]
    fn test_multi_byte_delimiter_is_rejected() {
        let settings = Settings {
            delimiter: "||".to_string(),
            ..Settings::default()
        };

        assert!(settings.validate().is_err());
        assert!(settings.delimiter_byte().is_err());
    }
}
