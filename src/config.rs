//! Configuration for a ledger session
//!
//! Controls how incomplete records are filled in and how answers are padded
//! at the output boundary. Every field has a default, so an empty JSON object
//! or TOML document is a valid configuration.
use crate::error::{LedgerError, Result};
use serde::de::Error;
use std::path::Path;

/// Ledger configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Value used for a trailing integer field that is missing or unparsable
    #[serde(default = "Config::default_missing_field_value")]
    pub missing_field_value: i64,

    /// Output padding
    #[serde(default)]
    pub output: OutputConfig,
}

/// Zero-padding widths applied when answers are rendered
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_timestamp_width")]
    pub timestamp_width: usize,

    /// Width for package ids, facilities and sections
    #[serde(default = "OutputConfig::default_field_width")]
    pub field_width: usize,
}

impl OutputConfig {
    const MAX_WIDTH: usize = 20;

    const fn default_timestamp_width() -> usize {
        7
    }

    const fn default_field_width() -> usize {
        3
    }

    pub fn with_timestamp_width(mut self, width: usize) -> Self {
        self.timestamp_width = width;
        self
    }

    pub fn with_field_width(mut self, width: usize) -> Self {
        self.field_width = width;
        self
    }

    fn validate(&self) -> std::result::Result<(), String> {
        for (name, width) in [
            ("timestamp_width", self.timestamp_width),
            ("field_width", self.field_width),
        ] {
            if width == 0 || width > Self::MAX_WIDTH {
                return Err(format!(
                    "{} must be between 1 and {}, got {}",
                    name,
                    Self::MAX_WIDTH,
                    width
                ));
            }
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            timestamp_width: Self::default_timestamp_width(),
            field_width: Self::default_field_width(),
        }
    }
}

impl Config {
    const fn default_missing_field_value() -> i64 {
        -1
    }

    pub fn with_missing_field_value(mut self, value: i64) -> Self {
        self.missing_field_value = value;
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), String> {
        self.output.validate()
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load a configuration file, choosing the format from its extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&contents).map_err(|e| {
                LedgerError::Serialization(format!(
                    "Failed to parse JSON config '{}': {}",
                    path.display(),
                    e
                ))
            }),
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&contents).map_err(|e| {
                LedgerError::Serialization(format!(
                    "Failed to parse TOML config '{}': {}",
                    path.display(),
                    e
                ))
            }),
            other => Err(LedgerError::InvalidConfig(format!(
                "Unsupported config format {:?} for '{}'",
                other,
                path.display()
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            missing_field_value: Self::default_missing_field_value(),
            output: OutputConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.missing_field_value, -1);
        assert_eq!(config.output.timestamp_width, 7);
        assert_eq!(config.output.field_width, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default()
            .with_missing_field_value(0)
            .with_output(OutputConfig::default().with_field_width(4));

        let json = config.to_json().unwrap();
        let deserialized = Config::from_json(&json).unwrap();

        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_config_empty_json_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(Config::from_json(r#"{"geohash_precision": 8}"#).is_err());
    }

    #[test]
    fn test_config_validation() {
        let config =
            Config::default().with_output(OutputConfig::default().with_timestamp_width(0));
        assert!(config.validate().is_err());
        assert!(Config::from_json(r#"{"output": {"field_width": 99}}"#).is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config::default().with_missing_field_value(-7);
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parcelog.json");
        std::fs::write(&path, r#"{"missing_field_value": 0}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.missing_field_value, 0);

        let bad = dir.path().join("parcelog.yaml");
        std::fs::write(&bad, "missing_field_value: 0").unwrap();
        assert!(matches!(
            Config::load(&bad),
            Err(LedgerError::InvalidConfig(_))
        ));
    }
}
