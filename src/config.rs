//! Configuration, read from TOML.
//!
//! ```toml
//! civil_offset_minutes = 540
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::civil::KST_OFFSET_MINUTES;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Offset (east of UTC) of the civil zone pillars are computed in.
    #[serde(default = "default_offset")]
    pub civil_offset_minutes: i32,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            civil_offset_minutes: default_offset(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_offset() -> i32 {
    KST_OFFSET_MINUTES
}

fn default_level() -> String {
    "info".to_owned()
}

impl Config {
    /// Loads configuration from `path`, or the defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.civil_offset_minutes.abs() >= 24 * 60 {
            return Err(Error::Config(format!(
                "civil_offset_minutes must be within a day of UTC, got {}",
                self.civil_offset_minutes
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_a_file() {
        let config = Config::load(None).unwrap();
        assert_eq!(540, config.civil_offset_minutes);
        assert_eq!("info", config.logging.level);
        assert!(!config.logging.json);
    }

    #[test]
    fn empty_document_is_all_defaults() {
        assert_eq!(Config::default(), Config::from_toml_str("").unwrap());
    }

    #[test]
    fn parses_fields() {
        let config = Config::from_toml_str(
            r#"
            civil_offset_minutes = -300

            [logging]
            level = "debug"
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(-300, config.civil_offset_minutes);
        assert_eq!("debug", config.logging.level);
        assert!(config.logging.json);
    }

    #[test]
    fn rejects_bad_documents() {
        for text in [
            "civil_offset_minutes = 1440",
            "civil_offset_minutes = \"nine hours\"",
            "[logging\n",
        ] {
            assert!(
                matches!(Config::from_toml_str(text), Err(Error::Config(_))),
                "{text}"
            );
        }
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = Config::load(Some(Path::new("/nonexistent/manse.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
