//! Configuration management for shacklog.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults. The
//! configuration selects the log file location, the band/mode choices shown
//! on the entry form, and up to four user-defined ADIF fields.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::qso::Qso;
use crate::validate::FieldKind;
use crate::adif;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const APP_DIR_NAME: &str = "shacklog";

/// Default log file name.
const LOG_FILE_NAME: &str = "shacklog.adi";

/// Maximum number of user-defined entry fields.
pub const MAX_CUSTOM_FIELDS: usize = 4;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `SHACKLOG_`)
/// 2. TOML config file at `~/.config/shacklog/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log file configuration.
    pub log: LogConfig,
    /// Entry form configuration.
    pub entry: EntryConfig,
    /// User-defined entry fields, at most [`MAX_CUSTOM_FIELDS`].
    #[serde(rename = "custom_field")]
    pub custom_fields: Vec<CustomField>,
}

/// Log-file-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Path to the ADIF log file.
    /// Defaults to `~/.local/share/shacklog/shacklog.adi`
    pub path: Option<PathBuf>,
}

/// Entry-form-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    /// Band choices offered by the band field.
    pub bands: Vec<String>,
    /// Mode choices offered by the mode field.
    pub modes: Vec<String>,
}

/// One user-defined entry field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    /// ADIF field name (e.g. `STATE`, `SIG_INFO`).
    pub field: String,
    /// Label shown on the entry form; defaults to the field name.
    #[serde(default)]
    pub label: Option<String>,
    /// Validator applied to entered values.
    #[serde(default)]
    pub kind: FieldKind,
    /// Uppercase entered values before logging.
    #[serde(default)]
    pub uppercase: bool,
}

impl CustomField {
    /// The label shown on the entry form.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.field)
    }
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            bands: default_bands(),
            modes: default_modes(),
        }
    }
}

/// Default band choices: the allocations the band mapper knows about.
fn default_bands() -> Vec<String> {
    [
        "160m", "80m", "60m", "40m", "30m", "20m", "17m", "15m", "12m", "10m", "6m", "2m",
        "1.25m", "70cm", "33cm", "23cm",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Default mode choices.
fn default_modes() -> Vec<String> {
    [
        "SSB", "CW", "AM", "FM", "FT8", "FT4", "RTTY", "PSK31", "MFSK", "DIGITAL",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `SHACKLOG_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("SHACKLOG_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(APP_DIR_NAME)
    }

    /// Get the log file path, resolving defaults if not set.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.log
            .path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(LOG_FILE_NAME))
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.entry.bands.is_empty() {
            return Err(Error::ConfigValidation {
                message: "entry.bands must not be empty".to_string(),
            });
        }
        if self.entry.modes.is_empty() {
            return Err(Error::ConfigValidation {
                message: "entry.modes must not be empty".to_string(),
            });
        }

        if self.custom_fields.len() > MAX_CUSTOM_FIELDS {
            return Err(Error::ConfigValidation {
                message: format!(
                    "at most {MAX_CUSTOM_FIELDS} custom fields are supported, found {}",
                    self.custom_fields.len()
                ),
            });
        }

        for (i, custom) in self.custom_fields.iter().enumerate() {
            if !adif::is_valid_field_name(&custom.field) {
                return Err(Error::ConfigValidation {
                    message: format!("custom field '{}' is not a valid ADIF name", custom.field),
                });
            }
            if Qso::is_standard_field(&custom.field) {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "custom field '{}' collides with a standard entry field",
                        custom.field
                    ),
                });
            }
            if self.custom_fields[..i]
                .iter()
                .any(|other| other.field.eq_ignore_ascii_case(&custom.field))
            {
                return Err(Error::ConfigValidation {
                    message: format!("custom field '{}' is defined twice", custom.field),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(field: &str) -> CustomField {
        CustomField {
            field: field.to_string(),
            label: None,
            kind: FieldKind::Text,
            uppercase: false,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(!config.entry.bands.is_empty());
        assert!(!config.entry.modes.is_empty());
        assert!(config.custom_fields.is_empty());
    }

    #[test]
    fn test_log_path_default() {
        let config = Config::default();
        assert!(config.log_path().ends_with("shacklog.adi"));
    }

    #[test]
    fn test_log_path_override() {
        let config = Config {
            log: LogConfig {
                path: Some(PathBuf::from("/tmp/mylog.adi")),
            },
            ..Config::default()
        };
        assert_eq!(config.log_path(), PathBuf::from("/tmp/mylog.adi"));
    }

    #[test]
    fn test_too_many_custom_fields() {
        let config = Config {
            custom_fields: vec![
                custom("F1"),
                custom("F2"),
                custom("F3"),
                custom("F4"),
                custom("F5"),
            ],
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at most 4"));
    }

    #[test]
    fn test_custom_field_name_syntax() {
        let config = Config {
            custom_fields: vec![custom("BAD-NAME")],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_field_collides_with_standard() {
        let config = Config {
            custom_fields: vec![custom("CALL")],
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("collides"));
    }

    #[test]
    fn test_custom_field_duplicate() {
        let config = Config {
            custom_fields: vec![custom("STATE"), custom("state")],
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("twice"));
    }

    #[test]
    fn test_empty_choice_lists_rejected() {
        let config = Config {
            entry: EntryConfig {
                bands: Vec::new(),
                modes: default_modes(),
            },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_custom_field_label_fallback() {
        let mut field = custom("SIG_INFO");
        assert_eq!(field.label(), "SIG_INFO");
        field.label = Some("POTA ref".to_string());
        assert_eq!(field.label(), "POTA ref");
    }

    #[test]
    fn test_parse_custom_field_toml() {
        let config: Config = figment::Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [log]
                path = "/tmp/contest.adi"

                [[custom_field]]
                field = "STATE"
                label = "State"
                kind = "state"
                uppercase = true
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(config.log_path(), PathBuf::from("/tmp/contest.adi"));
        assert_eq!(config.custom_fields.len(), 1);
        let field = &config.custom_fields[0];
        assert_eq!(field.field, "STATE");
        assert_eq!(field.kind, FieldKind::State);
        assert!(field.uppercase);
        assert!(config.validate().is_ok());
    }
}
