use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::format::Semicolons;
use crate::recover::{GroupBy, NameBy};
use crate::RecoverError;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".srcrecover.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub format: FormatConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Default line-grouping policy for reconstructed output
    #[serde(default)]
    pub group_by: Option<GroupBy>,
    /// Default naming policy for reconstructed output files
    #[serde(default)]
    pub name_by: Option<NameBy>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormatConfig {
    /// Run the formatting pass over reconstructed output
    #[serde(default)]
    pub enabled: Option<bool>,
    /// Formatter command line, e.g. "prettier"
    #[serde(default)]
    pub command: Option<String>,
    /// Grammar passed to the formatter
    #[serde(default)]
    pub dialect: Option<String>,
    /// Semicolon policy passed to the formatter
    #[serde(default)]
    pub semicolons: Option<Semicolons>,
}

impl Config {
    /// Load configuration from a file in the working directory
    pub fn load() -> Result<Self, RecoverError> {
        let config_path = Path::new(DEFAULT_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            RecoverError::FileError(format!(
                "Failed to read config file {:?}: {}",
                config_path, e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            RecoverError::FileError(format!(
                "Failed to parse TOML config from {:?}: {}",
                config_path, e
            ))
        })?;

        Ok(config)
    }

    /// Load default config if file is missing, otherwise warn on parse failure
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Warning: Failed to load config: {}. Using defaults.", e);
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_all_sections() {
        let config: Config = toml::from_str(
            r#"
            [output]
            group_by = "generated-line"
            name_by = "minified-file"

            [format]
            enabled = false
            command = "prettier"
            dialect = "babel"
            semicolons = "omit"
            "#,
        )
        .unwrap();

        assert_eq!(config.output.group_by, Some(GroupBy::GeneratedLine));
        assert_eq!(config.output.name_by, Some(NameBy::MinifiedFile));
        assert_eq!(config.format.enabled, Some(false));
        assert_eq!(config.format.semicolons, Some(Semicolons::Omit));
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.output.group_by, None);
        assert_eq!(config.output.name_by, None);
        assert_eq!(config.format.command, None);
    }
}
