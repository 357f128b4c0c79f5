//! Application configuration for orgchain.
//!
//! User config lives at `~/.orgchain/orgchain.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OrgChainError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "orgchain.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".orgchain";

// ---------------------------------------------------------------------------
// Policy enums
// ---------------------------------------------------------------------------

/// Layout of the hierarchy file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputFormat {
    /// Table if the first line starts with `|`, delimited otherwise.
    #[default]
    Auto,
    /// `employee<delim>manager` per line.
    Delimited,
    /// `| id | name | manager_id |` rows under a header row.
    Table,
}

/// What to do when an employee is declared twice with different managers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedeclarationPolicy {
    #[default]
    LastWriteWins,
    FirstWriteWins,
    Reject,
}

/// How query names are compared against display names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameMatching {
    /// Case-insensitive, whitespace-collapsed comparison.
    #[default]
    Normalized,
    Exact,
}

/// How chains are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputStyle {
    /// `A -> B <- C`
    #[default]
    Arrows,
    /// `A B C`
    Plain,
    Json,
}

// ---------------------------------------------------------------------------
// Config structs (matching orgchain.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub hierarchy: HierarchyConfig,

    #[serde(default)]
    pub query: QueryConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// `[input]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub format: InputFormat,

    /// Field separator for the delimited format.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            format: InputFormat::default(),
            delimiter: default_delimiter(),
        }
    }
}

fn default_delimiter() -> char {
    ','
}

/// `[hierarchy]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HierarchyConfig {
    #[serde(default)]
    pub on_redeclaration: RedeclarationPolicy,
}

/// `[query]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub name_matching: NameMatching,
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub style: OutputStyle,
}

impl AppConfig {
    /// Reject settings that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        let d = self.input.delimiter;
        if d == '|' || d == '#' || (d.is_whitespace() && d != '\t') {
            return Err(OrgChainError::config(format!(
                "delimiter {d:?} is reserved; pick another separator"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.orgchain/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| OrgChainError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.orgchain/orgchain.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| OrgChainError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        OrgChainError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| OrgChainError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| OrgChainError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| OrgChainError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("delimiter"));
        assert!(toml_str.contains("last-write-wins"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.input.delimiter, ',');
        assert_eq!(parsed.hierarchy.on_redeclaration, RedeclarationPolicy::LastWriteWins);
        assert_eq!(parsed.query.name_matching, NameMatching::Normalized);
    }

    #[test]
    fn config_with_overrides() {
        let toml_str = r#"
[input]
format = "table"

[hierarchy]
on_redeclaration = "reject"

[output]
style = "json"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.input.format, InputFormat::Table);
        assert_eq!(config.input.delimiter, ',');
        assert_eq!(config.hierarchy.on_redeclaration, RedeclarationPolicy::Reject);
        assert_eq!(config.output.style, OutputStyle::Json);
    }

    #[test]
    fn reserved_delimiter_rejected() {
        let mut config = AppConfig::default();
        config.input.delimiter = '|';
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("reserved"));

        config.input.delimiter = '\t';
        assert!(config.validate().is_ok());
    }
}
