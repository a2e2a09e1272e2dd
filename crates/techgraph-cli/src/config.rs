//! Configuration file loading for the CLI
//!
//! Finds and loads TOML configuration files from an explicit path, the
//! working directory or the platform configuration directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use techgraph::{TechGraphError, config::AppConfig};

/// Relative path checked before the platform configuration directory.
const LOCAL_CONFIG: &str = "techgraph/config.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for TechGraphError {
    fn from(err: ConfigError) -> Self {
        TechGraphError::Io(std::io::Error::other(err.to_string()))
    }
}

/// Find and load configuration
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (`techgraph/config.toml`)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if an explicit path is given but missing, or if the chosen
/// file cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, TechGraphError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "techgraph", "techgraph") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, TechGraphError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content).map_err(TechGraphError::from)
}

fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use techgraph::config::LinkLength;

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
[constraints]
gap = 40.0
align_roots = false

[layout]
flow_separation = 120.0
link_length = { kind = "jaccard", length = 30.0 }

[validation]
reject_cycles = false
"#,
        )
        .unwrap();

        assert_eq!(config.constraints().gap(), 40.0);
        assert!(!config.constraints().align_roots());
        assert!(config.constraints().align_siblings());
        assert_eq!(config.layout().flow_separation(), 120.0);
        assert_eq!(config.layout().link_length(), LinkLength::Jaccard { length: 30.0 });
        assert!(!config.validation().reject_cycles());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.constraints().gap(), 25.0);
        assert!(config.validation().reject_cycles());
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[constraints\ngap = 1").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = load_config(Some("does/not/exist.toml"));

        assert!(matches!(result, Err(TechGraphError::Io(_))));
    }
}
