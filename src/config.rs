use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Configuration file structure that mirrors the global CLI arguments
/// All fields are optional to allow partial configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Output format: text or json
    pub output: Option<String>,

    /// Save report as JSON to file
    pub save: Option<String>,

    /// Append each analysis as a JSON line to an audit log file
    pub log: Option<String>,

    /// Verbose output
    pub verbose: Option<bool>,

    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// Rate limit for SERP requests per second
    pub rate_limit: Option<f64>,
}

/// Configuration file format based on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                "toml" => Some(ConfigFormat::Toml),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            })
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Toml => &["toml"],
            ConfigFormat::Yaml => &["yaml", "yml"],
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };

        Ok(config)
    }

    /// Get the default configuration file paths to check (in order of priority)
    /// Returns paths in order: current directory, user config directory
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Check current directory first (highest priority)
        for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
            for ext in format.extensions() {
                paths.push(PathBuf::from(format!("seoscope.{}", ext)));
            }
        }

        // Check user config directory (~/.config/seoscope)
        // Use XDG_CONFIG_HOME if set, otherwise fall back to ~/.config
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .and_then(|p| {
                if p.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(p))
                }
            })
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(config_home) = config_home {
            let seoscope_config_dir = config_home.join("seoscope");
            for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
                for ext in format.extensions() {
                    paths.push(seoscope_config_dir.join(format!("config.{}", ext)));
                }
            }
        }

        paths
    }

    /// Try to load configuration from default paths
    /// Returns the first configuration file found, or None if no config exists
    pub fn from_default_paths() -> Result<Option<Self>> {
        for path in Self::default_paths() {
            if path.exists() {
                return Ok(Some(Self::from_file(&path)?));
            }
        }
        Ok(None)
    }

    /// Merge this configuration with CLI arguments
    /// CLI arguments take precedence over config file values
    pub fn merge_with_cli(&self, cli: &Cli) -> Cli {
        Cli {
            command: cli.command.clone(),
            output: if cli.output != "text" {
                cli.output.clone()
            } else {
                self.output.clone().unwrap_or_else(|| cli.output.clone())
            },
            save: cli.save.clone().or_else(|| self.save.clone()),
            log: cli.log.clone().or_else(|| self.log.clone()),
            verbose: if cli.verbose {
                cli.verbose
            } else {
                self.verbose.unwrap_or(cli.verbose)
            },
            timeout: if cli.timeout != 30 {
                cli.timeout
            } else {
                self.timeout.unwrap_or(cli.timeout)
            },
            rate_limit: cli.rate_limit.or(self.rate_limit),
            config: cli.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Command;
    use serial_test::serial;
    use tempfile::NamedTempFile;

    fn audit_cli() -> Cli {
        Cli {
            command: Command::Audit {
                url: "https://example.com".to_string(),
            },
            output: "text".to_string(),
            save: None,
            log: None,
            verbose: false,
            timeout: 30,
            rate_limit: None,
            config: None,
        }
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yaml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("config.txt")), None);
    }

    #[test]
    fn test_load_json_config() {
        let json_content = r#"
{
    "output": "json",
    "verbose": true,
    "timeout": 10,
    "rate_limit": 0.5
}
        "#;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("json");
        fs::write(&temp_path, json_content).unwrap();

        let config = Config::from_file(&temp_path).unwrap();
        assert_eq!(config.output, Some("json".to_string()));
        assert_eq!(config.verbose, Some(true));
        assert_eq!(config.timeout, Some(10));
        assert_eq!(config.rate_limit, Some(0.5));

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_load_toml_config() {
        let toml_content = r#"
output = "json"
verbose = true
timeout = 10
        "#;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("toml");
        fs::write(&temp_path, toml_content).unwrap();

        let config = Config::from_file(&temp_path).unwrap();
        assert_eq!(config.output, Some("json".to_string()));
        assert_eq!(config.verbose, Some(true));
        assert_eq!(config.timeout, Some(10));

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_load_yaml_config() {
        let yaml_content = r#"
output: "json"
verbose: true
timeout: 10
        "#;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("yaml");
        fs::write(&temp_path, yaml_content).unwrap();

        let config = Config::from_file(&temp_path).unwrap();
        assert_eq!(config.output, Some("json".to_string()));
        assert_eq!(config.verbose, Some(true));
        assert_eq!(config.timeout, Some(10));

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_partial_config() {
        let json_content = r#"
{
    "timeout": 15
}
        "#;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("json");
        fs::write(&temp_path, json_content).unwrap();

        let config = Config::from_file(&temp_path).unwrap();
        assert_eq!(config.output, None);
        assert_eq!(config.timeout, Some(15));
        assert_eq!(config.rate_limit, None);

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_invalid_json_config() {
        let invalid_json = r#"{ invalid json }"#;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("json");
        fs::write(&temp_path, invalid_json).unwrap();

        let result = Config::from_file(&temp_path);
        assert!(result.is_err());

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_unsupported_format() {
        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("txt");
        fs::write(&temp_path, "content").unwrap();

        let result = Config::from_file(&temp_path);
        assert!(result.is_err());

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_merge_with_cli_defaults() {
        let config = Config {
            output: Some("json".to_string()),
            timeout: Some(10),
            verbose: Some(true),
            ..Default::default()
        };

        let cli = audit_cli();
        let merged = config.merge_with_cli(&cli);
        assert_eq!(merged.output, "json"); // from config
        assert_eq!(merged.timeout, 10); // from config
        assert!(merged.verbose); // from config
    }

    #[test]
    fn test_merge_with_cli_overrides() {
        let config = Config {
            output: Some("json".to_string()),
            timeout: Some(10),
            save: Some("config-report.json".to_string()),
            rate_limit: Some(1.0),
            ..Default::default()
        };

        let mut cli = audit_cli();
        cli.output = "text".to_string();
        cli.timeout = 5;
        cli.save = Some("cli-report.json".to_string());
        cli.rate_limit = Some(2.0);

        let merged = config.merge_with_cli(&cli);
        assert_eq!(merged.timeout, 5); // CLI override
        assert_eq!(merged.save, Some("cli-report.json".to_string())); // CLI value
        assert_eq!(merged.rate_limit, Some(2.0)); // CLI value
        // "text" is the default so the config value wins
        assert_eq!(merged.output, "json");
    }

    #[test]
    fn test_default_paths_exists() {
        let paths = Config::default_paths();
        assert!(!paths.is_empty());

        // Check that current directory paths are included
        assert!(
            paths
                .iter()
                .any(|p| p.to_string_lossy().contains("seoscope.json"))
        );
        assert!(
            paths
                .iter()
                .any(|p| p.to_string_lossy().contains("seoscope.toml"))
        );
        assert!(
            paths
                .iter()
                .any(|p| p.to_string_lossy().contains("seoscope.yaml"))
        );
    }

    #[test]
    #[serial]
    fn test_default_paths_with_xdg_config_home() {
        use std::env;

        let custom_config = "/custom/config/path";
        unsafe {
            env::set_var("XDG_CONFIG_HOME", custom_config);
        }

        let paths = Config::default_paths();

        assert!(
            paths
                .iter()
                .any(|p| p.to_string_lossy().contains("/custom/config/path/seoscope"))
        );

        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_from_default_paths_finds_current_dir_config() {
        use std::env;
        use tempfile::tempdir;

        let temp_dir = tempdir().unwrap();
        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(&temp_dir).unwrap();

        let config_path = temp_dir.path().join("seoscope.json");
        let json_content = r#"{"output": "json", "timeout": 10}"#;
        fs::write(&config_path, json_content).unwrap();

        let result = Config::from_default_paths();
        assert!(result.is_ok());
        let config = result.unwrap();
        assert!(config.is_some());

        let config = config.unwrap();
        assert_eq!(config.output, Some("json".to_string()));
        assert_eq!(config.timeout, Some(10));

        env::set_current_dir(original_dir).unwrap();
    }

    #[test]
    #[serial]
    fn test_from_default_paths_returns_none_when_no_config_exists() {
        use std::env;
        use tempfile::tempdir;

        let temp_dir = tempdir().unwrap();
        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(temp_dir.path()).unwrap();

        let temp_config_dir = tempdir().unwrap();
        unsafe {
            env::set_var("XDG_CONFIG_HOME", temp_config_dir.path());
        }

        let result = Config::from_default_paths();
        assert!(result.is_ok());
        assert!(result.unwrap().is_none());

        env::set_current_dir(&original_dir).ok();
        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }
}
