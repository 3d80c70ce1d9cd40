//! Configuration loading.
//!
//! Sources, later ones overriding earlier:
//! 1. Built-in defaults
//! 2. Config file (~/.config/watch-history/config.toml)
//! 3. CLI-specified config file (optional)
//! 4. Environment variables (WATCH_*, nested keys joined with `__`)
//! 5. CLI flags, applied by the caller

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use watch_extract::ExtractionRules;
use watch_topics::TopicsConfig;

use crate::error::HistoryError;
use crate::export::OutputFormat;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Table export format
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Topic model settings
    #[serde(default)]
    pub topics: TopicsConfig,

    /// Takeout markup rules
    #[serde(default)]
    pub extraction: ExtractionRules,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output_format: OutputFormat::default(),
            topics: TopicsConfig::default(),
            extraction: ExtractionRules::default(),
        }
    }
}

/// Directory holding the default config file.
pub fn config_dir() -> PathBuf {
    ProjectDirs::from("", "", "watch-history")
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Settings {
    /// Load settings with layered precedence (see module docs).
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, HistoryError> {
        Self::load_layers(&config_dir(), cli_config_path, None)
    }

    /// Load with an explicit default config directory and, optionally, a
    /// fixed set of environment variables instead of the process environment.
    fn load_layers(
        config_dir: &Path,
        cli_config_path: Option<&str>,
        env_vars: Option<Map<String, String>>,
    ) -> Result<Self, HistoryError> {
        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("log_level", default_log_level())
            .map_err(|e| HistoryError::Config(e.to_string()))?
            .set_default("output_format", "csv")
            .map_err(|e| HistoryError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // WATCH_LOG_LEVEL, WATCH_OUTPUT_FORMAT, WATCH_TOPICS__NUM_TOPICS, ...
        builder = builder.add_source(
            Environment::with_prefix("WATCH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env_vars),
        );

        let settings: Settings = builder
            .build()
            .map_err(|e| HistoryError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| HistoryError::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate nested settings.
    pub fn validate(&self) -> Result<(), HistoryError> {
        self.topics
            .validate()
            .map_err(|e| HistoryError::Config(format!("topics: {}", e)))?;
        self.extraction
            .validate()
            .map_err(|e| HistoryError::Config(format!("extraction: {}", e)))?;
        Ok(())
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, HistoryError> {
        toml::to_string_pretty(self).map_err(|e| HistoryError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.output_format, OutputFormat::Csv);
        assert_eq!(settings.topics.num_topics, 20);
        assert_eq!(settings.extraction, ExtractionRules::default());
        assert!(settings.validate().is_ok());
    }

    /// Load against an empty config dir and the given variables only.
    fn load_isolated(
        cli_config_path: Option<&Path>,
        env: &[(&str, &str)],
    ) -> Result<Settings, HistoryError> {
        let dir = tempfile::tempdir().unwrap();
        let vars = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let cli = cli_config_path.map(|p| p.to_string_lossy().into_owned());
        Settings::load_layers(dir.path(), cli.as_deref(), Some(vars))
    }

    #[test]
    fn test_load_with_defaults() {
        let settings = load_isolated(None, &[]).unwrap();
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.output_format, OutputFormat::Csv);
        assert_eq!(settings.topics.seed, 42);
        assert_eq!(settings.topics.num_topics, 20);
    }

    #[test]
    fn test_default_config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "log_level = \"warn\"\n").unwrap();

        let settings = Settings::load_layers(dir.path(), None, Some(Map::new())).unwrap();
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "log_level = \"debug\"\n[topics]\nnum_topics = 7\n").unwrap();

        let settings = load_isolated(
            Some(&path),
            &[("WATCH_LOG_LEVEL", "trace"), ("WATCH_TOPICS__NUM_TOPICS", "3")],
        )
        .unwrap();
        assert_eq!(settings.log_level, "trace");
        assert_eq!(settings.topics.num_topics, 3);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
log_level = "debug"
output_format = "json"

[topics]
num_topics = 7
"#,
        )
        .unwrap();

        let settings = load_isolated(Some(&path), &[]).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.output_format, OutputFormat::Json);
        assert_eq!(settings.topics.num_topics, 7);
        assert_eq!(settings.topics.top_words, 15);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(load_isolated(Some(&path), &[]).is_err());
    }

    #[test]
    fn test_load_rejects_invalid_topics() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[topics]\nnum_topics = 0\n").unwrap();

        let result = load_isolated(Some(&path), &[]);
        assert!(matches!(result, Err(HistoryError::Config(_))));
    }

    #[test]
    fn test_to_toml() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("log_level = \"info\""));
        assert!(toml.contains("output_format = \"csv\""));
        assert!(toml.contains("[topics]"));
        assert!(toml.contains("[extraction]"));
    }
}
