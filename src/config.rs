use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".symdex";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub loader: LoaderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from `<root>/.symdex/config.toml`, falling back
    /// to defaults when the file does not exist.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_DIR).join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Package loader configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Module import path of the workspace root. When unset, the loader
    /// reads the `module` directive from `go.mod`, then falls back to the
    /// root directory name.
    #[serde(default)]
    pub module_path: Option<String>,

    /// Directory names excluded from discovery (in addition to .gitignore)
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            module_path: None,
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

fn default_ignore_patterns() -> Vec<String> {
    vec!["testdata".to_string(), ".git".to_string()]
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable file logging under `directory`
    #[serde(default)]
    pub enabled: bool,

    /// Mirror logs to stderr
    #[serde(default = "default_true")]
    pub stderr: bool,

    /// File log level: trace, debug, info, warn, error
    #[serde(default = "default_level")]
    pub level: String,

    /// Log directory, relative to the workspace root unless absolute
    #[serde(default = "default_log_dir")]
    pub directory: PathBuf,

    /// Rolling log file prefix
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Rotation strategy: minutely, hourly, daily, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: default_true(),
            level: default_level(),
            directory: default_log_dir(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(".symdex/logs")
}

fn default_file_prefix() -> String {
    "symdex.log".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
