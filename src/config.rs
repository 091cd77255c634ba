//! Application configuration
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/urlsnip/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::ops::Range;
use std::path::PathBuf;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commented template written on first run so users can discover options
const DEFAULT_CONFIG: &str = r#"# urlsnip configuration
# Values here are overridden by URLSNIP_* environment variables.

# Color theme: "dark", "light", or "terminal"
theme = "dark"

# Origin the generated short codes are composed into
short_origin = "https://short.url"

# Simulated backend latency window in milliseconds (uniform, [min, max))
delay_min_ms = 500
delay_max_ms = 1500

# How long the per-slot "copied" indicator stays on, in milliseconds
copy_flash_ms = 2000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Write logs to rotating daily files in addition to the in-app log panel
file_enabled = false
# file_dir = "/path/to/logs"
"#;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Theme name: "dark", "light", "terminal"
    pub theme: String,

    /// Origin the short code is composed into
    pub short_origin: String,

    /// Lower bound of the simulated latency window, milliseconds
    pub delay_min_ms: u64,

    /// Upper bound (exclusive) of the simulated latency window, milliseconds
    pub delay_max_ms: u64,

    /// Duration of the copied indicator, milliseconds
    pub copy_flash_ms: u64,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default log level when RUST_LOG is not set
    pub level: String,

    /// Whether to write logs to rotating files
    pub file_enabled: bool,

    /// Directory for log files
    pub file_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            short_origin: crate::shorten::DEFAULT_ORIGIN.to_string(),
            delay_min_ms: crate::shorten::DEFAULT_DELAY_MS.start,
            delay_max_ms: crate::shorten::DEFAULT_DELAY_MS.end,
            copy_flash_ms: 2000,
            logging: LoggingConfig {
                level: "info".to_string(),
                file_enabled: false,
                file_dir: default_log_dir(),
            },
        }
    }
}

/// On-disk representation: every field optional so partial files work
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    theme: Option<String>,
    short_origin: Option<String>,
    delay_min_ms: Option<u64>,
    delay_max_ms: Option<u64>,
    copy_flash_ms: Option<u64>,
    logging: Option<FileLogging>,
}

#[derive(Debug, Default, Deserialize)]
struct FileLogging {
    level: Option<String>,
    file_enabled: Option<bool>,
    file_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration: env vars > config file > defaults
    pub fn load() -> Self {
        let mut config = Self::default();
        config.apply_file(Self::read_file().unwrap_or_default());
        config.apply_env();
        config
    }

    /// Path to the config file, if a config directory can be determined
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("urlsnip").join("config.toml"))
    }

    /// Write the commented template if no config file exists yet
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };
        if path.exists() {
            return;
        }
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("could not create config directory: {e}");
                return;
            }
        }
        if let Err(e) = std::fs::write(&path, DEFAULT_CONFIG) {
            tracing::warn!("could not write config template: {e}");
        }
    }

    /// Overwrite the config file with the default template
    pub fn reset_config_file() -> anyhow::Result<PathBuf> {
        use anyhow::Context;
        let path = Self::config_path().context("could not determine config path")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("could not create config directory")?;
        }
        std::fs::write(&path, DEFAULT_CONFIG).context("could not write config file")?;
        Ok(path)
    }

    fn read_file() -> Option<FileConfig> {
        let path = Self::config_path()?;
        let contents = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&contents) {
            Ok(file) => Some(file),
            Err(e) => {
                // Malformed file falls back to defaults rather than aborting
                eprintln!("Warning: ignoring malformed config file: {e}");
                None
            }
        }
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(theme) = file.theme {
            self.theme = theme;
        }
        if let Some(origin) = file.short_origin {
            self.short_origin = origin;
        }
        if let Some(min) = file.delay_min_ms {
            self.delay_min_ms = min;
        }
        if let Some(max) = file.delay_max_ms {
            self.delay_max_ms = max;
        }
        if let Some(flash) = file.copy_flash_ms {
            self.copy_flash_ms = flash;
        }
        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(enabled) = logging.file_enabled {
                self.logging.file_enabled = enabled;
            }
            if let Some(dir) = logging.file_dir {
                self.logging.file_dir = dir;
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(theme) = std::env::var("URLSNIP_THEME") {
            self.theme = theme;
        }
        if let Ok(origin) = std::env::var("URLSNIP_ORIGIN") {
            self.short_origin = origin;
        }
        if let Some(min) = env_u64("URLSNIP_DELAY_MIN_MS") {
            self.delay_min_ms = min;
        }
        if let Some(max) = env_u64("URLSNIP_DELAY_MAX_MS") {
            self.delay_max_ms = max;
        }
        if let Some(flash) = env_u64("URLSNIP_COPY_FLASH_MS") {
            self.copy_flash_ms = flash;
        }
        if let Ok(level) = std::env::var("URLSNIP_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(enabled) = std::env::var("URLSNIP_LOG_FILE") {
            self.logging.file_enabled = enabled == "1" || enabled.eq_ignore_ascii_case("true");
        }
    }

    /// The simulated latency window as a half-open range.
    ///
    /// Falls back to the built-in window when the configured bounds are
    /// empty or inverted.
    pub fn delay_range(&self) -> Range<u64> {
        if self.delay_min_ms < self.delay_max_ms {
            self.delay_min_ms..self.delay_max_ms
        } else {
            crate::shorten::DEFAULT_DELAY_MS
        }
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok()?.parse().ok()
}

fn default_log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("urlsnip")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_contract() {
        let config = Config::default();
        assert_eq!(config.short_origin, "https://short.url");
        assert_eq!(config.delay_range(), 500..1500);
        assert_eq!(config.copy_flash_ms, 2000);
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn inverted_delay_bounds_fall_back() {
        let config = Config {
            delay_min_ms: 2000,
            delay_max_ms: 100,
            ..Config::default()
        };
        assert_eq!(config.delay_range(), 500..1500);
    }

    #[test]
    fn template_parses_and_round_trips_defaults() {
        let file: FileConfig = toml::from_str(DEFAULT_CONFIG).expect("template must parse");
        let mut config = Config::default();
        config.apply_file(file);
        assert_eq!(config.theme, "dark");
        assert_eq!(config.delay_range(), 500..1500);
        assert!(!config.logging.file_enabled);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let file: FileConfig = toml::from_str("theme = \"light\"").unwrap();
        let mut config = Config::default();
        config.apply_file(file);
        assert_eq!(config.theme, "light");
        assert_eq!(config.short_origin, "https://short.url");
    }
}
