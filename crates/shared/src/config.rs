//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Report input/output configuration.
    #[serde(default)]
    pub reports: ReportsConfig,
    /// Background job configuration.
    #[serde(default)]
    pub jobs: JobsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Where ledger files are read from and where reports are written.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// Directory holding the ledger-entry files.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// Directory receiving one report file per scope.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Number of files read per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Extension (without the dot) a file needs to be treated as ledger input.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            batch_size: default_batch_size(),
            extension: default_extension(),
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("tmp")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_batch_size() -> usize {
    5
}

fn default_extension() -> String {
    "csv".to_string()
}

/// Background job configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JobsConfig {
    /// Upper bound for a single report run in seconds. `0` disables the limit.
    #[serde(default = "default_unit_timeout")]
    pub unit_timeout_secs: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            unit_timeout_secs: default_unit_timeout(),
        }
    }
}

fn default_unit_timeout() -> u64 {
    300 // 5 minutes
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TALLY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.reports.input_dir, PathBuf::from("tmp"));
        assert_eq!(config.reports.output_dir, PathBuf::from("out"));
        assert_eq!(config.reports.batch_size, 5);
        assert_eq!(config.reports.extension, "csv");
        assert_eq!(config.jobs.unit_timeout_secs, 300);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "TALLY__REPORTS__BATCH_SIZE",
                "TALLY__SERVER__PORT",
                "RUN_MODE",
            ],
            || {
                let config = AppConfig::load().expect("empty configuration is valid");
                assert_eq!(config.reports.batch_size, 5);
                assert_eq!(config.server.port, 8080);
            },
        );
    }

    #[test]
    fn test_load_env_overrides() {
        temp_env::with_vars(
            [
                ("TALLY__REPORTS__BATCH_SIZE", Some("12")),
                ("TALLY__REPORTS__INPUT_DIR", Some("/var/ledger")),
                ("TALLY__JOBS__UNIT_TIMEOUT_SECS", Some("0")),
            ],
            || {
                let config = AppConfig::load().expect("should load");
                assert_eq!(config.reports.batch_size, 12);
                assert_eq!(config.reports.input_dir, PathBuf::from("/var/ledger"));
                assert_eq!(config.jobs.unit_timeout_secs, 0);
            },
        );
    }
}
