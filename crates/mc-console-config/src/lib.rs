//! Configuration for the Minecraft remote console client.
//!
//! Settings are layered in this order, later layers winning:
//! built-in defaults, `console.toml` in the configuration directory, then
//! `MC_CONSOLE__<SECTION>__<KEY>` environment variables. The loaded
//! configuration is validated once at startup; a missing shared secret is a
//! configuration error and never reaches the connection layer.

pub mod error;
pub mod logging;
pub mod macros;
pub mod prelude;
pub mod rcon;

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub use error::*;
pub use logging::{LogFileNameFormat, LogLevel, LoggingConfig};
pub use rcon::{Backoff, HealthCheckConfig, MAX_PASSWORD_LEN, RconConnection, RetryConfig};

/// File name of the configuration inside the configuration directory.
pub const CONFIG_FILE_NAME: &str = "console.toml";

/// Prefix of environment variables overriding file settings.
pub const ENV_PREFIX: &str = "MC_CONSOLE";

/// Project directories for mc-console, if the platform provides them.
pub static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("dev", "mc-console", "mc-console"));

config_struct! {
    /// Complete console configuration.
    pub struct ConsoleConfig {
        pub rcon: RconConnection = RconConnection::default(),
        pub retry: RetryConfig = RetryConfig::default(),
        pub health: HealthCheckConfig = HealthCheckConfig::default(),
        pub logging: LoggingConfig = LoggingConfig::default(),
    }
}

config_accessors!(ConsoleConfig,
    rcon: RconConnection,
    retry: RetryConfig,
    health: HealthCheckConfig,
    logging: LoggingConfig
);

impl ConsoleConfig {
    /// Loads configuration from directory, writing a default file when none exists.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_file = config_dir.join(CONFIG_FILE_NAME);

        if !config_file.exists() {
            Self::default().save(config_dir)?;
        }

        let layered = config::Config::builder()
            .set_default("rcon", RconConnection::default())?
            .set_default("retry", RetryConfig::default())?
            .set_default("health", HealthCheckConfig::default())?
            .set_default("logging", LoggingConfig::default())?
            .add_source(
                config::File::from(config_file.as_path())
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?;

        layered.try_deserialize().map_err(|e| {
            ConfigError::serialization_error(
                "TOML",
                format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e),
                Some(Box::new(e)),
            )
        })
    }

    /// Saves configuration to directory.
    pub fn save(&self, config_dir: &Path) -> Result<()> {
        let config_file = config_dir.join(CONFIG_FILE_NAME);

        let content = toml::to_string_pretty(self).map_err(|e| {
            ConfigError::serialization_error(
                "TOML",
                format!("Failed to serialize console config: {}", e),
                Some(Box::new(e)),
            )
        })?;

        std::fs::write(&config_file, content).map_err(|e| {
            ConfigError::io_error(
                "write console config",
                format!("Failed to write {}: {}", CONFIG_FILE_NAME, e),
                Some(e),
            )
        })?;

        Ok(())
    }

    /// Startup validation. Every problem found is reported in one error.
    pub fn validate(&self) -> Result<()> {
        let mut problems: Vec<(&str, String)> = Vec::new();

        if self.rcon.host.trim().is_empty() {
            problems.push(("rcon.host", "must not be empty".to_string()));
        }
        if self.rcon.port == 0 {
            problems.push(("rcon.port", "must be between 1 and 65535".to_string()));
        }
        match self.rcon.password.as_deref() {
            None => problems.push(("rcon.password", "is required".to_string())),
            Some(password) if password.trim().is_empty() => {
                problems.push(("rcon.password", "must not be empty".to_string()))
            }
            Some(password) if password.len() > MAX_PASSWORD_LEN => problems.push((
                "rcon.password",
                format!("must be at most {} bytes", MAX_PASSWORD_LEN),
            )),
            Some(_) => {}
        }
        if self.rcon.connect_timeout_ms == 0 {
            problems.push(("rcon.connect_timeout_ms", "must be positive".to_string()));
        }
        if self.rcon.io_timeout_ms == 0 {
            problems.push(("rcon.io_timeout_ms", "must be positive".to_string()));
        }
        if self.retry.max_attempts == 0 {
            problems.push(("retry.max_attempts", "must be at least 1".to_string()));
        }
        if self.health.probe_command.trim().is_empty() {
            problems.push(("health.probe_command", "must not be empty".to_string()));
        }

        if problems.is_empty() {
            return Ok(());
        }

        let fields = problems.iter().map(|(field, _)| *field).collect::<Vec<_>>();
        let reasons = problems
            .iter()
            .map(|(field, reason)| format!("{} {}", field, reason))
            .collect::<Vec<_>>();
        Err(ConfigError::invalid_config(
            fields.join(", "),
            reasons.join("; "),
            None,
        ))
    }
}

/// Owns the loaded configuration and the directory it came from.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: ConsoleConfig,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a configuration manager using the platform configuration directory.
    pub fn new() -> Result<Self> {
        Self::from_dir(None)
    }

    /// Creates a configuration manager from a specific directory.
    pub fn from_dir(config_dir: Option<&Path>) -> Result<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir.to_path_buf(),
            None => PROJECT_DIRS
                .as_ref()
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    ConfigError::invalid_config(
                        "config_dir",
                        "no platform configuration directory; pass one explicitly",
                        None,
                    )
                })?,
        };

        std::fs::create_dir_all(&config_dir).map_err(|e| {
            ConfigError::io_error(
                "create config directory",
                format!("Failed to create config directory: {}", e),
                Some(e),
            )
        })?;

        let config = ConsoleConfig::load(&config_dir)?;

        Ok(Self { config, config_dir })
    }

    /// Gets a reference to the loaded configuration.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Gets a mutable reference to the loaded configuration.
    pub fn config_mut(&mut self) -> &mut ConsoleConfig {
        &mut self.config
    }

    /// Gets the configuration directory path.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Directory log files are written to.
    pub fn log_dir(&self) -> PathBuf {
        match &self.config.logging.log_dir {
            Some(dir) => PathBuf::from(dir),
            None => self.config_dir.join("logs"),
        }
    }

}
