//! Prelude module for configuration management.
//!
//! Import with `use mc_console_config::prelude::*;` to get commonly used config types.

// Core types
pub use crate::{CONFIG_FILE_NAME, ConfigManager, ConsoleConfig, ENV_PREFIX, PROJECT_DIRS};

// Error handling
pub use crate::error::{ConfigError, Result};

// Sections
pub use crate::logging::{LogFileNameFormat, LogLevel, LoggingConfig};
pub use crate::rcon::{Backoff, HealthCheckConfig, RconConnection, RetryConfig};

// Configuration macros
pub use crate::{config_accessors, config_enum, config_struct};
