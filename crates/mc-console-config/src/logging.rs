//! Logging options consumed by `mc_console_core::logging`.

use crate::{config_enum, config_struct};

config_enum! {
    /// Minimum level written by the log layers when `RUST_LOG` is unset.
    pub enum LogLevel {
        Trace,
        Debug,
        Info,
        Warn,
        Error,
    }
    default = Info
}

impl LogLevel {
    /// The directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

config_enum! {
    /// How the rolling log file is named.
    pub enum LogFileNameFormat {
        Date,
        Timestamp,
        DateTime,
        None,
    }
    default = DateTime
}

config_struct! {
    /// Logging section of `console.toml`.
    pub struct LoggingConfig {
        pub log_level: LogLevel = LogLevel::default(),
        pub log_file: LogFileNameFormat = LogFileNameFormat::default(),
        /// whether to mirror log events to stderr in addition to file
        pub log_to_stderr: bool = false,
        /// Directory for log files; `<config dir>/logs` when unset
        pub log_dir: Option<String> = None,
    }
}
