use chrono::Local;
use mc_console_config::{LogFileNameFormat, LoggingConfig};
use std::path::Path;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Failures while installing the global subscriber.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    LogDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Init(#[from] TryInitError),
}

fn log_file_name(format: &LogFileNameFormat) -> String {
    match format {
        LogFileNameFormat::Date => format!("mc-console-{}.log", Local::now().format("%Y-%m-%d")),
        LogFileNameFormat::Timestamp => format!("mc-console-{}.log", Local::now().timestamp()),
        LogFileNameFormat::DateTime => {
            format!("mc-console-{}.log", Local::now().format("%Y-%m-%d_%H-%M-%S"))
        }
        LogFileNameFormat::None => "mc-console.log".to_string(),
    }
}

/// `RUST_LOG` when set, otherwise the configured level.
fn tracing_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_directive()))
}

/// Initializes the global tracing subscriber.
///
/// Always writes compact, non-blocking output to a daily rolling file in
/// `log_dir`; when `log_to_stderr` is set the same events are mirrored to
/// stderr, leaving stdout to command output. The returned guards must be
/// kept alive for as long as logging is needed, dropping them flushes and
/// stops the writers.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed.
pub fn tracing(log_dir: &Path, config: &LoggingConfig) -> Result<Vec<WorkerGuard>, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggingError::LogDir {
        path: log_dir.display().to_string(),
        source,
    })?;

    let file_appender = rolling::daily(log_dir, log_file_name(&config.log_file));
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let mut guards = vec![file_guard];

    let file_layer = layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_file(true)
        .with_thread_names(true)
        .with_line_number(true)
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE)
        .compact();

    let stderr_layer = if config.log_to_stderr {
        let (stderr_writer, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
        guards.push(stderr_guard);

        Some(
            layer()
                .with_writer(stderr_writer)
                .with_file(false)
                .with_thread_names(true)
                .with_line_number(true)
                .with_level(true)
                .with_span_events(FmtSpan::CLOSE)
                .compact(),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(tracing_env_filter(config))
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(guards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_names() {
        assert_eq!(log_file_name(&LogFileNameFormat::None), "mc-console.log");

        let dated = log_file_name(&LogFileNameFormat::Date);
        assert!(dated.starts_with("mc-console-"));
        assert!(dated.ends_with(".log"));
    }
}
