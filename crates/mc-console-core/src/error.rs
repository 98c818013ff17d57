use derive_more::Display;
use std::time::Duration;
use thiserror::Error;

/// The recovery step that was under way when a connection or command failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RecoveryStep {
    /// First connection attempt
    #[display("dial")]
    Dial,
    /// Bounded reconnect loop ran out of attempts
    #[display("reconnect after {attempts} attempt(s)")]
    RetriesExhausted { attempts: u32 },
    /// Single reconnect after a failed command
    #[display("one-shot reconnect")]
    Reconnect,
    /// Single re-send of a command on a fresh connection
    #[display("command retry")]
    Retry,
    /// The connection manager was closed
    #[display("shutdown")]
    Shutdown,
}

/// Faults reported by the transport underneath the connection manager.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("I/O error during {operation}: {source}")]
    Io {
        operation: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("authentication rejected by server")]
    AuthRejected,

    #[error("malformed packet: {reason}")]
    Frame { reason: String },

    #[error("connection closed by peer")]
    Closed,
}

impl TransportError {
    pub fn io(operation: &'static str, source: std::io::Error) -> Self {
        Self::Io { operation, source }
    }

    pub fn frame(reason: impl Into<String>) -> Self {
        Self::Frame {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            operation: "stream",
            source,
        }
    }
}

/// Errors surfaced by the console core.
///
/// `Connect` and `Command` are only returned after the connection manager's
/// recovery is exhausted. `Protocol` is never retried. `Validation` is raised
/// before any network I/O happens.
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Connection to {target} failed during {step}: {source}")]
    Connect {
        target: String,
        step: RecoveryStep,
        #[source]
        source: TransportError,
    },

    /// `source` is the original failure; `followup` describes why the
    /// recovery step failed as well.
    #[error("Command `{command}` on {target} failed: {source}; {step} failed: {followup}")]
    Command {
        target: String,
        command: String,
        step: RecoveryStep,
        #[source]
        source: TransportError,
        followup: String,
    },

    #[error("Unexpected {decoder} response ({reason}): {raw:?}")]
    Protocol {
        decoder: &'static str,
        reason: String,
        raw: String,
    },

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

impl ConsoleError {
    pub fn protocol(decoder: &'static str, reason: impl Into<String>, raw: &str) -> Self {
        Self::Protocol {
            decoder,
            reason: reason.into(),
            raw: raw.to_string(),
        }
    }

    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias for operations that can fail with a [`ConsoleError`].
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_command_error_keeps_original_failure_as_source() {
        let err = ConsoleError::Command {
            target: "localhost:25575".to_string(),
            command: "list".to_string(),
            step: RecoveryStep::Retry,
            source: TransportError::Closed,
            followup: "connection closed by peer".to_string(),
        };

        let source = err.source().expect("command error has a source");
        assert_eq!(source.to_string(), "connection closed by peer");
        assert_eq!(
            err.to_string(),
            "Command `list` on localhost:25575 failed: connection closed by peer; command retry failed: connection closed by peer"
        );
    }

    #[test]
    fn test_recovery_step_display() {
        assert_eq!(
            RecoveryStep::RetriesExhausted { attempts: 3 }.to_string(),
            "reconnect after 3 attempt(s)"
        );
        assert_eq!(RecoveryStep::Reconnect.to_string(), "one-shot reconnect");
    }

    #[test]
    fn test_protocol_error_includes_raw_text() {
        let err = ConsoleError::protocol("time", "missing prefix", "Unknown command");
        assert!(err.to_string().contains("\"Unknown command\""));
    }
}
