//! Remote console endpoint, timeout and recovery settings.

use crate::{config_enum, config_struct};
use std::time::Duration;

/// Largest secret that fits in a single authentication packet.
pub const MAX_PASSWORD_LEN: usize = 1446;

config_struct! {
    /// Where the remote console listens and how to authenticate against it.
    pub struct RconConnection {
        /// Remote host name or address
        pub host: String = "localhost".to_string(),
        /// Remote console port
        pub port: u16 = 25575,
        /// Shared secret; required, prefer `MC_CONSOLE__RCON__PASSWORD`
        pub password: Option<String> = None,
        /// Deadline for dial plus authentication, in milliseconds
        pub connect_timeout_ms: u64 = 5_000,
        /// Deadline for one command round-trip, in milliseconds
        pub io_timeout_ms: u64 = 10_000,
    }
}

impl RconConnection {
    /// `host:port` as used for dialing and in error context.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }
}

config_enum! {
    /// Growth of the delay between reconnect attempts.
    pub enum Backoff {
        /// base, 2 x base, 3 x base, ...
        Linear,
        /// base, 2 x base, 4 x base, ...
        Exponential,
    }
    default = Linear
}

config_struct! {
    /// Bounded retry applied when (re)establishing the connection.
    pub struct RetryConfig {
        /// Total dial attempts before giving up
        pub max_attempts: u32 = 3,
        /// Delay unit between attempts, in milliseconds
        pub base_delay_ms: u64 = 1_000,
        pub backoff: Backoff = Backoff::default(),
    }
}

impl RetryConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

config_struct! {
    /// Liveness probing of an already established connection.
    pub struct HealthCheckConfig {
        /// Cheap, side-effect free command sent before every execution
        pub probe_command: String = "list".to_string(),
    }
}
