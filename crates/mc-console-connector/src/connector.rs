use crate::transport::{Dialer, RconTransport, TcpDialer};
use derive_more::Display;
use mc_console_config::{Backoff, ConsoleConfig, RetryConfig};
use mc_console_core::{CommandExecutor, ConsoleError, RecoveryStep, Result, TransportError};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Observable connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ConnectionStatus {
    #[display("disconnected")]
    Disconnected,
    #[display("connected")]
    Connected,
}

/// Bounded retry used when (re)establishing the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    backoff: Backoff,
}

impl RetryPolicy {
    /// At least one attempt is always made.
    pub fn new(max_attempts: u32, base_delay: Duration, backoff: Backoff) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            backoff,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        match self.backoff {
            Backoff::Linear => self.base_delay.saturating_mul(attempt),
            Backoff::Exponential => self
                .base_delay
                .saturating_mul(2u32.saturating_pow(attempt - 1)),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, config.base_delay(), config.backoff)
    }
}

/// Connection slot guarded by the execution lock.
struct Connection<T> {
    transport: Option<T>,
    shut_down: bool,
}

/// Owns the single connection to one remote console.
///
/// Every command runs under one exclusive lock held across the liveness
/// probe, the send, the receive and any recovery, so commands from
/// concurrent callers never interleave on the wire. Recovery works in two
/// tiers:
///
/// - before a command, a connection that fails the probe (or is missing) is
///   replaced through the bounded [`RetryPolicy`] loop;
/// - a command that fails in flight gets exactly one reconnect and one
///   re-send, after which the original failure is reported.
pub struct RconConnector<D: Dialer = TcpDialer> {
    address: String,
    password: String,
    connect_timeout: Duration,
    io_timeout: Duration,
    retry: RetryPolicy,
    probe_command: String,
    dialer: D,
    connection: Mutex<Connection<D::Transport>>,
}

impl RconConnector<TcpDialer> {
    /// Creates a TCP connector from the loaded configuration.
    ///
    /// No connection is opened until the first command.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use mc_console_config::ConsoleConfig;
    /// use mc_console_connector::RconConnector;
    ///
    /// let mut config = ConsoleConfig::default();
    /// config.rcon.password = Some("hunter2".to_string());
    /// let connector = RconConnector::from_config(&config)?;
    /// let players = connector.execute_command("list").await?;
    /// ```
    pub fn from_config(config: &ConsoleConfig) -> Result<Self> {
        Self::with_dialer(TcpDialer, config)
    }
}

impl<D: Dialer> RconConnector<D> {
    /// Creates a connector that opens its transports through `dialer`.
    pub fn with_dialer(dialer: D, config: &ConsoleConfig) -> Result<Self> {
        let password = config
            .rcon
            .password
            .clone()
            .filter(|password| !password.trim().is_empty())
            .ok_or_else(|| ConsoleError::validation("rcon.password", "a shared secret is required"))?;

        Ok(Self {
            address: config.rcon.address(),
            password,
            connect_timeout: config.rcon.connect_timeout(),
            io_timeout: config.rcon.io_timeout(),
            retry: RetryPolicy::from(&config.retry),
            probe_command: config.health.probe_command.clone(),
            dialer,
            connection: Mutex::new(Connection {
                transport: None,
                shut_down: false,
            }),
        })
    }

    /// `host:port` of the remote console.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether a transport is currently held. Waits for in-flight commands.
    pub async fn status(&self) -> ConnectionStatus {
        if self.connection.lock().await.transport.is_some() {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }

    /// Makes sure `connection` holds a transport that just answered the probe.
    async fn ensure_connected(&self, connection: &mut Connection<D::Transport>) -> Result<()> {
        if connection.shut_down {
            return Err(self.connect_error(RecoveryStep::Shutdown, TransportError::Closed));
        }

        if let Some(transport) = connection.transport.as_mut() {
            match with_deadline("probe", self.io_timeout, transport.execute(&self.probe_command)).await {
                Ok(_) => return Ok(()),
                Err(e) => warn!(target_addr = %self.address, error = %e, "Liveness probe failed, reconnecting"),
            }

            if let Some(stale) = connection.transport.take() {
                stale.close().await;
            }
        }

        let transport = self.connect_with_retry().await?;
        connection.transport = Some(transport);
        Ok(())
    }

    /// Dials until success or until the retry budget is spent.
    async fn connect_with_retry(&self) -> Result<D::Transport> {
        let max_attempts = self.retry.max_attempts();
        let mut attempt = 1;

        loop {
            match self.dial().await {
                Ok(transport) => {
                    info!(target_addr = %self.address, attempt, "Connected to remote console");
                    return Ok(transport);
                }
                Err(TransportError::AuthRejected) => {
                    error!(target_addr = %self.address, "Remote console rejected the shared secret");
                    return Err(self.connect_error(RecoveryStep::Dial, TransportError::AuthRejected));
                }
                Err(e) if attempt >= max_attempts => {
                    error!(target_addr = %self.address, attempts = attempt, error = %e, "Giving up on remote console");
                    return Err(self.connect_error(
                        RecoveryStep::RetriesExhausted { attempts: attempt },
                        e,
                    ));
                }
                Err(e) => {
                    let delay = self.retry.delay_after(attempt);
                    warn!(target_addr = %self.address, attempt, ?delay, error = %e, "Connection attempt failed");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn dial(&self) -> std::result::Result<D::Transport, TransportError> {
        with_deadline(
            "connect",
            self.connect_timeout,
            self.dialer.dial(&self.address, &self.password),
        )
        .await
    }

    #[tracing::instrument(skip(self), fields(target_addr = %self.address))]
    async fn execute(&self, command: &str) -> Result<String> {
        let mut connection = self.connection.lock().await;
        self.ensure_connected(&mut connection).await?;

        let transport = connection
            .transport
            .as_mut()
            .ok_or_else(|| self.connect_error(RecoveryStep::Dial, TransportError::Closed))?;

        debug!("Sending command");
        let original = match with_deadline("command", self.io_timeout, transport.execute(command)).await {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        warn!(error = %original, "Command failed, reconnecting once");
        if let Some(stale) = connection.transport.take() {
            stale.close().await;
        }

        let mut fresh = match self.dial().await {
            Ok(transport) => transport,
            Err(e) => {
                error!(error = %e, "Reconnect after command failure failed");
                return Err(self.command_error(command, RecoveryStep::Reconnect, original, e));
            }
        };

        match with_deadline("command", self.io_timeout, fresh.execute(command)).await {
            Ok(response) => {
                info!("Command succeeded on a fresh connection");
                connection.transport = Some(fresh);
                Ok(response)
            }
            Err(e) => {
                error!(error = %e, "Command failed again after reconnecting");
                fresh.close().await;
                Err(self.command_error(command, RecoveryStep::Retry, original, e))
            }
        }
    }

    async fn shutdown(&self) -> Result<()> {
        let mut connection = self.connection.lock().await;
        connection.shut_down = true;

        if let Some(transport) = connection.transport.take() {
            transport.close().await;
            info!(target_addr = %self.address, "Closed remote console connection");
        }

        Ok(())
    }

    fn connect_error(&self, step: RecoveryStep, source: TransportError) -> ConsoleError {
        ConsoleError::Connect {
            target: self.address.clone(),
            step,
            source,
        }
    }

    fn command_error(
        &self,
        command: &str,
        step: RecoveryStep,
        original: TransportError,
        followup: TransportError,
    ) -> ConsoleError {
        ConsoleError::Command {
            target: self.address.clone(),
            command: command.to_string(),
            step,
            source: original,
            followup: followup.to_string(),
        }
    }
}

impl<D: Dialer> CommandExecutor for RconConnector<D> {
    fn execute_command(&self, command: &str) -> impl Future<Output = Result<String>> + Send {
        self.execute(command)
    }

    fn close(&self) -> impl Future<Output = Result<()>> + Send {
        self.shutdown()
    }
}

impl<D: Dialer> fmt::Debug for RconConnector<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RconConnector")
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .field("io_timeout", &self.io_timeout)
            .field("retry", &self.retry)
            .field("probe_command", &self.probe_command)
            .finish_non_exhaustive()
    }
}

/// Bounds `operation` by `after`; expiry is reported like any transport fault.
async fn with_deadline<T, F>(
    operation: &'static str,
    after: Duration,
    future: F,
) -> std::result::Result<T, TransportError>
where
    F: Future<Output = std::result::Result<T, TransportError>>,
{
    tokio::time::timeout(after, future)
        .await
        .map_err(|_| TransportError::Timeout { operation, after })?
}
