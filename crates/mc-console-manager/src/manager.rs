use crate::{CommandService, GametimeService, PlayerService, WhitelistService, WorldService};
use mc_console_config::ConsoleConfig;
use mc_console_connector::RconConnector;
use mc_console_core::{CommandExecutor, Result};
use std::sync::Arc;
use tracing::debug;

/// High-level entry point to one server's console.
///
/// Wraps a shared [`CommandExecutor`] and hands out the typed services built
/// on it. Every service shares the same connection, so commands issued
/// through different services are still serialized by the executor.
pub struct ConsoleManager<E = RconConnector>
where
    E: CommandExecutor,
{
    executor: Arc<E>,
}

impl ConsoleManager<RconConnector> {
    /// Creates a manager talking to the server described by `config`.
    ///
    /// No connection is opened until the first command.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self> {
        let connector = RconConnector::from_config(config)?;
        debug!(target_addr = connector.address(), "Created ConsoleManager from config");
        Ok(Self::new(connector))
    }
}

impl<E: CommandExecutor> ConsoleManager<E> {
    /// Creates a new manager with the given executor.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use mc_console_manager::ConsoleManager;
    /// use mc_console_connector::RconConnector;
    ///
    /// let connector = RconConnector::from_config(&config)?;
    /// let manager = ConsoleManager::new(connector);
    /// let stats = manager.world().stats().await?;
    /// ```
    pub fn new(executor: E) -> Self {
        Self::from_shared(Arc::new(executor))
    }

    pub fn from_shared(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &Arc<E> {
        &self.executor
    }

    pub fn commands(&self) -> CommandService<E> {
        CommandService::new(Arc::clone(&self.executor))
    }

    pub fn players(&self) -> PlayerService<E> {
        PlayerService::new(Arc::clone(&self.executor))
    }

    pub fn whitelist(&self) -> WhitelistService<E> {
        WhitelistService::new(Arc::clone(&self.executor))
    }

    pub fn time(&self) -> GametimeService<E> {
        GametimeService::new(Arc::clone(&self.executor))
    }

    pub fn world(&self) -> WorldService<E> {
        WorldService::new(Arc::clone(&self.executor))
    }

    /// Closes the underlying connection. Safe to call more than once.
    pub async fn close(&self) -> Result<()> {
        self.executor.close().await
    }
}
