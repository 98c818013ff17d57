use crate::args;
use mc_console_core::{CommandExecutor, Result};
use std::sync::Arc;
use tracing::debug;

/// Sends operator-typed commands verbatim.
pub struct CommandService<E> {
    executor: Arc<E>,
}

impl<E: CommandExecutor> CommandService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// Trims `command` and returns the server's raw answer.
    ///
    /// Blank input is rejected without touching the connection.
    pub async fn execute(&self, command: &str) -> Result<String> {
        let command = args::non_empty("command", command)?;
        debug!(command, "Executing raw command");
        self.executor.execute_command(command).await
    }
}
