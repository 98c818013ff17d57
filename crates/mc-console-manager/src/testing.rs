use mc_console_core::{CommandExecutor, ConsoleError, RecoveryStep, Result, TransportError};
use std::collections::HashMap;
use std::future::{Future, ready};
use std::sync::Mutex;

/// Executor answering from a fixed script and recording every command.
///
/// Unscripted commands fail like a connection that could not be recovered.
#[derive(Default)]
pub(crate) struct RecordingExecutor {
    responses: HashMap<String, Option<String>>,
    sent: Mutex<Vec<String>>,
}

impl RecordingExecutor {
    pub(crate) fn respond(mut self, command: &str, response: &str) -> Self {
        self.responses
            .insert(command.to_string(), Some(response.to_string()));
        self
    }

    pub(crate) fn fail(mut self, command: &str) -> Self {
        self.responses.insert(command.to_string(), None);
        self
    }

    pub(crate) fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute_command(&self, command: &str) -> impl Future<Output = Result<String>> + Send {
        self.sent.lock().unwrap().push(command.to_string());

        let result = match self.responses.get(command) {
            Some(Some(response)) => Ok(response.clone()),
            _ => Err(ConsoleError::Command {
                target: "fake:25575".to_string(),
                command: command.to_string(),
                step: RecoveryStep::Retry,
                source: TransportError::Closed,
                followup: "connection closed by peer".to_string(),
            }),
        };
        ready(result)
    }

    fn close(&self) -> impl Future<Output = Result<()>> + Send {
        ready(Ok(()))
    }
}
