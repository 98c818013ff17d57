use crate::Result;
use std::future::Future;
use std::sync::Arc;

/// The single operation the console core offers its collaborators.
///
/// Implementations guarantee that `execute_command` either returns the raw
/// text the server answered with, or a classified [`crate::ConsoleError`].
/// Commands are sent verbatim; validating their arguments is the caller's job.
pub trait CommandExecutor: Send + Sync {
    /// Send one command and return the server's raw response text
    fn execute_command(&self, command: &str) -> impl Future<Output = Result<String>> + Send;

    /// Release the connection. Calling this more than once is a no-op.
    fn close(&self) -> impl Future<Output = Result<()>> + Send;
}

impl<E> CommandExecutor for Arc<E>
where
    E: CommandExecutor,
{
    fn execute_command(&self, command: &str) -> impl Future<Output = Result<String>> + Send {
        (**self).execute_command(command)
    }

    fn close(&self) -> impl Future<Output = Result<()>> + Send {
        (**self).close()
    }
}
