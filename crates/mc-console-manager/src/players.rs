use crate::args;
use mc_console_core::{CommandExecutor, PresenceInfo, Result, decode_player_list};
use std::sync::Arc;
use tracing::info;

/// Who is online, and removing them.
pub struct PlayerService<E> {
    executor: Arc<E>,
}

impl<E: CommandExecutor> PlayerService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// Current roster from `list`.
    pub async fn online(&self) -> Result<PresenceInfo> {
        let raw = self.executor.execute_command("list").await?;
        decode_player_list(&raw)
    }

    /// Disconnects `name`, optionally telling them why.
    pub async fn kick(&self, name: &str, reason: Option<&str>) -> Result<String> {
        let name = args::player_name(name)?;
        let command = match reason.map(str::trim).filter(|reason| !reason.is_empty()) {
            Some(reason) => format!("kick {} {}", name, reason),
            None => format!("kick {}", name),
        };

        info!(player = name, "Kicking player");
        self.executor.execute_command(&command).await
    }
}
