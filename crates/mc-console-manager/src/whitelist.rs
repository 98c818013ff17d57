use crate::args;
use mc_console_core::{
    CommandExecutor, ConsoleError, Result, WhitelistChange, WhitelistRoster, decode_whitelist,
    decode_whitelist_change,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Reads and edits the server whitelist.
pub struct WhitelistService<E> {
    executor: Arc<E>,
}

impl<E: CommandExecutor> WhitelistService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub async fn list(&self) -> Result<WhitelistRoster> {
        let raw = self.executor.execute_command("whitelist list").await?;
        decode_whitelist(&raw)
    }

    /// Adds `name` unless it is already on the list.
    ///
    /// The current whitelist is fetched first so that a duplicate is reported
    /// as a [`ConsoleError::Validation`] instead of a silent no-op.
    #[tracing::instrument(skip(self))]
    pub async fn add(&self, name: &str) -> Result<WhitelistChange> {
        let name = args::player_name(name)?;

        if self.list().await?.contains(name) {
            warn!("Player is already whitelisted");
            return Err(ConsoleError::validation(
                "player",
                format!("{} is already whitelisted", name),
            ));
        }

        let raw = self
            .executor
            .execute_command(&format!("whitelist add {}", name))
            .await?;
        let change = decode_whitelist_change(&raw)?;
        info!(?change, "Whitelist updated");
        Ok(change)
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, name: &str) -> Result<WhitelistChange> {
        let name = args::player_name(name)?;

        let raw = self
            .executor
            .execute_command(&format!("whitelist remove {}", name))
            .await?;
        let change = decode_whitelist_change(&raw)?;
        info!(?change, "Whitelist updated");
        Ok(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingExecutor;

    #[tokio::test]
    async fn test_list() {
        let executor = Arc::new(
            RecordingExecutor::default()
                .respond("whitelist list", "There are 2 whitelisted player(s): Steve, Alex"),
        );
        let roster = WhitelistService::new(executor).list().await.unwrap();
        assert_eq!(roster.count, 2);
        assert_eq!(roster.player_names, vec!["Steve", "Alex"]);
    }

    #[tokio::test]
    async fn test_add_new_player() {
        let executor = Arc::new(
            RecordingExecutor::default()
                .respond("whitelist list", "There are 0 whitelisted player(s):")
                .respond("whitelist add Steve", "Added Steve to the whitelist"),
        );
        let service = WhitelistService::new(executor.clone());

        let change = service.add(" Steve ").await.unwrap();
        assert_eq!(change, WhitelistChange::Added("Steve".to_string()));
        assert_eq!(executor.sent(), vec!["whitelist list", "whitelist add Steve"]);
    }

    #[tokio::test]
    async fn test_add_refuses_listed_player() {
        let executor = Arc::new(
            RecordingExecutor::default()
                .respond("whitelist list", "There are 1 whitelisted player(s): Alex"),
        );
        let service = WhitelistService::new(executor.clone());

        let err = service.add("alex").await.unwrap_err();
        assert!(matches!(err, ConsoleError::Validation { field: "player", .. }));
        assert_eq!(executor.sent(), vec!["whitelist list"]);
    }

    #[tokio::test]
    async fn test_blank_names_never_reach_the_server() {
        let executor = Arc::new(RecordingExecutor::default());
        let service = WhitelistService::new(executor.clone());

        assert!(service.add("   ").await.is_err());
        assert!(service.remove("   ").await.is_err());
        assert!(executor.sent().is_empty());
    }

    #[tokio::test]
    async fn test_remove() {
        let executor = Arc::new(
            RecordingExecutor::default()
                .respond("whitelist remove Steve", "Removed Steve from the whitelist")
                .respond("whitelist remove Bob", "Player is not whitelisted")
                .fail("whitelist remove Alex"),
        );
        let service = WhitelistService::new(executor);

        assert_eq!(
            service.remove("Steve").await.unwrap(),
            WhitelistChange::Removed("Steve".to_string())
        );
        assert_eq!(service.remove("Bob").await.unwrap(), WhitelistChange::NotWhitelisted);
        assert!(matches!(
            service.remove("Alex").await,
            Err(ConsoleError::Command { .. })
        ));
    }
}
