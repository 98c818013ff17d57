use mc_console_core::{
    CommandExecutor, ConsoleError, DayPhase, GameTicks, Result, decode_time_query,
};
use derive_more::Display;
use std::str::FromStr;
use std::sync::Arc;

/// Target of `time set`: a named phase or an absolute tick of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TimeSpec {
    Phase(DayPhase),
    Ticks(GameTicks),
}

impl FromStr for TimeSpec {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        if let Ok(phase) = value.parse::<DayPhase>() {
            return Ok(TimeSpec::Phase(phase));
        }
        if let Ok(ticks) = value.parse::<u64>() {
            return Ok(TimeSpec::Ticks(GameTicks(ticks)));
        }
        Err(ConsoleError::validation(
            "time",
            format!("expected day, noon, night, midnight or a tick count, got {:?}", s),
        ))
    }
}

/// Reads and moves the world clock.
pub struct GametimeService<E> {
    executor: Arc<E>,
}

impl<E: CommandExecutor> GametimeService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    async fn query(&self, what: &str) -> Result<GameTicks> {
        let raw = self
            .executor
            .execute_command(&format!("time query {}", what))
            .await?;
        decode_time_query(&raw)
    }

    /// Ticks since the current day started, as reported by the server.
    pub async fn daytime(&self) -> Result<GameTicks> {
        self.query("daytime").await
    }

    /// Ticks since the world was created.
    pub async fn gametime(&self) -> Result<GameTicks> {
        self.query("gametime").await
    }

    /// Days elapsed.
    pub async fn day(&self) -> Result<u64> {
        self.query("day").await.map(|ticks| ticks.0)
    }

    pub async fn set(&self, time: TimeSpec) -> Result<String> {
        self.executor
            .execute_command(&format!("time set {}", time))
            .await
    }

    pub async fn add(&self, ticks: GameTicks) -> Result<String> {
        self.executor
            .execute_command(&format!("time add {}", ticks))
            .await
    }
}
