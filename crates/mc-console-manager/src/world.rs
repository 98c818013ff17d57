use crate::args;
use crate::gametime::GametimeService;
use derive_more::Display;
use mc_console_core::{CommandExecutor, ConsoleError, DayPhase, Difficulty, Result, decode_difficulty};
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

/// Snapshot of the world clock and difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldStats {
    pub day: u64,
    pub day_phase: DayPhase,
    pub difficulty: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    #[display("clear")]
    Clear,
    #[display("rain")]
    Rain,
    #[display("thunder")]
    Thunder,
}

impl Weather {
    pub const ALL: [Weather; 3] = [Weather::Clear, Weather::Rain, Weather::Thunder];
}

impl FromStr for Weather {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|weather| weather.to_string() == wanted)
            .ok_or_else(|| {
                ConsoleError::validation("weather", format!("expected clear, rain or thunder, got {:?}", s))
            })
    }
}

/// Where a title is shown on the player's screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TitleKind {
    #[display("title")]
    Title,
    #[display("subtitle")]
    Subtitle,
    #[display("actionbar")]
    ActionBar,
}

/// World-wide settings and announcements.
pub struct WorldService<E> {
    executor: Arc<E>,
    gametime: GametimeService<E>,
}

impl<E: CommandExecutor> WorldService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            gametime: GametimeService::new(Arc::clone(&executor)),
            executor,
        }
    }

    /// Queries the difficulty first, then the game time.
    ///
    /// Nothing is returned unless both answers decode.
    pub async fn stats(&self) -> Result<WorldStats> {
        let difficulty = self.difficulty().await?;
        let ticks = self.gametime.gametime().await?;

        Ok(WorldStats {
            day: ticks.day(),
            day_phase: ticks.day_phase(),
            difficulty,
        })
    }

    pub async fn difficulty(&self) -> Result<String> {
        let raw = self.executor.execute_command("difficulty").await?;
        decode_difficulty(&raw)
    }

    /// Checks `level` against the known difficulties before sending it.
    pub async fn set_difficulty(&self, level: &str) -> Result<String> {
        let level = Difficulty::from_str(level)
            .map_err(|reason| ConsoleError::validation("difficulty", reason))?;
        info!(%level, "Changing difficulty");
        self.run(format!("difficulty {}", level)).await
    }

    /// `duration` is in seconds; zero is rejected.
    pub async fn set_weather(&self, weather: Weather, duration: Option<u32>) -> Result<String> {
        let command = match duration {
            Some(0) => {
                return Err(ConsoleError::validation("duration", "must be positive"));
            }
            Some(seconds) => format!("weather {} {}", weather, seconds),
            None => format!("weather {}", weather),
        };
        self.run(command).await
    }

    pub async fn gamerule(&self, rule: &str) -> Result<String> {
        let rule = args::single_word("gamerule", rule)?;
        self.run(format!("gamerule {}", rule)).await
    }

    pub async fn set_gamerule(&self, rule: &str, value: &str) -> Result<String> {
        let rule = args::single_word("gamerule", rule)?;
        let value = args::single_word("value", value)?;
        self.run(format!("gamerule {} {}", rule, value)).await
    }

    pub async fn set_world_spawn(&self, x: i64, y: i64, z: i64) -> Result<String> {
        self.run(format!("setworldspawn {} {} {}", x, y, z)).await
    }

    /// Sets the border's diameter in blocks.
    pub async fn set_world_border(&self, size: f64) -> Result<String> {
        if !size.is_finite() || size <= 0.0 {
            return Err(ConsoleError::validation("size", "must be a positive number of blocks"));
        }
        self.run(format!("worldborder set {:.6}", size)).await
    }

    pub async fn set_world_border_center(&self, x: f64, z: f64) -> Result<String> {
        if !x.is_finite() || !z.is_finite() {
            return Err(ConsoleError::validation("center", "coordinates must be finite"));
        }
        self.run(format!("worldborder center {:.6} {:.6}", x, z)).await
    }

    pub async fn say(&self, message: &str) -> Result<String> {
        let message = args::non_empty("message", message)?;
        self.run(format!("say {}", message)).await
    }

    /// Shows `text` to `target`, a player name or selector such as `@a`.
    pub async fn title(&self, target: &str, kind: TitleKind, text: &str) -> Result<String> {
        let target = args::single_word("target", target)?;
        let component = serde_json::json!({ "text": text });
        self.run(format!("title {} {} {}", target, kind, component)).await
    }

    pub async fn save(&self) -> Result<String> {
        self.run("save-all".to_string()).await
    }

    pub async fn set_auto_save(&self, enabled: bool) -> Result<String> {
        let command = if enabled { "save-on" } else { "save-off" };
        self.run(command.to_string()).await
    }

    pub async fn stop(&self) -> Result<String> {
        warn!("Stopping the server");
        self.run("stop".to_string()).await
    }

    async fn run(&self, command: String) -> Result<String> {
        self.executor.execute_command(&command).await
    }
}
