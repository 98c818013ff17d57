use crate::{ConsoleError, Result};
use derive_more::Display;
use serde::Serialize;
use std::str::FromStr;

const DECODER: &str = "time query";
const TIME_QUERY_PREFIX: &str = "The time is ";

/// Ticks in one in-game day.
pub const TICKS_PER_DAY: u64 = 24_000;

/// A named quarter of the day cycle.
///
/// Phases start at fixed ticks of the day; ticks before the first boundary
/// belong to the previous day's midnight phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPhase {
    #[display("day")]
    Day,
    #[display("noon")]
    Noon,
    #[display("night")]
    Night,
    #[display("midnight")]
    Midnight,
}

impl DayPhase {
    /// Phases in ascending order of their first tick.
    pub const ALL: [DayPhase; 4] = [DayPhase::Day, DayPhase::Noon, DayPhase::Night, DayPhase::Midnight];

    /// Tick of the day at which this phase begins.
    pub const fn start_tick(self) -> u64 {
        match self {
            DayPhase::Day => 1_000,
            DayPhase::Noon => 6_000,
            DayPhase::Night => 13_000,
            DayPhase::Midnight => 18_000,
        }
    }

    /// Phase containing `tick_of_day`; values past one day are reduced first.
    pub fn for_tick_of_day(tick_of_day: u64) -> DayPhase {
        let tick = tick_of_day % TICKS_PER_DAY;
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|phase| tick >= phase.start_tick())
            .unwrap_or(DayPhase::Midnight)
    }
}

impl FromStr for DayPhase {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|phase| phase.to_string() == wanted)
            .ok_or_else(|| format!("unknown day phase: {}", s))
    }
}

/// A tick count reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Display, Serialize)]
#[serde(transparent)]
pub struct GameTicks(pub u64);

impl GameTicks {
    /// Whole days elapsed.
    pub fn day(self) -> u64 {
        self.0 / TICKS_PER_DAY
    }

    /// Ticks into the current day.
    pub fn day_phase_ticks(self) -> GameTicks {
        GameTicks(self.0 % TICKS_PER_DAY)
    }

    pub fn day_phase(self) -> DayPhase {
        DayPhase::for_tick_of_day(self.day_phase_ticks().0)
    }
}

impl From<u64> for GameTicks {
    fn from(ticks: u64) -> Self {
        GameTicks(ticks)
    }
}

/// Decodes `The time is {ticks}`, the answer to every `time query` variant.
pub fn decode_time_query(raw: &str) -> Result<GameTicks> {
    let value = raw
        .trim()
        .strip_prefix(TIME_QUERY_PREFIX)
        .ok_or_else(|| ConsoleError::protocol(DECODER, "expected `The time is N`", raw))?;

    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConsoleError::protocol(
            DECODER,
            "tick count is not a non-negative integer",
            raw,
        ));
    }

    value
        .parse::<u64>()
        .map(GameTicks)
        .map_err(|e| ConsoleError::protocol(DECODER, format!("invalid tick count: {}", e), raw))
}
