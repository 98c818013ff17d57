//! Prelude module with commonly used types and traits.
//!
//! This module re-exports the most commonly used items from the crate,
//! allowing users to quickly import everything they need with `use mc_console_core::prelude::*;`.

pub use crate::decode::{
    DayPhase, Difficulty, GameTicks, PresenceInfo, TICKS_PER_DAY, WhitelistChange,
    WhitelistRoster, decode_difficulty, decode_player_list, decode_time_query, decode_whitelist,
    decode_whitelist_change,
};
pub use crate::error::{ConsoleError, RecoveryStep, Result, TransportError};
pub use crate::executor::CommandExecutor;
