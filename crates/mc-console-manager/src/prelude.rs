//! Prelude module for console management.
//!
//! Import with `use mc_console_manager::prelude::*;` to get the manager, its
//! services and the core types they return.

pub use crate::gametime::TimeSpec;
pub use crate::manager::ConsoleManager;
pub use crate::world::{TitleKind, Weather, WorldStats};
pub use crate::{CommandService, GametimeService, PlayerService, WhitelistService, WorldService};

// Re-export commonly used types from dependencies
pub use mc_console_connector::prelude::*;
