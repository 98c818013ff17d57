//! Typed console operations for a Minecraft server.
//!
//! This crate provides a [`ConsoleManager`] that wraps a command executor and
//! exposes one service per remote concept. Each service validates its
//! arguments, sends the command and decodes the answer.

mod args;
pub mod command;
pub mod gametime;
pub mod manager;
pub mod players;
pub mod prelude;
pub mod whitelist;
pub mod world;

#[cfg(test)]
mod testing;

pub use command::CommandService;
pub use gametime::{GametimeService, TimeSpec};
pub use manager::ConsoleManager;
pub use players::PlayerService;
pub use whitelist::WhitelistService;
pub use world::{TitleKind, Weather, WorldService, WorldStats};
