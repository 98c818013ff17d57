//! Core abstractions and types for driving a Minecraft server's remote console.
//!
//! This crate defines the error taxonomy shared by every layer, the
//! [`CommandExecutor`] operation that the connection manager provides, and
//! the decoders turning the server's human-readable answers into typed values.

pub mod decode;
pub mod error;
pub mod executor;
pub mod logging;
pub mod prelude;

pub use decode::*;
pub use error::*;
pub use executor::*;
