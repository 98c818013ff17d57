//! Prelude module for the console connection.
//!
//! Import with `use mc_console_connector::prelude::*;` to get the connector
//! together with the core types it speaks.

pub use crate::connector::{ConnectionStatus, RconConnector, RetryPolicy};
pub use crate::transport::{Dialer, RconTransport, TcpDialer};
pub use mc_console_core::prelude::*;
