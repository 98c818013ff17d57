//! Remote console connection for a Minecraft server.
//!
//! [`codec`] frames packets on the wire, [`transport`] performs the login
//! handshake and request/response exchange over one TCP stream, and
//! [`connector`] owns the long-lived connection: it serializes commands,
//! probes liveness and recovers from dropped connections.

pub mod codec;
pub mod connector;
pub mod prelude;
pub mod transport;

pub use connector::{ConnectionStatus, RconConnector, RetryPolicy};
pub use transport::{Dialer, RconTransport, TcpDialer, TcpTransport};
