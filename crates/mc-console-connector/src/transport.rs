//! Transport seam between the connection manager and the network.
//!
//! [`Dialer`] produces authenticated [`RconTransport`]s. The connection
//! manager only ever talks to these traits, which keeps the TCP
//! implementation swappable.

use crate::codec::{
    AUTH_FAILURE_ID, PACKET_AUTH, PACKET_AUTH_RESPONSE, PACKET_EXEC_COMMAND, PACKET_RESPONSE_VALUE,
    Packet, RconCodec,
};
use futures::{SinkExt, StreamExt};
use mc_console_core::TransportError;
use std::future::Future;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::{debug, trace};

/// An authenticated connection able to run one command at a time.
pub trait RconTransport: Send {
    /// Send `command` and wait for its complete response
    fn execute(&mut self, command: &str) -> impl Future<Output = Result<String, TransportError>> + Send;

    /// Tear the connection down; errors are not interesting at this point
    fn close(self) -> impl Future<Output = ()> + Send;
}

/// Opens authenticated transports.
pub trait Dialer: Send + Sync {
    type Transport: RconTransport;

    /// Dial `address` and complete the login handshake with `password`
    fn dial(
        &self,
        address: &str,
        password: &str,
    ) -> impl Future<Output = Result<Self::Transport, TransportError>> + Send;
}

/// Dials plain TCP connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpDialer;

impl Dialer for TcpDialer {
    type Transport = TcpTransport;

    fn dial(
        &self,
        address: &str,
        password: &str,
    ) -> impl Future<Output = Result<TcpTransport, TransportError>> + Send {
        TcpTransport::connect(address, password)
    }
}

/// Remote console session over a TCP stream.
pub struct TcpTransport {
    framed: Framed<TcpStream, RconCodec>,
    last_id: i32,
}

impl TcpTransport {
    /// Connects to `address` and logs in with `password`.
    ///
    /// # Errors
    ///
    /// [`TransportError::AuthRejected`] when the server refuses the secret,
    /// any other variant when the stream fails first.
    pub async fn connect(address: &str, password: &str) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(address)
            .await
            .map_err(|e| TransportError::io("dial", e))?;
        if let Err(e) = stream.set_nodelay(true) {
            debug!(error = %e, "Failed to disable Nagle's algorithm");
        }

        let mut transport = Self {
            framed: Framed::new(stream, RconCodec::new()),
            last_id: 0,
        };
        transport.authenticate(password).await?;
        Ok(transport)
    }

    /// Ids are positive and never [`AUTH_FAILURE_ID`].
    fn next_id(&mut self) -> i32 {
        self.last_id = if self.last_id == i32::MAX { 1 } else { self.last_id + 1 };
        self.last_id
    }

    async fn authenticate(&mut self, password: &str) -> Result<(), TransportError> {
        let id = self.next_id();
        self.framed.send(Packet::new(id, PACKET_AUTH, password)).await?;

        loop {
            let packet = self.next_packet().await?;
            match packet.kind {
                PACKET_AUTH_RESPONSE if packet.id == AUTH_FAILURE_ID => {
                    return Err(TransportError::AuthRejected);
                }
                PACKET_AUTH_RESPONSE if packet.id == id => return Ok(()),
                // Some servers send an empty value packet ahead of the auth answer
                _ => trace!(id = packet.id, kind = packet.kind, "Skipping packet during login"),
            }
        }
    }

    async fn next_packet(&mut self) -> Result<Packet, TransportError> {
        match self.framed.next().await {
            Some(packet) => packet,
            None => Err(TransportError::Closed),
        }
    }
}

impl RconTransport for TcpTransport {
    /// Responses longer than one fragment arrive as consecutive packets
    /// carrying the request id. The command is chased by an empty
    /// [`PACKET_RESPONSE_VALUE`] the server cannot interpret; its answer comes
    /// after the last fragment and ends the response.
    async fn execute(&mut self, command: &str) -> Result<String, TransportError> {
        let id = self.next_id();
        let sentinel = self.next_id();
        self.framed
            .feed(Packet::new(id, PACKET_EXEC_COMMAND, command))
            .await?;
        self.framed
            .send(Packet::new(sentinel, PACKET_RESPONSE_VALUE, ""))
            .await?;

        let mut response = Vec::new();
        loop {
            let packet = self.next_packet().await?;
            if packet.id == sentinel {
                trace!(bytes = response.len(), "Response complete");
                return Ok(String::from_utf8_lossy(&response).into_owned());
            }
            if packet.id != id || packet.kind != PACKET_RESPONSE_VALUE {
                // late answer to a command that timed out earlier
                trace!(id = packet.id, expected = id, "Discarding stale packet");
                continue;
            }
            response.extend_from_slice(&packet.body);
        }
    }

    async fn close(self) {
        let mut stream = self.framed.into_inner();
        if let Err(e) = stream.shutdown().await {
            debug!(error = %e, "Error while shutting down console stream");
        }
    }
}
