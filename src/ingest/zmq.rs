// ZeroMQ SUB transport
//
// Pure Rust implementation (no C dependencies). Each subscriber owns one SUB
// socket subscribed to everything on its endpoint; the first frame of each
// message is the JSON payload.

use crate::ingest::{IngestError, IngestResult};
use async_trait::async_trait;
use zeromq::{Socket, SocketRecv, SubSocket};

/// Transport seam for a subscriber: a connection that yields raw payloads.
///
/// Implementations must be re-connectable: after `recv` returns an error,
/// the subscriber calls `connect` again before the next `recv`.
#[async_trait]
pub trait FrameSource: Send {
    async fn connect(&mut self) -> IngestResult<()>;
    async fn recv(&mut self) -> IngestResult<Vec<u8>>;
}

/// SUB socket subscribed to all topics on one endpoint.
pub struct ZmqFrameSource {
    endpoint: String,
    socket: Option<SubSocket>,
}

impl ZmqFrameSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            socket: None,
        }
    }
}

#[async_trait]
impl FrameSource for ZmqFrameSource {
    async fn connect(&mut self) -> IngestResult<()> {
        // Drop any stale socket before rebuilding
        self.socket = None;

        let mut socket = SubSocket::new();
        socket
            .connect(&self.endpoint)
            .await
            .map_err(|e| IngestError::Connection(format!("ZMQ connect error: {}", e)))?;
        socket
            .subscribe("")
            .await
            .map_err(|e| IngestError::Connection(format!("ZMQ subscribe error: {}", e)))?;

        self.socket = Some(socket);
        Ok(())
    }

    async fn recv(&mut self) -> IngestResult<Vec<u8>> {
        let socket = self
            .socket
            .as_mut()
            .ok_or_else(|| IngestError::Connection("not connected".to_string()))?;

        match socket.recv().await {
            Ok(msg) => {
                let frames = msg.into_vec();
                frames
                    .into_iter()
                    .next()
                    .map(|bytes| bytes.to_vec())
                    .ok_or_else(|| IngestError::Parse("empty ZMQ message".to_string()))
            }
            Err(e) => {
                // The socket is unusable after a receive error
                self.socket = None;
                Err(IngestError::Connection(format!("ZMQ receive error: {}", e)))
            }
        }
    }
}
