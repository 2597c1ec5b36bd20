// Per-topic stream ingestion
//
// Each telemetry topic runs one Subscriber: a transport loop feeding a
// bounded drop-oldest queue, and an apply loop decoding frames and
// committing them to the shared store. Failures reconnect or skip a frame;
// they never take the process down.

pub mod decode;
pub mod queue;
pub mod zmq;

use crate::store::MonitorStore;
use crate::telemetry::ScopeKind;
use queue::FrameQueue;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use zmq::FrameSource;

/// Result type for ingestion operations
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors raised on the ingestion path. None of these are fatal: a
/// connection error triggers a reconnect, a parse error skips the frame.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Topic binding: which decoder and store slot a subscriber feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Text,
    Scope(ScopeKind),
    Constellation,
}

impl Topic {
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Text => "rds_text",
            Topic::Scope(ScopeKind::Audio) => "audio_scope",
            Topic::Scope(ScopeKind::Rds) => "rds_scope",
            Topic::Constellation => "constellation",
        }
    }
}

/// Decode one raw payload and commit it to the store.
///
/// Decoding is total over JSON objects, so any successfully parsed payload
/// updates the topic's record; only non-JSON payloads fail.
pub fn apply_frame(store: &MonitorStore, topic: Topic, payload: &[u8]) -> IngestResult<()> {
    match topic {
        Topic::Text => store.update_text(decode::decode_text(payload)?),
        Topic::Scope(kind) => store.update_scope(kind, decode::decode_scope(payload)?),
        Topic::Constellation => store.update_constellation(decode::decode_constellation(payload)?),
    }
    Ok(())
}

/// Settings for one topic subscription.
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub topic: Topic,
    pub endpoint: String,
    /// High-water mark: undelivered frames beyond this are dropped oldest-first.
    pub hwm: usize,
    /// Fixed delay before reconnecting after a transport error.
    pub retry_delay: Duration,
}

/// One running topic subscription: a transport task plus an apply task.
pub struct Subscriber {
    transport: JoinHandle<()>,
    apply: JoinHandle<()>,
}

impl Subscriber {
    /// Spawn the subscription. It runs until the process exits (or the
    /// tasks are aborted); errors are handled internally.
    pub fn spawn<S>(config: SubscriberConfig, source: S, store: Arc<MonitorStore>) -> Self
    where
        S: FrameSource + 'static,
    {
        let queue = FrameQueue::new(config.hwm);
        let transport = tokio::spawn(transport_loop(config.clone(), source, queue.clone()));
        let apply = tokio::spawn(apply_loop(config, queue, store));
        Self { transport, apply }
    }

    pub fn abort(&self) {
        self.transport.abort();
        self.apply.abort();
    }
}

async fn transport_loop<S: FrameSource>(
    config: SubscriberConfig,
    mut source: S,
    queue: FrameQueue,
) {
    let label = config.topic.label();
    loop {
        match source.connect().await {
            Ok(()) => info!("{}: subscribed to {}", label, config.endpoint),
            Err(e) => {
                warn!("{}: connect failed: {}", label, e);
                tokio::time::sleep(config.retry_delay).await;
                continue;
            }
        }

        loop {
            match source.recv().await {
                Ok(payload) => queue.push(payload),
                Err(e) => {
                    warn!("{}: receive failed, reconnecting: {}", label, e);
                    break;
                }
            }
        }

        tokio::time::sleep(config.retry_delay).await;
    }
}

async fn apply_loop(config: SubscriberConfig, queue: FrameQueue, store: Arc<MonitorStore>) {
    let label = config.topic.label();
    let mut discarded = 0u64;
    loop {
        let payload = queue.pop().await;
        if let Err(e) = apply_frame(&store, config.topic, &payload) {
            discarded += 1;
            warn!("{}: discarded frame #{}: {}", label, discarded, e);
        }
    }
}
