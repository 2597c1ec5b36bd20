// Bounded hand-off between the transport loop and the apply loop
//
// Push never blocks: at the high-water mark the oldest undelivered frame is
// discarded, so the apply side always works on the most recent data even
// when it falls behind a bursty producer.

use crossbeam::queue::ArrayQueue;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Drop-oldest frame queue with a fixed high-water mark.
#[derive(Clone)]
pub struct FrameQueue {
    frames: Arc<ArrayQueue<Vec<u8>>>,
    notify: Arc<Notify>,
    dropped: Arc<AtomicU64>,
}

impl FrameQueue {
    /// `hwm` is the maximum number of undelivered frames retained.
    pub fn new(hwm: usize) -> Self {
        Self {
            frames: Arc::new(ArrayQueue::new(hwm.max(1))),
            notify: Arc::new(Notify::new()),
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Enqueue a frame, discarding the oldest one first when full.
    pub fn push(&self, frame: Vec<u8>) {
        if self.frames.is_full() {
            self.frames.pop();
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        self.frames.push(frame).ok();
        self.notify.notify_one();
    }

    /// Wait for the next frame, in arrival order.
    pub async fn pop(&self) -> Vec<u8> {
        loop {
            if let Some(frame) = self.frames.pop() {
                return frame;
            }
            self.notify.notified().await;
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Total frames discarded due to overflow.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
