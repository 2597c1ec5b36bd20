// Shared latest-state store for all telemetry topics
//
// One RwLock per topic: subscribers write their own topic, readers copy.
// No lock is ever held across I/O, and a snapshot only holds each lock for
// the duration of that record's copy.

use crate::telemetry::{
    ConstellationFrame, ConstellationState, MonitorSnapshot, ScopeFrame, ScopeKind, ScopeState,
    TextFrame, TextState,
};
use parking_lot::RwLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Maximum retained waveform samples per scope topic.
pub const SCOPE_MAX_SAMPLES: usize = 1400;

/// Maximum retained constellation points per axis.
pub const CONSTELLATION_MAX_POINTS: usize = 1200;

fn now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs_f64()
}

/// Keep only the most recent `max` elements, dropping the oldest first.
fn tail(mut values: Vec<f32>, max: usize) -> Vec<f32> {
    if values.len() > max {
        values.drain(..values.len() - max);
    }
    values
}

/// Latest known record per topic, shared between subscribers and readers.
pub struct MonitorStore {
    text: RwLock<TextState>,
    audio: RwLock<ScopeState>,
    rds_scope: RwLock<ScopeState>,
    constellation: RwLock<ConstellationState>,
}

impl MonitorStore {
    pub fn new() -> Self {
        Self {
            text: RwLock::new(TextState::default()),
            audio: RwLock::new(ScopeState::default()),
            rds_scope: RwLock::new(ScopeState::default()),
            constellation: RwLock::new(ConstellationState::default()),
        }
    }

    fn scope_slot(&self, kind: ScopeKind) -> &RwLock<ScopeState> {
        match kind {
            ScopeKind::Audio => &self.audio,
            ScopeKind::Rds => &self.rds_scope,
        }
    }

    /// Replace the text record. The selection survives; it is owned by
    /// [`MonitorStore::set_selected`], not by the ingest path.
    pub fn update_text(&self, frame: TextFrame) {
        let mut state = self.text.write();
        state.ps = frame.ps;
        state.rt = frame.rt;
        state.t = frame.t;
        // last_rx never goes backwards, even if the wall clock does
        state.last_rx = now().max(state.last_rx);
    }

    /// Replace one scope record, truncated to the most recent samples.
    pub fn update_scope(&self, kind: ScopeKind, frame: ScopeFrame) {
        let y = tail(frame.y, SCOPE_MAX_SAMPLES);
        let mut state = self.scope_slot(kind).write();
        state.y = y;
        state.sr = frame.sr;
        state.rms = frame.rms;
        state.peak = frame.peak;
        state.t = frame.t;
        state.last_rx = now().max(state.last_rx);
    }

    /// Replace the constellation record.
    ///
    /// Each axis is capped to its most recent points, then both are cut to
    /// their common length so the pairs stay aligned. A reported `n` is kept
    /// as sent; otherwise it is derived from the stored length.
    pub fn update_constellation(&self, frame: ConstellationFrame) {
        let mut i = tail(frame.i, CONSTELLATION_MAX_POINTS);
        let mut q = tail(frame.q, CONSTELLATION_MAX_POINTS);
        let pairs = i.len().min(q.len());
        i.truncate(pairs);
        q.truncate(pairs);

        let mut state = self.constellation.write();
        state.i = i;
        state.q = q;
        state.n = frame.n.unwrap_or(pairs as u64);
        state.t = frame.t;
        state.last_rx = now().max(state.last_rx);
    }

    /// Record a successful station selection.
    pub fn set_selected(&self, name: &str) {
        self.text.write().selected = Some(name.to_string());
    }

    pub fn text(&self) -> TextState {
        self.text.read().clone()
    }

    pub fn scope(&self, kind: ScopeKind) -> ScopeState {
        self.scope_slot(kind).read().clone()
    }

    pub fn constellation(&self) -> ConstellationState {
        self.constellation.read().clone()
    }

    /// Independent copy of every topic's current record.
    ///
    /// Each record is copied under its own lock, so per-topic consistency is
    /// guaranteed while topics may be captured at slightly different instants.
    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            state: self.text(),
            audio: self.scope(ScopeKind::Audio),
            rds_scope: self.scope(ScopeKind::Rds),
            constellation: self.constellation(),
        }
    }
}

impl Default for MonitorStore {
    fn default() -> Self {
        Self::new()
    }
}
