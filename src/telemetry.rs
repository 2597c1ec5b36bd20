// Wire-shaped telemetry records shared between ingestion and the HTTP API

use serde::{Deserialize, Serialize};

/// Which of the two waveform scope topics a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// Demodulated audio tap.
    Audio,
    /// RDS baseband tap.
    Rds,
}

/// Latest decoded RDS text, plus the currently selected station.
///
/// `selected` is owned by the selection path and survives ingest updates;
/// every other field is replaced wholesale on each received message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextState {
    /// Programme service name (8-char station label).
    pub ps: String,
    /// Radiotext (64-char rolling message).
    pub rt: String,
    /// Producer-side timestamp, fractional epoch seconds.
    pub t: f64,
    /// Local ingestion time of the last update, fractional epoch seconds.
    pub last_rx: f64,
    pub selected: Option<String>,
}

/// Latest waveform window for one scope topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeState {
    pub y: Vec<f32>,
    pub sr: f32,
    pub rms: f32,
    pub peak: f32,
    pub t: f64,
    pub last_rx: f64,
}

/// Latest symbol-sync constellation window.
///
/// `i` and `q` are element-wise paired and always equal length. `n` is the
/// producer's reported point count and may exceed the stored length after
/// truncation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstellationState {
    pub i: Vec<f32>,
    pub q: Vec<f32>,
    pub n: u64,
    pub t: f64,
    pub last_rx: f64,
}

/// Consistent copy of all four topic records, as served to polling clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSnapshot {
    pub state: TextState,
    pub audio: ScopeState,
    pub rds_scope: ScopeState,
    #[serde(rename = "const")]
    pub constellation: ConstellationState,
}

/// Decoded RDS text message, before retention and timing are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextFrame {
    pub ps: String,
    pub rt: String,
    pub t: f64,
}

/// Decoded scope message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeFrame {
    pub y: Vec<f32>,
    pub sr: f32,
    pub rms: f32,
    pub peak: f32,
    pub t: f64,
}

/// Decoded constellation message. `n` is `None` when the producer did not
/// report a usable count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstellationFrame {
    pub i: Vec<f32>,
    pub q: Vec<f32>,
    pub n: Option<u64>,
    pub t: f64,
}
