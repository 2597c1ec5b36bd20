// Tolerant JSON decoding for inbound telemetry
//
// Producers send loosely-shaped JSON objects. Every field falls back to its
// documented default when missing or of the wrong type; only a payload that
// is not a JSON object at all is an error. Numeric array elements of the
// wrong type are dropped rather than failing the frame.

use crate::ingest::{IngestError, IngestResult};
use crate::telemetry::{ConstellationFrame, ScopeFrame, TextFrame};
use serde_json::Value;

fn parse_object(payload: &[u8]) -> IngestResult<Value> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|e| IngestError::Parse(format!("invalid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(IngestError::Parse("payload is not a JSON object".to_string()));
    }
    Ok(value)
}

fn str_field(obj: &Value, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn f64_field(obj: &Value, key: &str) -> f64 {
    obj.get(key).and_then(Value::as_f64).unwrap_or_default()
}

fn f32_field(obj: &Value, key: &str) -> f32 {
    f64_field(obj, key) as f32
}

fn samples_field(obj: &Value, key: &str) -> Vec<f32> {
    match obj.get(key).and_then(Value::as_array) {
        Some(items) => items
            .iter()
            .filter_map(Value::as_f64)
            .map(|v| v as f32)
            .collect(),
        None => Vec::new(),
    }
}

pub fn decode_text(payload: &[u8]) -> IngestResult<TextFrame> {
    let obj = parse_object(payload)?;
    Ok(TextFrame {
        ps: str_field(&obj, "ps"),
        rt: str_field(&obj, "rt"),
        t: f64_field(&obj, "t"),
    })
}

pub fn decode_scope(payload: &[u8]) -> IngestResult<ScopeFrame> {
    let obj = parse_object(payload)?;
    Ok(ScopeFrame {
        y: samples_field(&obj, "y"),
        sr: f32_field(&obj, "sr"),
        rms: f32_field(&obj, "rms"),
        peak: f32_field(&obj, "peak"),
        t: f64_field(&obj, "t"),
    })
}

pub fn decode_constellation(payload: &[u8]) -> IngestResult<ConstellationFrame> {
    let obj = parse_object(payload)?;
    Ok(ConstellationFrame {
        i: samples_field(&obj, "i"),
        q: samples_field(&obj, "q"),
        n: obj.get("n").and_then(Value::as_u64),
        t: f64_field(&obj, "t"),
    })
}
