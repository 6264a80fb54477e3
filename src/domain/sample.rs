// Raw backend records and the field extractor that normalizes them
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

pub const TIMESTAMP_FIELDS: &[&str] = &["datetime", "timestamp", "date", "time", "timeStamp"];

pub const MEASURE_VALUE_FIELDS: &[&str] = &["measure", "value", "measureValue", "data"];

pub const ENERGY_VALUE_FIELDS: &[&str] = &[
    "measure",
    "value",
    "measureValue",
    "data",
    "totalDayEnergy",
    "energy",
    "dailyEnergy",
];

/// Ordered key candidates for the timestamp and the value of a record.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub timestamp: &'static [&'static str],
    pub value: &'static [&'static str],
}

impl FieldAliases {
    pub const MEASURES: FieldAliases = FieldAliases {
        timestamp: TIMESTAMP_FIELDS,
        value: MEASURE_VALUE_FIELDS,
    };

    pub const ENERGY: FieldAliases = FieldAliases {
        timestamp: TIMESTAMP_FIELDS,
        value: ENERGY_VALUE_FIELDS,
    };
}

/// A backend record of unknown shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSample(Map<String, Value>);

impl RawSample {
    /// Returns `None` for anything that is not a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// First alias present with a non-null value.
    fn probe(&self, aliases: &[&str]) -> Option<&Value> {
        aliases
            .iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| !value.is_null())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl NormalizedPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        let value = if value.is_finite() { value } else { 0.0 };
        Self { time_ms, value }
    }
}

/// Normalize one record. Records without a usable timestamp are dropped;
/// a missing or malformed value becomes zero.
pub fn extract(record: &RawSample, aliases: &FieldAliases) -> Option<NormalizedPoint> {
    let time_ms = parse_timestamp(record.probe(aliases.timestamp)?)?;
    let value = record.probe(aliases.value).map(coerce_value).unwrap_or(0.0);
    Some(NormalizedPoint::new(time_ms, value))
}

pub fn extract_points(records: &[RawSample], aliases: &FieldAliases) -> Vec<NormalizedPoint> {
    let points: Vec<NormalizedPoint> = records
        .iter()
        .filter_map(|record| extract(record, aliases))
        .collect();

    let dropped = records.len() - points.len();
    if dropped > 0 {
        tracing::debug!(
            "Dropped {} of {} records without a usable timestamp",
            dropped,
            records.len()
        );
    }

    points
}

fn parse_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => {
            let ms = match n.as_i64() {
                Some(ms) => ms,
                None => {
                    let ms = n.as_f64()?.floor();
                    if !ms.is_finite() || ms < i64::MIN as f64 || ms >= i64::MAX as f64 {
                        return None;
                    }
                    ms as i64
                }
            };
            // Only instants chrono can represent.
            DateTime::from_timestamp_millis(ms).map(|_| ms)
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

fn coerce_value(value: &Value) -> f64 {
    let number = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };

    if number.is_finite() { number } else { 0.0 }
}
