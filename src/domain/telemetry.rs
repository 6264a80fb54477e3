// Chart-ready series produced by the pipeline
use super::entity::Entity;

/// One non-empty time bucket, identified by its start instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub start_ms: i64,
    pub value: f64,
}

impl Bucket {
    pub fn new(start_ms: i64, value: f64) -> Self {
        Self { start_ms, value }
    }
}

/// Buckets sorted ascending by `start_ms`, no duplicates.
pub type BucketedSeries = Vec<Bucket>;

/// Per-entity values, one slot per canonical day label.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedSeries {
    pub entity: Entity,
    /// Entity color, or the palette fallback for its position.
    pub color: String,
    pub data: Vec<f64>,
}

impl AlignedSeries {
    pub fn new(entity: Entity, color: String, data: Vec<f64>) -> Self {
        Self {
            entity,
            color,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateTotal {
    pub entity: Entity,
    pub color: String,
    pub total: f64,
    pub percentage: f64,
}
