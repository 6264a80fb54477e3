// Dashboard domain models
use super::telemetry::{AggregateTotal, AlignedSeries, BucketedSeries};

/// Multi-entity daily energy view: stacked chart plus distribution totals.
#[derive(Debug, Clone)]
pub struct EnergyDashboard {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<AlignedSeries>,
    pub totals: Vec<AggregateTotal>,
}

impl EnergyDashboard {
    pub fn new(
        title: String,
        labels: Vec<String>,
        series: Vec<AlignedSeries>,
        totals: Vec<AggregateTotal>,
    ) -> Self {
        Self {
            title,
            labels,
            series,
            totals,
        }
    }
}

/// Single-variable continuous chart for one device.
#[derive(Debug, Clone)]
pub struct MeasureChart {
    pub title: String,
    pub variable: String,
    pub unit: Option<String>,
    pub interval_ms: i64,
    pub points: BucketedSeries,
}
