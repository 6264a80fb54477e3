// Repository trait for backend telemetry access
use crate::domain::calendar::DateRange;
use crate::domain::sample::RawSample;
use async_trait::async_trait;

/// A filtered-measures lookup for one device variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureQuery {
    pub plant_id: String,
    pub device_id: String,
    pub variable: String,
    pub range: DateRange,
}

#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Daily energy records for a plant over the range
    async fn daily_energy(&self, plant_id: &str, range: &DateRange) -> anyhow::Result<Vec<RawSample>>;

    /// Raw measures of one variable for one device
    async fn filtered_measures(&self, query: &MeasureQuery) -> anyhow::Result<Vec<RawSample>>;
}
