// Dashboard service - Use cases for building chart-ready dashboards
use crate::application::catalog_service::CatalogService;
use crate::application::error::{ServiceError, ServiceResult};
use crate::application::measurement_repository::{MeasureQuery, MeasurementRepository};
use crate::domain::aggregation::aggregate_totals;
use crate::domain::alignment::align_daily_totals;
use crate::domain::bucketing::bucket_mean;
use crate::domain::calendar::{label_days, label_range, DateRange};
use crate::domain::dashboard::{EnergyDashboard, MeasureChart};
use crate::domain::entity::Entity;
use crate::domain::sample::{extract_points, FieldAliases, NormalizedPoint, RawSample};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn MeasurementRepository>,
    catalog: CatalogService,
    device_energy_variable: String,
}

impl DashboardService {
    pub fn new(
        repository: Arc<dyn MeasurementRepository>,
        catalog: CatalogService,
        device_energy_variable: String,
    ) -> Self {
        Self {
            repository,
            catalog,
            device_energy_variable,
        }
    }

    /// Daily energy per plant plus each plant's share of the window total.
    pub async fn plant_energy(
        &self,
        plant_ids: &[String],
        range: DateRange,
    ) -> ServiceResult<EnergyDashboard> {
        let entities = self.catalog.select_plants(plant_ids)?;

        let fetches = entities.iter().map(|entity| async move {
            let result = self.repository.daily_energy(&entity.id, &range).await;
            (entity.id.clone(), result)
        });
        let samples = self.collect_energy(&range, fetches).await;

        Ok(self.build_energy_dashboard("Daily energy".to_string(), &entities, &samples, &range))
    }

    /// Daily energy per device of one plant.
    pub async fn device_energy(
        &self,
        plant_id: &str,
        range: DateRange,
    ) -> ServiceResult<EnergyDashboard> {
        let plant = self.catalog.plant(plant_id)?;
        let entities = plant.devices.clone();

        let fetches = entities.iter().map(|device| {
            let query = MeasureQuery {
                plant_id: plant_id.to_string(),
                device_id: device.id.clone(),
                variable: self.device_energy_variable.clone(),
                range,
            };
            async move {
                let result = self.repository.filtered_measures(&query).await;
                (query.device_id, result)
            }
        });
        let samples = self.collect_energy(&range, fetches).await;

        let title = format!("{} daily energy", plant.entity.display_name);
        Ok(self.build_energy_dashboard(title, &entities, &samples, &range))
    }

    /// Sub-daily chart of one device variable, averaged per interval.
    pub async fn measure_chart(
        &self,
        plant_id: &str,
        device_id: &str,
        variable: &str,
        range: DateRange,
        interval_minutes: u32,
    ) -> ServiceResult<MeasureChart> {
        if interval_minutes == 0 {
            return Err(ServiceError::InvalidRequest(
                "interval_minutes must be greater than zero".to_string(),
            ));
        }
        let device = self.catalog.device(plant_id, device_id)?;
        let metadata = self.catalog.variable(variable);

        let query = MeasureQuery {
            plant_id: plant_id.to_string(),
            device_id: device_id.to_string(),
            variable: variable.to_string(),
            range,
        };
        let records = if range.is_empty() {
            Vec::new()
        } else {
            self.repository
                .filtered_measures(&query)
                .await
                .map_err(ServiceError::Backend)?
        };

        let interval_ms = i64::from(interval_minutes) * 60_000;
        let points = extract_points(&records, &FieldAliases::MEASURES);
        let buckets = bucket_mean(&points, interval_ms)?;

        tracing::debug!(
            "Measure chart {}/{}/{}: {} records -> {} buckets",
            plant_id,
            device_id,
            variable,
            records.len(),
            buckets.len()
        );

        let variable_title = metadata.map(|m| m.title.as_str()).unwrap_or(variable);
        Ok(MeasureChart {
            title: format!("{} - {}", device.display_name, variable_title),
            variable: variable.to_string(),
            unit: metadata.and_then(|m| m.unit.clone()),
            interval_ms,
            points: buckets,
        })
    }

    /// Await the fetches and normalize each payload with the energy aliases.
    /// A failed fetch leaves its entity without samples rather than failing
    /// the whole dashboard.
    async fn collect_energy<I, F>(
        &self,
        range: &DateRange,
        fetches: I,
    ) -> HashMap<String, Vec<NormalizedPoint>>
    where
        I: IntoIterator<Item = F>,
        F: std::future::Future<Output = (String, anyhow::Result<Vec<RawSample>>)>,
    {
        let mut samples = HashMap::new();
        if range.is_empty() {
            tracing::debug!("Empty date window, skipping backend fetches");
            return samples;
        }

        for (entity_id, result) in join_all(fetches).await {
            match result {
                Ok(records) => {
                    samples.insert(entity_id, extract_points(&records, &FieldAliases::ENERGY));
                }
                Err(e) => {
                    tracing::warn!("Error fetching energy for {}: {:#}", entity_id, e);
                }
            }
        }

        samples
    }

    fn build_energy_dashboard(
        &self,
        title: String,
        entities: &[Entity],
        samples: &HashMap<String, Vec<NormalizedPoint>>,
        range: &DateRange,
    ) -> EnergyDashboard {
        let days = label_days(range);
        let series = align_daily_totals(entities, samples, &days, self.catalog.palette());
        let totals = aggregate_totals(&series);
        let labels = label_range(range.start, range.end);

        EnergyDashboard::new(title, labels, series, totals)
    }
}
