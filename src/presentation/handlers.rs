// HTTP request handlers
use crate::domain::calendar::{last_n_days, DateRange};
use crate::infrastructure::config::DashboardSettings;
use crate::infrastructure::json_mapper::{
    catalog_entry_to_json, energy_dashboard_to_json, measure_chart_to_json, JsonCatalogEntry,
    JsonEnergyDashboard, JsonMeasureChart,
};
use crate::presentation::app_state::AppState;
use crate::presentation::error::{ApiError, ApiResult};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize, Default)]
pub struct EnergyQuery {
    /// Comma separated plant ids; all plants when absent.
    pub plants: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub last_days: Option<u32>,
}

#[derive(Deserialize, Default)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub last_days: Option<u32>,
}

#[derive(Deserialize)]
pub struct MeasureParams {
    pub variable: Option<String>,
    pub interval_minutes: Option<u32>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub last_days: Option<u32>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List the plant/device catalog
pub async fn list_plants(State(state): State<Arc<AppState>>) -> Json<Vec<JsonCatalogEntry>> {
    let plants = state
        .catalog_service
        .list_plants()
        .into_iter()
        .map(catalog_entry_to_json)
        .collect();
    Json(plants)
}

/// Daily energy per plant with distribution totals
pub async fn plant_energy(
    Query(query): Query<EnergyQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<JsonEnergyDashboard>> {
    let range = resolve_range(
        query.start.as_deref(),
        query.end.as_deref(),
        query.last_days,
        &state.defaults,
        Utc::now(),
    )?;
    let plant_ids = split_ids(query.plants.as_deref());

    let dashboard = state
        .dashboard_service
        .plant_energy(&plant_ids, range)
        .await?;
    Ok(Json(energy_dashboard_to_json(dashboard)))
}

/// Daily energy per device of one plant
pub async fn device_energy(
    Path(plant_id): Path<String>,
    Query(query): Query<RangeQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<JsonEnergyDashboard>> {
    let range = resolve_range(
        query.start.as_deref(),
        query.end.as_deref(),
        query.last_days,
        &state.defaults,
        Utc::now(),
    )?;

    let dashboard = state
        .dashboard_service
        .device_energy(&plant_id, range)
        .await?;
    Ok(Json(energy_dashboard_to_json(dashboard)))
}

/// Bucketed measures of one device variable
pub async fn device_measures(
    Path((plant_id, device_id)): Path<(String, String)>,
    Query(params): Query<MeasureParams>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<JsonMeasureChart>> {
    let variable = params
        .variable
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest("variable is required".to_string()))?;
    let range = resolve_range(
        params.start.as_deref(),
        params.end.as_deref(),
        params.last_days,
        &state.defaults,
        Utc::now(),
    )?;
    let interval_minutes = params
        .interval_minutes
        .unwrap_or(state.defaults.default_interval_minutes);

    let chart = state
        .dashboard_service
        .measure_chart(&plant_id, &device_id, variable, range, interval_minutes)
        .await?;
    Ok(Json(measure_chart_to_json(chart)))
}

/// Explicit `start`/`end` days win; otherwise the last `last_days` days up to
/// `now`. `now` is read once per request by the caller. Windows longer than
/// `max_days` are rejected.
fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    last_days: Option<u32>,
    settings: &DashboardSettings,
    now: DateTime<Utc>,
) -> ApiResult<DateRange> {
    let max_days = settings.max_days;
    match (start, end) {
        (Some(start), Some(end)) => {
            let range = DateRange::from_days(parse_day(start)?, parse_day(end)?);
            if range.day_count() > i64::from(max_days) {
                return Err(ApiError::BadRequest(format!(
                    "range spans {} days, at most {} allowed",
                    range.day_count(),
                    max_days
                )));
            }
            Ok(range)
        }
        (None, None) => {
            let days = last_days.unwrap_or(settings.default_days);
            if days > max_days {
                return Err(ApiError::BadRequest(format!(
                    "last_days must be at most {}",
                    max_days
                )));
            }
            Ok(last_n_days(days, now))
        }
        _ => Err(ApiError::BadRequest(
            "start and end must be given together".to_string(),
        )),
    }
}

fn parse_day(value: &str) -> ApiResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ApiError::BadRequest(format!("invalid date '{}', expected YYYY-MM-DD", value)))
}

fn split_ids(ids: Option<&str>) -> Vec<String> {
    ids.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
