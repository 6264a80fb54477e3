// Mapper to convert domain models to JSON wire types
use crate::domain::dashboard::{EnergyDashboard, MeasureChart};
use crate::domain::entity::CatalogEntry;
use crate::domain::telemetry::{AggregateTotal, AlignedSeries, Bucket};
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq)]
pub struct JsonEnergyDashboard {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<JsonSeries>,
    pub totals: Vec<JsonTotal>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct JsonSeries {
    pub id: String,
    pub name: String,
    pub color: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct JsonTotal {
    pub id: String,
    pub name: String,
    pub color: String,
    pub total: f64,
    pub percentage: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct JsonMeasureChart {
    pub title: String,
    pub variable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub interval_ms: i64,
    pub points: Vec<JsonPoint>,
}

/// `{x: epoch millis, y: value}` as generic time-series charts expect.
#[derive(Debug, Serialize, PartialEq)]
pub struct JsonPoint {
    pub x: i64,
    pub y: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct JsonCatalogEntry {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<JsonCatalogEntry>,
}

pub fn energy_dashboard_to_json(dashboard: EnergyDashboard) -> JsonEnergyDashboard {
    JsonEnergyDashboard {
        title: dashboard.title,
        labels: dashboard.labels,
        series: dashboard.series.into_iter().map(series_to_json).collect(),
        totals: dashboard.totals.into_iter().map(total_to_json).collect(),
    }
}

pub fn measure_chart_to_json(chart: MeasureChart) -> JsonMeasureChart {
    JsonMeasureChart {
        title: chart.title,
        variable: chart.variable,
        unit: chart.unit,
        interval_ms: chart.interval_ms,
        points: chart.points.into_iter().map(point_to_json).collect(),
    }
}

pub fn catalog_entry_to_json(entry: CatalogEntry) -> JsonCatalogEntry {
    JsonCatalogEntry {
        id: entry.entity.id,
        name: entry.entity.display_name,
        color: entry.color,
        devices: entry.devices.into_iter().map(catalog_entry_to_json).collect(),
    }
}

fn series_to_json(series: AlignedSeries) -> JsonSeries {
    JsonSeries {
        id: series.entity.id,
        name: series.entity.display_name,
        color: series.color,
        data: series.data,
    }
}

fn total_to_json(total: AggregateTotal) -> JsonTotal {
    JsonTotal {
        id: total.entity.id,
        name: total.entity.display_name,
        color: total.color,
        total: total.total,
        percentage: total.percentage,
    }
}

fn point_to_json(bucket: Bucket) -> JsonPoint {
    JsonPoint {
        x: bucket.start_ms,
        y: bucket.value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Entity;
    use serde_json::json;

    #[test]
    fn test_measure_chart_shape() {
        let chart = MeasureChart {
            title: "Inverter 1 - Active power".into(),
            variable: "outputActivePower".into(),
            unit: None,
            interval_ms: 600_000,
            points: vec![Bucket::new(1_735_689_600_000, 12.5)],
        };

        let value = serde_json::to_value(measure_chart_to_json(chart)).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Inverter 1 - Active power",
                "variable": "outputActivePower",
                "interval_ms": 600_000,
                "points": [{"x": 1_735_689_600_000_i64, "y": 12.5}]
            })
        );
    }

    #[test]
    fn test_energy_dashboard_shape() {
        let entity = Entity::new("north", Some("North Field".into()), None);
        let dashboard = EnergyDashboard::new(
            "Daily energy".into(),
            vec!["01/01".into()],
            vec![AlignedSeries::new(entity.clone(), "#111".into(), vec![4.0])],
            vec![AggregateTotal {
                entity,
                color: "#111".into(),
                total: 4.0,
                percentage: 100.0,
            }],
        );

        let value = serde_json::to_value(energy_dashboard_to_json(dashboard)).unwrap();
        assert_eq!(value["series"][0]["name"], "North Field");
        assert_eq!(value["series"][0]["data"], json!([4.0]));
        assert_eq!(value["totals"][0]["percentage"], json!(100.0));
        assert_eq!(value["labels"], json!(["01/01"]));
    }
}
