// Per-entity daily series aligned to the canonical day labels
use super::entity::{Entity, Palette};
use super::sample::NormalizedPoint;
use super::telemetry::AlignedSeries;
use chrono::{DateTime, NaiveDate};
use std::collections::{BTreeMap, HashMap};

/// Sum of values per UTC calendar day. Energy semantics: two readings on the
/// same day add up.
pub fn daily_totals(points: &[NormalizedPoint]) -> BTreeMap<NaiveDate, f64> {
    let mut totals = BTreeMap::new();
    for point in points {
        if let Some(time) = DateTime::from_timestamp_millis(point.time_ms) {
            *totals.entry(time.date_naive()).or_insert(0.0) += point.value;
        }
    }
    totals
}

/// One series per entity, in the given order, each exactly `days.len()` long.
///
/// Entities without samples still get an all-zero series so legends and
/// stacking order don't shift between queries. Samples outside `days` are
/// ignored.
pub fn align_daily_totals(
    entities: &[Entity],
    samples_by_entity: &HashMap<String, Vec<NormalizedPoint>>,
    days: &[NaiveDate],
    palette: &Palette,
) -> Vec<AlignedSeries> {
    entities
        .iter()
        .enumerate()
        .map(|(index, entity)| {
            let totals = samples_by_entity
                .get(&entity.id)
                .map(|points| daily_totals(points))
                .unwrap_or_default();

            let data = days
                .iter()
                .map(|day| totals.get(day).copied().unwrap_or(0.0))
                .collect();

            AlignedSeries::new(entity.clone(), palette.resolve(entity, index), data)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calendar::{label_days, DateRange};
    use crate::domain::sample::{extract_points, FieldAliases, RawSample};
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn records(values: Vec<serde_json::Value>) -> Vec<RawSample> {
        values.into_iter().filter_map(RawSample::from_value).collect()
    }

    #[test]
    fn test_daily_totals_sum_same_day() {
        let points = vec![
            NormalizedPoint::new(1_735_725_600_000, 100.0), // 2025-01-01T10:00Z
            NormalizedPoint::new(1_735_740_000_000, 50.0),  // 2025-01-01T14:00Z
            NormalizedPoint::new(1_735_808_400_000, 1.0),   // 2025-01-02T09:00Z
        ];
        let totals = daily_totals(&points);

        assert_eq!(totals.get(&day(2025, 1, 1)), Some(&150.0));
        assert_eq!(totals.get(&day(2025, 1, 2)), Some(&1.0));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_raw_records_to_daily_series() {
        let raw = records(vec![
            json!({"date": "2025-01-01T10:00:00Z", "energy": 100}),
            json!({"date": "2025-01-01T14:00:00Z", "energy": 50}),
            json!({"date": "2025-01-03T09:00:00Z", "value": 30}),
        ]);
        let entities = vec![Entity::new("E1", Some("E1".into()), None)];
        let mut samples = HashMap::new();
        samples.insert("E1".to_string(), extract_points(&raw, &FieldAliases::ENERGY));

        let days = label_days(&DateRange::from_days(day(2025, 1, 1), day(2025, 1, 3)));
        let aligned = align_daily_totals(&entities, &samples, &days, &Palette::default());

        assert_eq!(aligned.len(), 1);
        assert_eq!(aligned[0].entity.display_name, "E1");
        assert_eq!(aligned[0].data, vec![150.0, 0.0, 30.0]);
    }

    #[test]
    fn test_entities_without_samples_are_kept() {
        let entities = vec![
            Entity::new("a", None, Some("#000000".into())),
            Entity::new("b", None, None),
            Entity::new("c", None, None),
        ];
        let mut samples = HashMap::new();
        samples.insert("c".to_string(), Vec::new());
        let days = vec![day(2025, 1, 1), day(2025, 1, 2)];
        let palette = Palette::new(vec!["#111".into(), "#222".into()]);

        let aligned = align_daily_totals(&entities, &samples, &days, &palette);

        let ids: Vec<&str> = aligned.iter().map(|s| s.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        for series in &aligned {
            assert_eq!(series.data, vec![0.0, 0.0]);
        }
        let colors: Vec<&str> = aligned.iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors, vec!["#000000", "#222", "#111"]);
    }

    #[test]
    fn test_samples_outside_window_ignored() {
        let entities = vec![Entity::new("a", None, None)];
        let mut samples = HashMap::new();
        samples.insert(
            "a".to_string(),
            vec![
                NormalizedPoint::new(1_735_603_200_000, 9.0), // 2024-12-31
                NormalizedPoint::new(1_735_689_600_000, 4.0), // 2025-01-01
            ],
        );
        let days = vec![day(2025, 1, 1)];

        let aligned = align_daily_totals(&entities, &samples, &days, &Palette::default());
        assert_eq!(aligned[0].data, vec![4.0]);
    }

    #[test]
    fn test_no_days_gives_empty_data() {
        let entities = vec![Entity::new("a", None, None)];
        let aligned = align_daily_totals(&entities, &HashMap::new(), &[], &Palette::default());

        assert_eq!(aligned.len(), 1);
        assert!(aligned[0].data.is_empty());
    }
}
