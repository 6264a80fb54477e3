// Totals and shares across aligned series (pie/donut views)
use super::telemetry::{AggregateTotal, AlignedSeries};

/// Sum each series and express it as a percentage of the grand total.
/// Percentages are all zero when nothing was produced. No rounding.
pub fn aggregate_totals(aligned: &[AlignedSeries]) -> Vec<AggregateTotal> {
    let totals: Vec<f64> = aligned.iter().map(|s| s.data.iter().sum()).collect();
    let grand_total: f64 = totals.iter().sum();

    aligned
        .iter()
        .zip(totals)
        .map(|(series, total)| AggregateTotal {
            entity: series.entity.clone(),
            color: series.color.clone(),
            total,
            percentage: if grand_total > 0.0 {
                total / grand_total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}
