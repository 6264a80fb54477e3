// Fixed-width time bucketing with per-bucket mean
use super::error::PipelineError;
use super::sample::NormalizedPoint;
use super::telemetry::{Bucket, BucketedSeries};

/// Start of the bucket containing `time_ms`. Floors toward negative infinity.
/// `None` when the start is not representable as an `i64`.
pub fn bucket_start(time_ms: i64, interval_ms: i64) -> Option<i64> {
    time_ms.checked_div_euclid(interval_ms)?.checked_mul(interval_ms)
}

struct Accumulator {
    start: i64,
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn new(start: i64, value: f64) -> Self {
        Self {
            start,
            sum: value,
            count: 1,
        }
    }

    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn finish(self) -> Bucket {
        Bucket::new(self.start, self.sum / self.count as f64)
    }
}

/// Average points into `interval_ms` wide buckets.
///
/// Points are stable-sorted by time and walked once; a bucket is flushed as
/// soon as the next point falls into a different one. Used for power, voltage
/// and current charts. Daily energy uses [`super::alignment::daily_totals`].
pub fn bucket_mean(
    points: &[NormalizedPoint],
    interval_ms: i64,
) -> Result<BucketedSeries, PipelineError> {
    if interval_ms <= 0 {
        return Err(PipelineError::InvalidInterval(interval_ms));
    }

    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.time_ms);

    let mut buckets = Vec::new();
    let mut open: Option<Accumulator> = None;

    for point in &sorted {
        let Some(start) = bucket_start(point.time_ms, interval_ms) else {
            tracing::debug!("Skipping point at {} ms, bucket start out of range", point.time_ms);
            continue;
        };
        match open.as_mut() {
            Some(acc) if acc.start == start => acc.add(point.value),
            _ => {
                if let Some(done) = open.replace(Accumulator::new(start, point.value)) {
                    buckets.push(done.finish());
                }
            }
        }
    }

    if let Some(done) = open {
        buckets.push(done.finish());
    }

    Ok(buckets)
}
