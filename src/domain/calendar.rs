// UTC day windows and the canonical day labels charts align to
use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc};

/// Query window. Daily charts treat both ends as UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `first` at 00:00:00.000 through `last` at 23:59:59.999, UTC.
    pub fn from_days(first: NaiveDate, last: NaiveDate) -> Self {
        Self {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    /// Compared on UTC days, so a same-day window is never empty.
    pub fn is_empty(&self) -> bool {
        self.start.date_naive() > self.end.date_naive()
    }

    /// Number of UTC calendar days covered, zero when empty.
    pub fn day_count(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        (self.end.date_naive() - self.start.date_naive()).num_days() + 1
    }

    /// Start/end bounds the backend expects: `...T00:00:00Z` / `...T23:59:59Z`.
    pub fn query_bounds(&self) -> (String, String) {
        (
            format!("{}T00:00:00Z", self.start.date_naive().format("%Y-%m-%d")),
            format!("{}T23:59:59Z", self.end.date_naive().format("%Y-%m-%d")),
        )
    }
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(day: NaiveDate) -> DateTime<Utc> {
    start_of_day(day)
        .checked_add_signed(TimeDelta::days(1))
        .map(|next| next - TimeDelta::milliseconds(1))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// The last `n` whole UTC days ending on the day of `reference`.
/// `n == 0` is treated as 1 so the window always holds the reference day.
pub fn last_n_days(n: u32, reference: DateTime<Utc>) -> DateRange {
    let last = reference.date_naive();
    let span = u64::from(n.max(1) - 1);
    let first = last.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);
    DateRange::from_days(first, last)
}

/// Every UTC calendar day touched by `range`, ascending. Empty when the
/// range is inverted.
pub fn label_days(range: &DateRange) -> Vec<NaiveDate> {
    if range.is_empty() {
        return Vec::new();
    }

    let last = range.end.date_naive();
    let mut days = Vec::new();
    let mut day = range.start.date_naive();
    while day <= last {
        days.push(day);
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}

/// `DD/MM` label for a day.
pub fn day_label(day: NaiveDate) -> String {
    day.format("%d/%m").to_string()
}

pub fn label_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<String> {
    label_days(&DateRange::new(start, end))
        .into_iter()
        .map(day_label)
        .collect()
}
