use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;

/// One calendar day, the step used when walking boundary spans
pub static ONE_DAY: Lazy<Duration> = Lazy::new(|| Duration::days(1));

/// Step size for [`date_range`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeStep {
    Daily,
    Weekly,
}

impl RangeStep {
    fn as_duration(self) -> Duration {
        match self {
            RangeStep::Daily => Duration::days(1),
            RangeStep::Weekly => Duration::days(7),
        }
    }
}

/// Iterator produced by [`date_range`]
#[derive(Debug, Clone)]
pub struct DateRange {
    next: NaiveDate,
    stop: NaiveDate,
    step: Duration,
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.next >= self.stop {
            return None;
        }
        let current = self.next;
        self.next = current + self.step;
        Some(current)
    }
}

/// Iterates dates from `start` (inclusive) up to `stop` (exclusive).
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use epiweek_br::{date_range, RangeStep};
///
/// let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let stop = NaiveDate::from_ymd_opt(2020, 1, 4).unwrap();
/// let days: Vec<_> = date_range(start, stop, RangeStep::Daily).collect();
/// assert_eq!(days.len(), 3);
/// ```
pub fn date_range(start: NaiveDate, stop: NaiveDate, step: RangeStep) -> DateRange {
    DateRange {
        next: start,
        stop,
        step: step.as_duration(),
    }
}
