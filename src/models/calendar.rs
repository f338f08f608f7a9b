use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{EpiWeekError, EpiWeekResult};

/// Start and end of one Brazilian epidemiological year.
///
/// The surveillance calendar is published by SINAN
/// (<https://portalsinan.saude.gov.br/calendario-epidemiologico-2020/43-institucional>)
/// and does not follow ISO week numbering, so boundaries are hand-curated
/// constants rather than computed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBoundary {
    pub year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl YearBoundary {
    pub fn new(year: i32, start: NaiveDate, end: NaiveDate) -> Self {
        Self { year, start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in this epidemiological year, both boundaries included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// 1-based week number of `date` within this year, counting consecutive
    /// 7-day windows from `start`. `None` when the date is not contained.
    pub fn week_of(&self, date: NaiveDate) -> Option<u32> {
        if !self.contains(date) {
            return None;
        }
        Some(((date - self.start).num_days() / 7 + 1) as u32)
    }

    /// Total number of weeks, 52 or 53 depending on the published span.
    /// The last week absorbs the remainder when the span is not a multiple
    /// of seven days.
    pub fn num_weeks(&self) -> u32 {
        ((self.days() + 6) / 7) as u32
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("data inválida no calendário epidemiológico")
}

/// Epidemiological year boundaries as published by the Ministry of Health.
///
/// Coverage is extended by appending new literal entries once the official
/// calendar for a year is released. The table is validated on first access.
pub static EPI_CALENDAR: Lazy<Vec<YearBoundary>> = Lazy::new(|| {
    let table = vec![
        YearBoundary::new(2012, date(2012, 1, 1), date(2012, 12, 29)),
        YearBoundary::new(2013, date(2012, 12, 30), date(2013, 12, 28)),
        YearBoundary::new(2014, date(2013, 12, 29), date(2015, 1, 3)),
        YearBoundary::new(2015, date(2015, 1, 4), date(2016, 1, 2)),
        YearBoundary::new(2016, date(2016, 1, 3), date(2016, 12, 31)),
        YearBoundary::new(2017, date(2017, 1, 1), date(2017, 12, 30)),
        YearBoundary::new(2018, date(2017, 12, 31), date(2018, 12, 29)),
        YearBoundary::new(2019, date(2018, 12, 30), date(2019, 12, 28)),
        YearBoundary::new(2020, date(2019, 12, 29), date(2021, 1, 2)),
        YearBoundary::new(2021, date(2021, 1, 3), date(2022, 1, 1)),
        YearBoundary::new(2022, date(2022, 1, 2), date(2023, 1, 1)),
    ];
    validate(&table).expect("calendário epidemiológico inconsistente");
    table
});

/// Checks the structural invariants of a boundary table: non-empty, every
/// start before its end, years strictly ascending and spans contiguous
/// (each start exactly one day after the previous end).
pub fn validate(table: &[YearBoundary]) -> EpiWeekResult<()> {
    if table.is_empty() {
        return Err(EpiWeekError::Calendar("empty boundary table".to_string()));
    }
    for boundary in table {
        if boundary.start > boundary.end {
            return Err(EpiWeekError::Calendar(format!(
                "year {} starts ({}) after it ends ({})",
                boundary.year, boundary.start, boundary.end
            )));
        }
    }
    for pair in table.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.year <= prev.year {
            return Err(EpiWeekError::Calendar(format!(
                "years not in ascending order: {} then {}",
                prev.year, next.year
            )));
        }
        if prev.end.succ_opt() != Some(next.start) {
            return Err(EpiWeekError::Calendar(format!(
                "gap or overlap between {} (ends {}) and {} (starts {})",
                prev.year, prev.end, next.year, next.start
            )));
        }
    }
    Ok(())
}

/// Finds the boundary containing `date`. At most one entry matches because
/// the table is contiguous and non-overlapping.
pub fn boundary_for(date: NaiveDate) -> Option<&'static YearBoundary> {
    EPI_CALENDAR.iter().find(|boundary| boundary.contains(date))
}

pub fn boundary_for_year(year: i32) -> Option<&'static YearBoundary> {
    EPI_CALENDAR.iter().find(|boundary| boundary.year == year)
}

/// First and last date covered by the calendar, both inclusive.
pub fn coverage() -> (NaiveDate, NaiveDate) {
    let table = &*EPI_CALENDAR;
    (table[0].start, table[table.len() - 1].end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_2012_to_2022() {
        assert_eq!(EPI_CALENDAR.len(), 11);
        let years: Vec<i32> = EPI_CALENDAR.iter().map(|b| b.year).collect();
        assert_eq!(years, (2012..=2022).collect::<Vec<i32>>());
    }

    #[test]
    fn test_table_is_valid() {
        assert!(validate(&EPI_CALENDAR).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        assert!(validate(&[]).is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_boundary() {
        let table = vec![YearBoundary::new(2012, date(2012, 12, 29), date(2012, 1, 1))];
        assert!(validate(&table).is_err());
    }

    #[test]
    fn test_validate_rejects_gap() {
        let table = vec![
            YearBoundary::new(2012, date(2012, 1, 1), date(2012, 12, 29)),
            // Starts one day too late, leaving 2012-12-30 unassigned
            YearBoundary::new(2013, date(2012, 12, 31), date(2013, 12, 28)),
        ];
        assert!(validate(&table).is_err());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let table = vec![
            YearBoundary::new(2012, date(2012, 1, 1), date(2012, 12, 29)),
            YearBoundary::new(2013, date(2012, 12, 29), date(2013, 12, 28)),
        ];
        assert!(validate(&table).is_err());
    }

    #[test]
    fn test_validate_rejects_unsorted_years() {
        let table = vec![
            YearBoundary::new(2013, date(2012, 12, 30), date(2013, 12, 28)),
            YearBoundary::new(2012, date(2013, 12, 29), date(2015, 1, 3)),
        ];
        assert!(validate(&table).is_err());
    }

    #[test]
    fn test_boundary_for_inner_and_edge_dates() {
        let boundary = boundary_for(date(2019, 6, 15)).unwrap();
        assert_eq!(boundary.year, 2019);

        // Both edges of 2020 belong to 2020
        assert_eq!(boundary_for(date(2019, 12, 29)).unwrap().year, 2020);
        assert_eq!(boundary_for(date(2021, 1, 2)).unwrap().year, 2020);
    }

    #[test]
    fn test_boundary_for_out_of_coverage() {
        assert!(boundary_for(date(2011, 12, 31)).is_none());
        assert!(boundary_for(date(2023, 1, 2)).is_none());
    }

    #[test]
    fn test_boundary_for_year() {
        assert_eq!(boundary_for_year(2016).unwrap().start, date(2016, 1, 3));
        assert!(boundary_for_year(2011).is_none());
        assert!(boundary_for_year(2023).is_none());
    }

    #[test]
    fn test_coverage_span() {
        let (start, end) = coverage();
        assert_eq!(start, date(2012, 1, 1));
        assert_eq!(end, date(2023, 1, 1));
    }

    #[test]
    fn test_num_weeks_per_year() {
        // 2014, 2020 and 2022 are the long years in the published table
        let expected = [
            (2012, 52),
            (2013, 52),
            (2014, 53),
            (2015, 52),
            (2016, 52),
            (2017, 52),
            (2018, 52),
            (2019, 52),
            (2020, 53),
            (2021, 52),
            (2022, 53),
        ];
        for (year, weeks) in expected {
            let boundary = boundary_for_year(year).unwrap();
            assert_eq!(boundary.num_weeks(), weeks, "year {}", year);
            assert_eq!(boundary.week_of(boundary.end), Some(weeks), "year {}", year);
        }
    }

    #[test]
    fn test_week_of_outside_boundary() {
        let boundary = boundary_for_year(2019).unwrap();
        assert_eq!(boundary.week_of(date(2019, 12, 29)), None);
        assert_eq!(boundary.week_of(date(2018, 12, 29)), None);
    }

    #[test]
    fn test_last_week_of_2022_is_one_day_long() {
        let boundary = boundary_for_year(2022).unwrap();
        assert_eq!(boundary.days(), 365);
        assert_eq!(boundary.week_of(date(2023, 1, 1)), Some(53));
        assert_eq!(boundary.week_of(date(2022, 12, 31)), Some(52));
    }

    #[test]
    fn test_boundary_serialization() {
        let boundary = YearBoundary::new(2020, date(2019, 12, 29), date(2021, 1, 2));
        let json = serde_json::to_string(&boundary).unwrap();
        let back: YearBoundary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, boundary);
    }
}
