use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{EpiWeekError, EpiWeekResult};
use crate::models::calendar::boundary_for;

/// Memoized dates kept before the cache is reset
const WEEK_CACHE_CAPACITY: usize = 4096;

static WEEK_CACHE: Lazy<Mutex<HashMap<NaiveDate, EpidemiologicalWeek>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// An epidemiological year and week number pair, e.g. week 53 of 2020.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EpidemiologicalWeek {
    pub year: i32,
    pub week: u32,
}

impl EpidemiologicalWeek {
    pub fn new(year: i32, week: u32) -> Self {
        Self { year, week }
    }

    /// Calculates the Brazilian epidemiological week for a calendar date.
    ///
    /// The date is matched against the published year boundaries and the week
    /// is the 1-based 7-day window counted from that year's start. Note that
    /// the epidemiological year can differ from the calendar year around the
    /// turn of the year.
    ///
    /// # Arguments
    /// * `date` - Any date within the covered calendar
    ///
    /// # Returns
    /// * `Ok(EpidemiologicalWeek)` - Year and week number
    /// * `Err(EpiWeekError::DateOutOfRange)` - Date outside the covered calendar
    ///
    /// # Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use epiweek_br::EpidemiologicalWeek;
    ///
    /// let date = NaiveDate::from_ymd_opt(2021, 1, 2).unwrap();
    /// let week = EpidemiologicalWeek::for_date(date).unwrap();
    /// assert_eq!(week.as_pair(), (2020, 53));
    ///
    /// let date = NaiveDate::from_ymd_opt(2021, 1, 3).unwrap();
    /// let week = EpidemiologicalWeek::for_date(date).unwrap();
    /// assert_eq!(week.as_pair(), (2021, 1));
    /// ```
    pub fn for_date(date: NaiveDate) -> EpiWeekResult<Self> {
        let boundary = boundary_for(date).ok_or(EpiWeekError::DateOutOfRange(date))?;
        let week = boundary
            .week_of(date)
            .ok_or(EpiWeekError::DateOutOfRange(date))?;
        Ok(Self::new(boundary.year, week))
    }

    /// Memoized variant of [`Self::for_date`]. Results are identical; only
    /// repeated lookups for the same date are served from a bounded cache.
    pub fn for_date_cached(date: NaiveDate) -> EpiWeekResult<Self> {
        let mut cache = WEEK_CACHE.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = cache.get(&date) {
            return Ok(*hit);
        }
        let week = Self::for_date(date)?;
        if cache.len() >= WEEK_CACHE_CAPACITY {
            log::debug!("week cache full, resetting {} entries", cache.len());
            cache.clear();
        }
        cache.insert(date, week);
        Ok(week)
    }

    /// Async version of for_date
    pub async fn for_date_async(date: NaiveDate) -> EpiWeekResult<Self> {
        // The computation is synchronous over constant data; just yield
        tokio::task::yield_now().await;
        Self::for_date(date)
    }

    /// Async version of for_date_cached
    pub async fn for_date_cached_async(date: NaiveDate) -> EpiWeekResult<Self> {
        tokio::task::yield_now().await;
        Self::for_date_cached(date)
    }

    /// The `(epidemiological_year, week_number)` pair.
    pub fn as_pair(&self) -> (i32, u32) {
        (self.year, self.week)
    }
}

impl fmt::Display for EpidemiologicalWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "SE" is the official "Semana Epidemiológica" notation
        write!(f, "SE{:02}/{}", self.week, self.year)
    }
}
