use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::errors::EpiWeekResult;
use crate::models::calendar::coverage;
use crate::models::date_utils::{ONE_DAY, RangeStep, date_range};
use crate::models::epi_week::EpidemiologicalWeek;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekTableEntry {
    pub date: NaiveDate,
    pub epidemiological_year: i32,
    pub epidemiological_week: u32,
}

/// Materialized date-to-week mapping, one entry per day of a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekTable {
    pub entries: Vec<WeekTableEntry>,
}

impl WeekTable {
    /// Builds the table for every date from `start` through `end`, both
    /// inclusive. Fails if any date falls outside the covered calendar.
    pub fn build(start: NaiveDate, end: NaiveDate) -> EpiWeekResult<Self> {
        let mut entries = Vec::new();
        for date in date_range(start, end + *ONE_DAY, RangeStep::Daily) {
            let week = EpidemiologicalWeek::for_date_cached(date)?;
            entries.push(WeekTableEntry {
                date,
                epidemiological_year: week.year,
                epidemiological_week: week.week,
            });
        }
        log::debug!("built week table with {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Builds the table for the whole covered calendar.
    pub fn full_calendar() -> EpiWeekResult<Self> {
        let (start, end) = coverage();
        Self::build(start, end)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Epidemiological years present in the table, ascending and deduplicated.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self
            .entries
            .iter()
            .map(|entry| entry.epidemiological_year)
            .collect();
        years.sort();
        years.dedup();
        years
    }

    pub async fn save_to_file(&self, path: &Path) -> EpiWeekResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).await?;
        Ok(())
    }

    pub async fn load_from_file(path: &Path) -> EpiWeekResult<Self> {
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}
