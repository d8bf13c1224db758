use crate::record::FundingRecord;

use chrono::NaiveDate;
use std::cmp::Reverse;
use std::collections::BTreeSet;
use tracing::trace;

/// Selector value meaning "no constraint".
pub const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search_query: String,
    pub funder: String,
    pub recipient: String,
    pub year: String,
    pub sort_direction: SortDirection,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            funder: ALL.to_string(),
            recipient: ALL.to_string(),
            year: ALL.to_string(),
            sort_direction: SortDirection::default(),
        }
    }
}

impl FilterState {
    pub fn has_active_filters(&self) -> bool {
        !self.search_query.is_empty()
            || self.funder != ALL
            || self.recipient != ALL
            || self.year != ALL
    }

    /// Puts the three selectors back to "all". Search text and sort order are kept.
    pub fn reset(&mut self) {
        self.funder = ALL.to_string();
        self.recipient = ALL.to_string();
        self.year = ALL.to_string();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, record: &FundingRecord) -> bool {
        self.matches_search(record)
            && (self.funder == ALL || record.funder == self.funder)
            && (self.recipient == ALL || record.recipient == self.recipient)
            && (self.year == ALL || (!record.date.is_empty() && record.date.starts_with(&self.year)))
    }

    fn matches_search(&self, record: &FundingRecord) -> bool {
        if self.search_query.is_empty() {
            return true;
        }
        let query = self.search_query.to_lowercase();
        record
            .fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

/// Sort key for a `YYYY` or `YYYY/MM` date: epoch milliseconds of the first day of
/// that month (January when the month is absent). Anything unparseable maps to 0.
pub fn date_key(date: &str) -> i64 {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return 0;
    }

    let mut parts = trimmed.split('/');
    let Some(Ok(year)) = parts.next().map(|y| y.trim().parse::<i32>()) else {
        trace!("Unparseable date {:?} sorts first", date);
        return 0;
    };
    let month = match parts.next().map(str::trim) {
        None | Some("") => 1,
        Some(m) => match m.parse::<u32>() {
            Ok(m) => m,
            Err(_) => return 0,
        },
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

pub fn filter_records(records: &[FundingRecord], state: &FilterState) -> Vec<FundingRecord> {
    records
        .iter()
        .filter(|record| state.matches(record))
        .cloned()
        .collect()
}

/// Stable sort by `date_key`. Records with equal dates keep their relative order
/// in either direction.
pub fn sort_records(records: &mut [FundingRecord], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => records.sort_by_key(|r| date_key(&r.date)),
        SortDirection::Descending => records.sort_by_key(|r| Reverse(date_key(&r.date))),
    }
}

/// Filters, then sorts. The input is left untouched.
pub fn apply(records: &[FundingRecord], state: &FilterState) -> Vec<FundingRecord> {
    let mut filtered = filter_records(records, state);
    sort_records(&mut filtered, state.sort_direction);
    trace!(
        "{} of {} records pass the current filters",
        filtered.len(),
        records.len()
    );
    filtered
}

/// Values offered by the funder, recipient and year selectors, besides "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub funders: Vec<String>,
    pub recipients: Vec<String>,
    pub years: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[FundingRecord]) -> Self {
        let funders = distinct_sorted(records.iter().map(|r| r.funder.as_str()));
        let recipients = distinct_sorted(records.iter().map(|r| r.recipient.as_str()));

        let years: BTreeSet<i32> = records.iter().filter_map(FundingRecord::year).collect();
        let years = years.iter().rev().map(|y| y.to_string()).collect();

        Self {
            funders,
            recipients,
            years,
        }
    }
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = values.filter(|v| !v.is_empty()).collect();
    let mut sorted: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    sorted.sort_by_key(|v| v.to_lowercase());
    sorted
}
