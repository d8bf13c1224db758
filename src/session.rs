//! The state of one viewing session: the loaded feed plus the current filters.
//!
//! Every view is derived from this state on demand and replaced wholesale; nothing
//! is patched in place.

use crate::aggregate::AggregateRecord;
use crate::engine::filter::{self, FilterOptions, FilterState};
use crate::engine::stats::{self, DerivedStatistics};
use crate::error::LoadError;
use crate::record::FundingRecord;
use crate::source::FeedSource;

use tracing::{error, info};

#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(Vec<FundingRecord>),
    /// Terminal for the session.
    Failed(LoadError),
}

#[derive(Debug)]
pub struct Session {
    aggregates: Vec<AggregateRecord>,
    load_state: LoadState,
    filters: FilterState,
}

impl Session {
    pub fn new(aggregates: Vec<AggregateRecord>) -> Self {
        Self {
            aggregates,
            load_state: LoadState::Loading,
            filters: FilterState::default(),
        }
    }

    pub fn with_records(aggregates: Vec<AggregateRecord>, records: Vec<FundingRecord>) -> Self {
        let mut session = Self::new(aggregates);
        session.finish_load(Ok(records));
        session
    }

    /// Issues the one and only fetch for this session.
    pub async fn load(&mut self, source: &FeedSource) {
        let result = crate::load_funding_records(source).await;
        self.finish_load(result);
    }

    pub fn finish_load(&mut self, result: Result<Vec<FundingRecord>, LoadError>) {
        if !matches!(self.load_state, LoadState::Loading) {
            return;
        }
        self.load_state = match result {
            Ok(records) => {
                info!("Loaded {} funding records", records.len());
                LoadState::Ready(records)
            }
            Err(e) => {
                error!("{}: {}", e.display_message(), e);
                LoadState::Failed(e)
            }
        };
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match &self.load_state {
            LoadState::Failed(e) => Some(e.display_message()),
            _ => None,
        }
    }

    /// The full feed in row order. Empty unless the load succeeded.
    pub fn records(&self) -> &[FundingRecord] {
        match &self.load_state {
            LoadState::Ready(records) => records,
            LoadState::Loading | LoadState::Failed(_) => &[],
        }
    }

    pub fn aggregates(&self) -> &[AggregateRecord] {
        &self.aggregates
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.filters.search_query = query.to_string();
    }

    pub fn set_funder(&mut self, funder: &str) {
        self.filters.funder = funder.to_string();
    }

    pub fn set_recipient(&mut self, recipient: &str) {
        self.filters.recipient = recipient.to_string();
    }

    pub fn set_year(&mut self, year: &str) {
        self.filters.year = year.to_string();
    }

    pub fn toggle_sort(&mut self) {
        self.filters.sort_direction = self.filters.sort_direction.toggled();
    }

    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset();
    }

    pub fn show_aggregates(&self) -> bool {
        !self.filters.has_active_filters()
    }

    pub fn visible_records(&self) -> Vec<FundingRecord> {
        filter::apply(self.records(), &self.filters)
    }

    pub fn statistics(&self) -> DerivedStatistics {
        stats::compute_statistics(
            &self.visible_records(),
            &self.aggregates,
            self.filters.has_active_filters(),
        )
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_records(self.records())
    }

    pub fn showing_line(&self) -> String {
        format!(
            "Showing {} of {} entries",
            self.visible_records().len(),
            self.records().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn records() -> Vec<FundingRecord> {
        vec![
            FundingRecord::new("Spiral", "Alice", "500,000 USD", "2021/07"),
            FundingRecord::new("HRF", "Bob", "1.5 BTC", "2020"),
            FundingRecord::new("Spiral", "Carol", "NA", "2022"),
        ]
    }

    #[test]
    fn test_new_session_is_loading() {
        let session = Session::new(Vec::new());
        assert!(session.is_loading());
        assert!(session.visible_records().is_empty());
        assert_eq!(session.error_message(), None);
    }

    #[test]
    fn test_failed_load_is_terminal() {
        let mut session = Session::new(Vec::new());
        let err = csv::ReaderBuilder::new()
            .from_reader("a,b\n1,2,3\n".as_bytes())
            .records()
            .find_map(|r| r.err())
            .unwrap();
        session.finish_load(Err(LoadError::Parse(err)));

        assert_eq!(session.error_message(), Some("Error parsing CSV data"));
        assert!(session.records().is_empty());

        session.finish_load(Ok(records()));
        assert!(matches!(session.load_state(), LoadState::Failed(_)));
        assert!(session.visible_records().is_empty());
    }

    #[test]
    fn test_reset_restores_full_sorted_dataset() {
        let mut session = Session::with_records(Vec::new(), records());
        let full = session.visible_records();
        assert_eq!(full.len(), 3);
        assert_eq!(full[0].date, "2022");

        session.set_funder("Spiral");
        session.set_year("2021");
        assert_eq!(session.visible_records().len(), 1);
        assert!(!session.show_aggregates());
        assert_eq!(session.showing_line(), "Showing 1 of 3 entries");

        session.reset_filters();
        assert_eq!(session.visible_records(), full);
        assert!(session.show_aggregates());
    }

    #[test]
    fn test_toggle_sort() {
        let mut session = Session::with_records(Vec::new(), records());
        session.toggle_sort();
        assert_eq!(session.visible_records()[0].date, "2020");
    }

    #[test]
    fn test_statistics_follow_filters() {
        let json = r#"[{"funder": "Superlunar", "recipientCount": 13, "amount": "1,225,000 USD"}]"#;
        let aggregates = crate::aggregate::parse_aggregates(json).unwrap();
        let mut session = Session::with_records(aggregates, records());

        let stats = session.statistics();
        assert_eq!(stats.unique_funder_count, 3);
        assert_eq!(stats.unique_recipient_count, 16);
        assert_eq!(stats.total_usd, Decimal::from(1_725_000));

        session.set_search_query("bob");
        let stats = session.statistics();
        assert_eq!(stats.unique_funder_count, 1);
        assert_eq!(stats.total_usd, Decimal::ZERO);
        assert_eq!(stats::format_totals(&stats), "1.50 BTC");
    }

    #[test]
    fn test_filter_options_come_from_full_feed() {
        let mut session = Session::with_records(Vec::new(), records());
        session.set_funder("HRF");
        let options = session.filter_options();
        assert_eq!(options.funders, vec!["HRF", "Spiral"]);
        assert_eq!(options.years, vec!["2022", "2021", "2020"]);
    }
}
