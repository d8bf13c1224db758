pub mod aggregate;
pub mod amount;
pub mod args;
pub mod config;
pub mod engine;
pub mod error;
pub mod record;
pub mod render;
pub mod session;
pub mod source;

pub use crate::config::Config;
pub use crate::error::{DataError, LoadError};
pub use crate::record::FundingRecord;
pub use crate::session::{LoadState, Session};
pub use crate::source::FeedSource;

use crate::record::CsvFundingRecord;
use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, warn};

/// Parses feed text into records, in row order.
///
/// Columns are matched by header name. Rows with every field empty are dropped.
/// Short rows keep their missing trailing fields empty. Malformed CSV fails the whole load.
pub fn parse_funding_csv(text: &str) -> Result<Vec<FundingRecord>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.deserialize::<CsvFundingRecord>() {
        let row = result?;
        if row.is_blank() {
            skipped += 1;
            continue;
        }
        records.push(FundingRecord::from(row));
    }

    if skipped > 0 {
        warn!("Skipping {} empty CSV rows", skipped);
    }
    debug!("Parsed {} funding records", records.len());
    Ok(records)
}

pub async fn read_funding_csv<P: AsRef<Path>>(path: P) -> Result<Vec<FundingRecord>, LoadError> {
    let text = tokio::fs::read_to_string(path).await?;
    parse_funding_csv(&text)
}

pub async fn load_funding_records(source: &FeedSource) -> Result<Vec<FundingRecord>, LoadError> {
    let text = source.fetch_text().await?;
    parse_funding_csv(&text)
}
