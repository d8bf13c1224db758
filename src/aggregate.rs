//! Summary donation entries shipped with the crate.
//!
//! An aggregate covers many recipients over a span of time and is shown apart from
//! the line items of the live feed. Only the recipient count is known, not the names.

use crate::error::DataError;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::debug;

const BUNDLED_AGGREGATES: &str = include_str!("../data/funding_aggregates.json");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRecord {
    pub funder: String,
    #[serde(deserialize_with = "deserialize_recipient_count")]
    pub recipient_count: u32,
    pub amount: String,
    #[serde(rename = "source_url", default)]
    pub source_url: String,
    #[serde(rename = "source_urls", default)]
    pub source_urls: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub date_range: String,
    #[serde(default)]
    pub is_incomplete: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecipientCount {
    Count(u32),
    Name(IgnoredAny),
}

/// A named recipient stands for a single recipient.
fn deserialize_recipient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawRecipientCount::deserialize(deserializer)? {
        RawRecipientCount::Count(count) => count,
        RawRecipientCount::Name(_) => 1,
    })
}

impl AggregateRecord {
    pub fn recipients_label(&self) -> String {
        format!("{} recipients", self.recipient_count)
    }

    /// The main source link, with a count of the supporting links behind it.
    pub fn source_label(&self) -> String {
        let main = if self.source_url.is_empty() {
            "-"
        } else {
            self.source_url.as_str()
        };
        match self.source_urls.len() {
            0 => main.to_string(),
            n => format!("{main} (+{n} more)"),
        }
    }

    pub fn date_range_label(&self) -> &str {
        if self.date_range.is_empty() {
            "-"
        } else {
            &self.date_range
        }
    }
}

pub fn parse_aggregates(json: &str) -> Result<Vec<AggregateRecord>, DataError> {
    let aggregates: Vec<AggregateRecord> = serde_json::from_str(json)?;
    debug!("Loaded {} aggregate donation entries", aggregates.len());
    Ok(aggregates)
}

/// The aggregate dataset compiled into the crate.
pub fn bundled_aggregates() -> Result<Vec<AggregateRecord>, DataError> {
    parse_aggregates(BUNDLED_AGGREGATES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset_loads() {
        let aggregates = bundled_aggregates().unwrap();
        assert_eq!(aggregates.len(), 5);
        assert_eq!(aggregates[0].funder, "Spiral");
        assert_eq!(aggregates[0].recipient_count, 15);
        assert_eq!(aggregates[0].amount, "12,500,000 USD");
        assert!(aggregates.iter().all(|agg| !agg.is_incomplete));

        let total: u32 = aggregates.iter().map(|agg| agg.recipient_count).sum();
        assert_eq!(total, 56);
    }

    #[test]
    fn test_string_recipient_count_is_one() {
        let json = r#"[
            {"funder": "Example", "recipientCount": "Brink", "amount": "10 BTC",
             "source_url": "", "notes": "", "dateRange": "2020-2022", "isIncomplete": true}
        ]"#;
        let aggregates = parse_aggregates(json).unwrap();
        assert_eq!(aggregates[0].recipient_count, 1);
        assert_eq!(aggregates[0].date_range, "2020-2022");
        assert!(aggregates[0].is_incomplete);
    }

    #[test]
    fn test_labels() {
        let json = r#"[{"funder": "HRF", "recipientCount": 8, "amount": "5,500,000 USD"}]"#;
        let aggregates = parse_aggregates(json).unwrap();
        assert_eq!(aggregates[0].recipients_label(), "8 recipients");
        assert_eq!(aggregates[0].date_range_label(), "-");
        assert!(aggregates[0].source_urls.is_empty());
        assert_eq!(aggregates[0].source_label(), "-");
    }

    #[test]
    fn test_source_label_counts_supporting_links() {
        let aggregates = bundled_aggregates().unwrap();
        let bitmex = aggregates.iter().find(|agg| agg.funder == "BitMEX").unwrap();
        assert_eq!(
            bitmex.source_label(),
            format!("https://blog.bitmex.com/grants/ (+{} more)", bitmex.source_urls.len())
        );
        assert_eq!(aggregates[0].source_label(), "https://spiral.xyz/");
    }

    #[test]
    fn test_invalid_dataset() {
        assert!(parse_aggregates(r#"[{"funder": "HRF"}]"#).is_err());
    }
}
