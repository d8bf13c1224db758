use serde::Deserialize;

/// One line-item donation from the funding feed.
///
/// Every field is kept as the text found in the feed. `amount` and `date` are
/// interpreted later by the amount parser and the sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundingRecord {
    pub funder: String,
    pub recipient: String,
    pub amount: String,
    pub date: String,
    pub source_url: String,
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct CsvFundingRecord {
    #[serde(default)]
    pub funder: String,
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub notes: String,
}

impl CsvFundingRecord {
    pub fn is_blank(&self) -> bool {
        [
            &self.funder,
            &self.recipient,
            &self.amount,
            &self.date,
            &self.source_url,
            &self.notes,
        ]
        .iter()
        .all(|field| field.is_empty())
    }
}

impl From<CsvFundingRecord> for FundingRecord {
    fn from(csv: CsvFundingRecord) -> Self {
        FundingRecord {
            funder: csv.funder,
            recipient: csv.recipient,
            amount: csv.amount,
            date: csv.date,
            source_url: csv.source_url,
            notes: csv.notes,
        }
    }
}

impl FundingRecord {
    pub fn new(funder: &str, recipient: &str, amount: &str, date: &str) -> Self {
        Self {
            funder: funder.to_string(),
            recipient: recipient.to_string(),
            amount: amount.to_string(),
            date: date.to_string(),
            source_url: String::new(),
            notes: String::new(),
        }
    }

    pub fn with_source_url(mut self, source_url: &str) -> Self {
        self.source_url = source_url.to_string();
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    /// All fields in column order, used by the free-text search.
    pub fn fields(&self) -> [&str; 6] {
        [
            self.funder.as_str(),
            self.recipient.as_str(),
            self.amount.as_str(),
            self.date.as_str(),
            self.source_url.as_str(),
            self.notes.as_str(),
        ]
    }

    /// The leading `YYYY` of the date, if it parses.
    pub fn year(&self) -> Option<i32> {
        self.date.split('/').next()?.trim().parse().ok()
    }
}
