use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to fetch funding feed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Funding feed returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read funding feed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse funding CSV: {0}")]
    Parse(#[from] csv::Error),
}

impl LoadError {
    /// The message shown in place of the table when a load fails.
    pub fn display_message(&self) -> &'static str {
        match self {
            LoadError::Parse(_) => "Error parsing CSV data",
            LoadError::Fetch(_) | LoadError::Status { .. } | LoadError::Io(_) => {
                "Error loading funding data"
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Invalid aggregate dataset: {0}")]
    Json(#[from] serde_json::Error),
}
