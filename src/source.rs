use crate::error::LoadError;

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use tracing::{debug, info};

pub const DEFAULT_FEED_URL: &str = "https://raw.githubusercontent.com/bitcoin-dev-project/who-funds-bitcoin-development/refs/heads/main/funding.csv";

/// Where the funding CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Url(String),
    Path(PathBuf),
}

impl Default for FeedSource {
    fn default() -> Self {
        FeedSource::Url(DEFAULT_FEED_URL.to_string())
    }
}

impl FeedSource {
    /// Anything starting with `http://` or `https://` is fetched, everything else is a file.
    pub fn parse(value: &str) -> Self {
        let lower = value.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            FeedSource::Url(value.to_string())
        } else {
            FeedSource::Path(PathBuf::from(value))
        }
    }

    /// Reads the raw CSV text. A single attempt: no retry, no timeout.
    pub async fn fetch_text(&self) -> Result<String, LoadError> {
        match self {
            FeedSource::Url(url) => {
                info!("Fetching funding feed from {}", url);
                let response = reqwest::get(url).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                let text = response.text().await?;
                debug!("Received {} bytes", text.len());
                Ok(text)
            }
            FeedSource::Path(path) => {
                info!("Reading funding feed from {}", path.display());
                Ok(tokio::fs::read_to_string(path).await?)
            }
        }
    }
}

impl Display for FeedSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FeedSource::Url(url) => f.write_str(url),
            FeedSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
