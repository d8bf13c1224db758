//! Command line interface for the `devfunds` binary.

use crate::engine::filter::ALL;
use clap::{Parser, ValueEnum};
use tracing_subscriber::filter::LevelFilter;

/// devfunds: publicly disclosed Bitcoin development funding.
///
/// Loads the funding CSV feed, applies the given filters and prints the totals, the
/// aggregated donations and the matching line items.
#[derive(Debug, Parser, Clone)]
#[command(name = "devfunds")]
pub struct Args {
    /// URL or local path of the funding CSV.
    #[arg(long, env = "DEVFUNDS_SOURCE")]
    source: Option<String>,

    /// Case-insensitive text matched against every column.
    #[arg(long, default_value = "")]
    search: String,

    /// Only show donations from this funder.
    #[arg(long, default_value = ALL)]
    funder: String,

    /// Only show donations to this recipient.
    #[arg(long, default_value = ALL)]
    recipient: String,

    /// Only show donations dated in this year.
    #[arg(long, default_value = ALL)]
    year: String,

    /// Order of the date column.
    #[arg(long, value_enum, default_value_t = SortOrder::Desc)]
    sort: SortOrder,

    /// How to print the result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Totals, aggregates, records and footnotes.
    Table,
    /// The matching records only, as CSV.
    Csv,
    /// The totals line and its subtitle.
    Summary,
}

impl Args {
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn funder(&self) -> &str {
        &self.funder
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["devfunds"]).unwrap();
        assert_eq!(args.funder(), ALL);
        assert_eq!(args.recipient(), ALL);
        assert_eq!(args.year(), ALL);
        assert_eq!(args.search(), "");
        assert_eq!(args.sort(), SortOrder::Desc);
        assert_eq!(args.format(), OutputFormat::Table);
        assert_eq!(args.log_level(), LevelFilter::WARN);
    }

    #[test]
    fn test_filters() {
        let args = Args::try_parse_from([
            "devfunds",
            "--source",
            "funding.csv",
            "--funder",
            "Spiral",
            "--year",
            "2021",
            "--sort",
            "asc",
            "--format",
            "csv",
        ])
        .unwrap();
        assert_eq!(args.source(), Some("funding.csv"));
        assert_eq!(args.funder(), "Spiral");
        assert_eq!(args.year(), "2021");
        assert_eq!(args.sort(), SortOrder::Asc);
        assert_eq!(args.format(), OutputFormat::Csv);
    }
}
