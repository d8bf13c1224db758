use crate::args::{Args, OutputFormat, SortOrder};
use crate::engine::filter::{FilterState, SortDirection};
use crate::source::FeedSource;

/// Everything one run needs, resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: FeedSource,
    pub filters: FilterState,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: FeedSource::default(),
            filters: FilterState::default(),
            format: OutputFormat::Table,
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        let source = args.source().map(FeedSource::parse).unwrap_or_default();
        let sort_direction = match args.sort() {
            SortOrder::Asc => SortDirection::Ascending,
            SortOrder::Desc => SortDirection::Descending,
        };

        Self {
            source,
            filters: FilterState {
                search_query: args.search().to_string(),
                funder: args.funder().to_string(),
                recipient: args.recipient().to_string(),
                year: args.year().to_string(),
                sort_direction,
            },
            format: args.format(),
        }
    }
}
