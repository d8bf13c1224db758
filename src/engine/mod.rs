pub mod filter;
pub mod stats;


pub use filter::{apply, FilterOptions, FilterState, SortDirection, ALL};
pub use stats::{compute_statistics, format_totals, summary_subtitle, DerivedStatistics, YearRange};
