use crate::aggregate::AggregateRecord;
use crate::amount::{AmountField, ParsedAmount, Unit};
use crate::engine::filter::{FilterState, ALL};
use crate::record::FundingRecord;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedStatistics {
    pub unique_funder_count: usize,
    pub unique_recipient_count: usize,
    /// Only line items count here, aggregates never widen the range.
    pub year_range: Option<YearRange>,
    pub total_usd: Decimal,
    pub total_btc: Decimal,
    /// Set when an included aggregate undercounts what was actually given.
    pub has_incomplete_amount: bool,
}

#[derive(Debug, Default)]
struct Totals {
    usd: Decimal,
    btc: Decimal,
}

impl Totals {
    fn add(&mut self, amount: ParsedAmount) {
        match amount.unit {
            Unit::Usd => self.usd += amount.value,
            Unit::Btc => self.btc += amount.value,
        }
    }

    fn add_raw(&mut self, raw: &str) {
        if let Some(amount) = AmountField::parse(raw).contribution() {
            self.add(amount);
        }
    }
}

/// Stand-in recipient identities for aggregates, one per counted recipient.
///
/// Aggregates only carry a count, so these keys keep the recipient tally a plain
/// distinct count over a single set.
pub fn recipient_placeholders(aggregates: &[AggregateRecord]) -> Vec<String> {
    let total: u32 = aggregates.iter().map(|agg| agg.recipient_count).sum();
    (0..total)
        .map(|i| format!("aggregate_recipient_{i}"))
        .collect()
}

pub fn year_range(records: &[FundingRecord]) -> Option<YearRange> {
    let years = records
        .iter()
        .filter_map(FundingRecord::year)
        .filter(|year| *year != 0);

    years.fold(None, |range, year| match range {
        None => Some(YearRange {
            min: year,
            max: year,
        }),
        Some(r) => Some(YearRange {
            min: r.min.min(year),
            max: r.max.max(year),
        }),
    })
}

/// Statistics over the filtered line items. Aggregates are folded in only when no
/// filter is active, since they cannot be filtered themselves.
pub fn compute_statistics(
    filtered: &[FundingRecord],
    aggregates: &[AggregateRecord],
    filters_active: bool,
) -> DerivedStatistics {
    let mut funders: HashSet<&str> = filtered.iter().map(|r| r.funder.as_str()).collect();
    let mut recipients: HashSet<String> = filtered.iter().map(|r| r.recipient.clone()).collect();

    let mut totals = Totals::default();
    for record in filtered {
        totals.add_raw(&record.amount);
    }

    let mut has_incomplete_amount = false;
    if !filters_active {
        for agg in aggregates {
            funders.insert(agg.funder.as_str());
            totals.add_raw(&agg.amount);
            has_incomplete_amount |= agg.is_incomplete;
        }
        recipients.extend(recipient_placeholders(aggregates));
    }

    DerivedStatistics {
        unique_funder_count: funders.len(),
        unique_recipient_count: recipients.len(),
        year_range: year_range(filtered),
        total_usd: totals.usd,
        total_btc: totals.btc,
        has_incomplete_amount,
    }
}

fn format_usd(value: Decimal) -> String {
    let whole = value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default();
    format!("${}", format_num::format_num!(",.0f", whole))
}

fn format_btc(value: Decimal) -> String {
    format!(
        "{:.2} BTC",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// `"$500,000 & 1.50 BTC"`. A currency with nothing summed is left out, and a `+`
/// marks a total that is a lower bound.
pub fn format_totals(stats: &DerivedStatistics) -> String {
    let mut formatted = match (stats.total_usd.is_zero(), stats.total_btc.is_zero()) {
        (_, true) => format_usd(stats.total_usd),
        (true, false) => format_btc(stats.total_btc),
        (false, false) => format!(
            "{} & {}",
            format_usd(stats.total_usd),
            format_btc(stats.total_btc)
        ),
    };
    if stats.has_incomplete_amount {
        formatted.push('+');
    }
    formatted
}

/// The sentence under the totals, e.g. `"from 7 donors to 60 recipients from 2015 to 2024"`.
pub fn summary_subtitle(stats: &DerivedStatistics, state: &FilterState) -> String {
    let mut parts = Vec::new();

    if state.funder != ALL {
        parts.push(format!("from {}", state.funder));
    } else {
        let noun = if stats.unique_funder_count == 1 {
            "funder"
        } else {
            "donors"
        };
        parts.push(format!("from {} {noun}", stats.unique_funder_count));
    }

    if state.recipient != ALL {
        parts.push(format!("to {}", state.recipient));
    } else {
        let noun = if stats.unique_recipient_count == 1 {
            "recipient"
        } else {
            "recipients"
        };
        parts.push(format!("to {} {noun}", stats.unique_recipient_count));
    }

    if state.year != ALL {
        parts.push(format!("in {}", state.year));
    } else if let Some(range) = stats.year_range {
        if range.min == range.max {
            parts.push(format!("in {}", range.min));
        } else {
            parts.push(format!("from {} to {}", range.min, range.max));
        }
    }

    if state.has_active_filters() {
        parts.push("(excluding aggregate donations)".to_string());
    }

    parts.join(" ")
}
