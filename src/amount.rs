//! Parsing of the free-text `amount` column.
//!
//! Amounts look like `"500,000 USD"`, `"1.5 BTC"` or `"25000"` (USD by default).
//! The literal `NA` and the empty string mean the amount was never disclosed.
//! Anything else is unparseable and is left out of totals without raising an error.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use tracing::trace;

/// Marker used by the feed for an undisclosed amount.
pub const NOT_AVAILABLE: &str = "NA";

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?)\s*(BTC|USD)?$").expect("amount pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Usd,
    Btc,
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Usd => f.write_str("USD"),
            Unit::Btc => f.write_str("BTC"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedAmount {
    pub value: Decimal,
    pub unit: Unit,
}

/// The three ways an amount cell can be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountField {
    /// `NA` or empty. Renders blank, contributes nothing.
    NotAvailable,
    Parsed(ParsedAmount),
    /// Text that does not look like an amount. Dropped from totals.
    Unparseable,
}

impl AmountField {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
            return AmountField::NotAvailable;
        }

        let cleaned = trimmed.replace(',', "");
        let Some(captures) = AMOUNT_RE.captures(&cleaned) else {
            trace!("Ignoring unparseable amount {:?}", raw);
            return AmountField::Unparseable;
        };

        let value = match Decimal::from_str(&captures[1]) {
            Ok(value) => value,
            Err(e) => {
                trace!("Ignoring out of range amount {:?}: {}", raw, e);
                return AmountField::Unparseable;
            }
        };
        let unit = match captures.get(2).map(|m| m.as_str()) {
            Some("BTC") => Unit::Btc,
            _ => Unit::Usd,
        };

        AmountField::Parsed(ParsedAmount { value, unit })
    }

    /// The amount to add to the totals, if any.
    pub fn contribution(&self) -> Option<ParsedAmount> {
        match self {
            AmountField::Parsed(amount) => Some(*amount),
            AmountField::NotAvailable | AmountField::Unparseable => None,
        }
    }
}

/// Text for an amount cell: blank for undisclosed amounts, the raw text otherwise,
/// with a trailing `+` when the amount is known to be a lower bound.
pub fn display_amount(raw: &str, incomplete: bool) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NOT_AVAILABLE {
        return String::new();
    }
    if incomplete {
        format!("{trimmed}+")
    } else {
        trimmed.to_string()
    }
}
