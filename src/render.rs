//! Plain-text presentation of a session for the command line.

use crate::amount::display_amount;
use crate::engine::stats::{format_totals, summary_subtitle};
use crate::session::Session;

use std::io::{self, Write};

const HEADERS: [&str; 6] = ["Donor", "Recipient", "Amount", "Date", "Source", "Notes"];

pub const FOOTNOTES: &[(&str, &str)] = &[
    (
        "Incomplete Amounts",
        "The \"+\" symbol indicates that the total amount shown is incomplete, as not all \
         donations from this source have been publicly disclosed or verified. The actual total \
         is likely higher than the amount shown.",
    ),
    (
        "Inclusion Criteria",
        "This tracker only includes publicly verifiable donations. Many organizations and \
         individuals may contribute more than what is shown here, but we only include amounts \
         that can be independently verified through public sources.",
    ),
    (
        "Aggregated Data",
        "Some entries represent aggregated funding over time. These are shown separately at the \
         top of the table to provide a more complete picture of long-term funding patterns.",
    ),
];

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// The visible records as CSV, same columns as the feed. Amounts are written as
/// displayed, so `NA` comes out blank.
pub fn write_csv<W: Write>(session: &Session, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["funder", "recipient", "amount", "date", "source_url", "notes"])?;
    for record in session.visible_records() {
        wtr.write_record([
            record.funder.as_str(),
            record.recipient.as_str(),
            display_amount(&record.amount, false).as_str(),
            record.date.as_str(),
            record.source_url.as_str(),
            record.notes.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_summary<W: Write>(session: &Session, mut writer: W) -> io::Result<()> {
    let stats = session.statistics();
    writeln!(writer, "Total Public Donations")?;
    writeln!(writer, "{}", format_totals(&stats))?;
    writeln!(writer, "{}", summary_subtitle(&stats, session.filters()))
}

fn write_rows<W: Write>(writer: &mut W, rows: &[[String; 6]]) -> io::Result<()> {
    let mut widths = HEADERS.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(writer, "{}", line(HEADERS.to_vec()))?;
    for row in rows {
        writeln!(writer, "{}", line(row.iter().map(String::as_str).collect()))?;
    }
    Ok(())
}

/// Summary panel, table, entry count and footnotes. On a failed load only the
/// error message is written.
pub fn write_table<W: Write>(session: &Session, mut writer: W) -> io::Result<()> {
    if let Some(message) = session.error_message() {
        return writeln!(writer, "{message}");
    }

    write_summary(session, &mut writer)?;
    writeln!(writer)?;

    let mut rows: Vec<[String; 6]> = Vec::new();
    if session.show_aggregates() {
        writeln!(writer, "Aggregated Donations")?;
        for agg in session.aggregates() {
            rows.push([
                agg.funder.clone(),
                agg.recipients_label(),
                display_amount(&agg.amount, agg.is_incomplete),
                agg.date_range_label().to_string(),
                agg.source_label(),
                agg.notes.clone(),
            ]);
        }
        write_rows(&mut writer, &rows)?;
        writeln!(writer)?;
        writeln!(writer, "Latest Donations")?;
        rows.clear();
    }

    let visible = session.visible_records();
    if visible.is_empty() {
        writeln!(writer, "No matching records found")?;
    } else {
        for record in &visible {
            rows.push([
                record.funder.clone(),
                record.recipient.clone(),
                display_amount(&record.amount, false),
                record.date.clone(),
                or_dash(&record.source_url).to_string(),
                record.notes.clone(),
            ]);
        }
        write_rows(&mut writer, &rows)?;
    }

    writeln!(writer)?;
    writeln!(writer, "{}", session.showing_line())?;
    writeln!(writer)?;
    writeln!(writer, "Notes on Methodology")?;
    for (title, text) in FOOTNOTES {
        writeln!(writer, "{title}: {text}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::parse_aggregates;
    use crate::record::FundingRecord;

    fn session() -> Session {
        let aggregates = parse_aggregates(
            r#"[{"funder": "BitMEX", "recipientCount": 10, "amount": "1,624,166 USD",
                 "source_url": "https://blog.bitmex.com/grants/", "isIncomplete": true,
                 "source_urls": ["https://blog.bitmex.com/donation/"]}]"#,
        )
        .unwrap();
        Session::with_records(
            aggregates,
            vec![
                FundingRecord::new("Spiral", "Alice", "NA", "2021/07"),
                FundingRecord::new("HRF", "Bob", "1.5 BTC", "2020")
                    .with_source_url("https://hrf.org"),
            ],
        )
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        write_csv(&session(), &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert_eq!(
            output,
            "funder,recipient,amount,date,source_url,notes\n\
             Spiral,Alice,,2021/07,,\n\
             HRF,Bob,1.5 BTC,2020,https://hrf.org,\n"
        );
    }

    #[test]
    fn test_write_table_unfiltered() {
        let mut buf = Vec::new();
        write_table(&session(), &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(output.contains("$1,624,166 & 1.50 BTC+"));
        assert!(output.contains("from 3 donors to 12 recipients from 2020 to 2021"));
        assert!(output.contains("Aggregated Donations"));
        assert!(output.contains("10 recipients"));
        assert!(output.contains("1,624,166 USD+"));
        assert!(output.contains("https://blog.bitmex.com/grants/ (+1 more)"));
        assert!(output.contains("Latest Donations"));
        assert!(output.contains("Showing 2 of 2 entries"));
        assert!(output.contains("Incomplete Amounts:"));
    }

    #[test]
    fn test_write_table_no_matches() {
        let mut session = session();
        session.set_search_query("nobody");

        let mut buf = Vec::new();
        write_table(&session, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(!output.contains("Aggregated Donations"));
        assert!(output.contains("No matching records found"));
        assert!(output.contains("Showing 0 of 2 entries"));
        assert!(output.contains("(excluding aggregate donations)"));
    }

    #[test]
    fn test_write_table_failed_load() {
        let mut session = Session::new(Vec::new());
        session.finish_load(Err(crate::error::LoadError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "missing",
        ))));

        let mut buf = Vec::new();
        write_table(&session, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Error loading funding data\n");
    }
}
