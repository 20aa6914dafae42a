//! Row-oriented time-series types returned by the market data client

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque detail mapping passed through from the API unmodified
pub type DetailMap = serde_json::Map<String, serde_json::Value>;

/// One OHLCV record for a single calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyQuote {
    /// Calendar day of the quote (the quote timestamp truncated to its date)
    pub date: NaiveDate,

    /// Opening price
    pub open: f64,

    /// Highest price of the day
    pub high: f64,

    /// Lowest price of the day
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Traded volume, denominated in the conversion currency
    pub volume: f64,

    /// Market capitalization, denominated in the conversion currency
    pub market_cap: f64,

    /// Ticker symbol of the currency, attached from the response level
    pub symbol: String,
}

/// Date-indexed table of daily quotes
///
/// Rows keep the order the API returned them in (typically chronological);
/// the table never re-sorts. A table holds at least one row: "no data" is
/// `None` at the client boundary, never an empty table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTable {
    rows: Vec<DailyQuote>,
}

impl HistoryTable {
    /// Wraps rows into a table, or `None` when there are none
    pub fn from_rows(rows: Vec<DailyQuote>) -> Option<Self> {
        if rows.is_empty() {
            None
        } else {
            Some(Self { rows })
        }
    }

    /// Ticker symbol shared by every row
    pub fn symbol(&self) -> &str {
        &self.rows[0].symbol
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows, in API order
    pub fn rows(&self) -> &[DailyQuote] {
        &self.rows
    }

    /// Date index, in row order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.date).collect()
    }

    /// Looks a row up by its date key
    pub fn get(&self, date: NaiveDate) -> Option<&DailyQuote> {
        self.rows.iter().find(|r| r.date == date)
    }

    /// First row in API order
    pub fn first(&self) -> &DailyQuote {
        &self.rows[0]
    }

    /// Last row in API order
    pub fn last(&self) -> &DailyQuote {
        &self.rows[self.rows.len() - 1]
    }
}

impl IntoIterator for HistoryTable {
    type Item = DailyQuote;
    type IntoIter = std::vec::IntoIter<DailyQuote>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a HistoryTable {
    type Item = &'a DailyQuote;
    type IntoIter = std::slice::Iter<'a, DailyQuote>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl fmt::Display for HistoryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<12} {:>12} {:>12} {:>12} {:>12} {:>16} {:>18}  {}",
            "date", "open", "high", "low", "close", "volume", "marketCap", "symbol"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<12} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>16.2} {:>18.2}  {}",
                row.date.to_string(),
                row.open,
                row.high,
                row.low,
                row.close,
                row.volume,
                row.market_cap,
                row.symbol
            )?;
        }
        Ok(())
    }
}
