//! Core data model: queries, price series, and fundamentals snapshots

use crate::error::{DashError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Syntactically plausible ticker: letters, digits, and the separators
/// Yahoo accepts (`BRK-B`, `^GSPC`, `RDS.A`). Real validation is left to
/// the upstream service.
static TICKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9.\-^]{1,12}$").expect("ticker pattern is valid")
});

/// One user submission: a ticker symbol and an inclusive date range.
///
/// Immutable once constructed; `Query::new` is the only way in and
/// enforces the invariants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    symbol: String,
    start: NaiveDate,
    end: NaiveDate,
}

impl Query {
    /// Create a validated query. The symbol is trimmed and uppercased.
    pub fn new(symbol: impl AsRef<str>, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let symbol = symbol.as_ref().trim().to_uppercase();

        if symbol.is_empty() {
            return Err(DashError::InvalidQuery("symbol must not be empty".to_string()));
        }

        if !TICKER_RE.is_match(&symbol) {
            return Err(DashError::InvalidQuery(format!(
                "'{symbol}' is not a plausible ticker symbol"
            )));
        }

        if start > end {
            return Err(DashError::InvalidQuery(format!(
                "start date {start} is after end date {end}"
            )));
        }

        Ok(Self { symbol, start, end })
    }

    /// Uppercased ticker symbol
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Inclusive range start
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Inclusive range end
    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// One daily OHLC bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Time-ordered sequence of daily bars for one symbol.
///
/// May be empty: the market can be closed for the entire requested range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Build a series, sorting bars into ascending timestamp order.
    pub fn new(symbol: impl Into<String>, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Lowest low across the series, if any bars exist
    pub fn min_low(&self) -> Option<f64> {
        self.bars.iter().map(|b| b.low).reduce(f64::min)
    }

    /// Highest high across the series, if any bars exist
    pub fn max_high(&self) -> Option<f64> {
        self.bars.iter().map(|b| b.high).reduce(f64::max)
    }
}

/// Summary fundamentals for one symbol. Every field is optional: thinly
/// covered symbols legitimately come back with nothing, and consumers
/// must treat absence as an expected state rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    /// Company long name
    pub name: Option<String>,
    /// Sector classification
    pub sector: Option<String>,
    /// Market capitalization in quote currency
    pub market_cap: Option<f64>,
    /// Trailing price-to-earnings ratio
    pub trailing_pe: Option<f64>,
    /// Quarterly earnings growth rate (0.10 = 10%)
    pub earnings_quarterly_growth: Option<f64>,
    /// Return on equity (0.15 = 15%)
    pub return_on_equity: Option<f64>,
}

impl Fundamentals {
    /// True when no metric is present at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sector.is_none()
            && self.market_cap.is_none()
            && self.trailing_pe.is_none()
            && self.earnings_quarterly_growth.is_none()
            && self.return_on_equity.is_none()
    }
}

/// The cached unit produced by one loader invocation: prices and
/// fundamentals succeed or fail together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub prices: PriceSeries,
    pub fundamentals: Fundamentals,
}
