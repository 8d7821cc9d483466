//! Market data provider abstraction and implementations

pub mod yahoo;

pub use yahoo::YahooProvider;

use crate::error::Result;
use crate::model::{Fundamentals, PriceSeries};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Upstream market data service: historical bars for a date range, plus a
/// current fundamentals snapshot. Failures must be distinguishable from a
/// successful-but-empty result.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch daily OHLC bars covering the inclusive date range
    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries>;

    /// Fetch the current fundamentals snapshot for a symbol
    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals>;
}
