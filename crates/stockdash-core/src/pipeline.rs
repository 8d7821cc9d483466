//! Pipeline entry point: query in, report out
//!
//! The driver branches on the returned `Result` explicitly; a failed load
//! produces no chart, no metrics, and no advisory.

use crate::advisor::{Advisory, advise};
use crate::api::{MarketDataProvider, YahooProvider};
use crate::cache::SnapshotCache;
use crate::chart::ChartPayload;
use crate::config::DashConfig;
use crate::error::Result;
use crate::loader::DataLoader;
use crate::model::{MarketSnapshot, Query};
use std::sync::Arc;

/// Everything one successful query produces
#[derive(Debug, Clone)]
pub struct Report {
    pub query: Query,
    pub snapshot: MarketSnapshot,
    pub advisory: Advisory,
}

impl Report {
    /// Chart document for the external candlestick renderer
    pub fn chart_payload(&self) -> ChartPayload {
        ChartPayload::from_series(&self.snapshot.prices)
    }
}

/// Wires the provider, cache, and loader into one pipeline
pub struct Dashboard {
    loader: DataLoader,
}

impl Dashboard {
    /// Build a dashboard backed by Yahoo Finance
    pub fn new(config: &DashConfig) -> Result<Self> {
        config.validate()?;
        let provider = Arc::new(YahooProvider::new(config)?);
        Ok(Self::with_provider(provider, config))
    }

    /// Build a dashboard over an arbitrary provider (tests, alternate
    /// upstreams)
    pub fn with_provider(provider: Arc<dyn MarketDataProvider>, config: &DashConfig) -> Self {
        Self {
            loader: DataLoader::new(provider, SnapshotCache::new(config.cache_ttl)),
        }
    }

    /// Run the pipeline once for a query. The advisory is derived fresh
    /// on every call; only the snapshot is memoized.
    pub async fn run(&self, query: &Query) -> Result<Report> {
        let snapshot = self.loader.load(query).await?;
        let advisory = advise(&snapshot.fundamentals);

        tracing::debug!(symbol = %query.symbol(), ?advisory, "pipeline complete");

        Ok(Report {
            query: query.clone(),
            snapshot,
            advisory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockMarketDataProvider;
    use crate::error::DashError;
    use crate::model::{Fundamentals, PriceSeries};
    use chrono::NaiveDate;

    fn query() -> Query {
        Query::new(
            "AAPL",
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        )
        .unwrap()
    }

    fn dashboard_with(provider: MockMarketDataProvider) -> Dashboard {
        Dashboard::with_provider(Arc::new(provider), &DashConfig::default())
    }

    #[tokio::test]
    async fn test_run_produces_report_with_advisory() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_fetch_history()
            .returning(|symbol, _, _| Ok(PriceSeries::new(symbol, vec![])));
        provider.expect_fetch_fundamentals().returning(|_| {
            Ok(Fundamentals {
                trailing_pe: Some(12.0),
                earnings_quarterly_growth: Some(0.15),
                return_on_equity: Some(0.20),
                ..Default::default()
            })
        });

        let report = dashboard_with(provider).run(&query()).await.unwrap();

        assert_eq!(report.advisory, Advisory::Bullish);
        assert_eq!(report.query.symbol(), "AAPL");
        assert_eq!(report.chart_payload().symbol, "AAPL");
    }

    #[tokio::test]
    async fn test_run_halts_on_load_failure() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_fetch_history()
            .returning(|_, _, _| Err(DashError::Provider("symbol unknown".to_string())));

        let err = dashboard_with(provider).run(&query()).await.unwrap_err();
        assert!(matches!(err, DashError::DataUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_advisory_recomputed_per_run() {
        let mut provider = MockMarketDataProvider::new();
        provider
            .expect_fetch_history()
            .times(1)
            .returning(|symbol, _, _| Ok(PriceSeries::new(symbol, vec![])));
        provider
            .expect_fetch_fundamentals()
            .times(1)
            .returning(|_| Ok(Fundamentals::default()));

        let dashboard = dashboard_with(provider);
        let q = query();

        // Snapshot is memoized, so the second run must not refetch, and
        // the derived advisory stays deterministic.
        let first = dashboard.run(&q).await.unwrap();
        let second = dashboard.run(&q).await.unwrap();
        assert_eq!(first.advisory, Advisory::Neutral);
        assert_eq!(first.advisory, second.advisory);
    }
}
