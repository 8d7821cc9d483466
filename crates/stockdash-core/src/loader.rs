//! Cached market data loading
//!
//! One `load` bundles the price history and the fundamentals snapshot
//! into a single cached unit keyed by (symbol, start, end). Failure is
//! all-or-nothing: any upstream error surfaces as `DataUnavailable` and
//! nothing is cached. No retries, no partial results.

use crate::api::MarketDataProvider;
use crate::cache::{SnapshotCache, SnapshotKey};
use crate::error::{DashError, Result};
use crate::model::{MarketSnapshot, Query};
use std::sync::Arc;

/// Loads and memoizes market snapshots
pub struct DataLoader {
    provider: Arc<dyn MarketDataProvider>,
    cache: SnapshotCache<MarketSnapshot>,
}

impl DataLoader {
    /// Create a loader over a provider and a snapshot cache
    pub fn new(provider: Arc<dyn MarketDataProvider>, cache: SnapshotCache<MarketSnapshot>) -> Self {
        Self { provider, cache }
    }

    /// Load the snapshot for a query, from cache when possible.
    ///
    /// A repeat call with an identical query returns the prior result
    /// without contacting the upstream service.
    pub async fn load(&self, query: &Query) -> Result<MarketSnapshot> {
        let key = SnapshotKey::from(query);

        self.cache
            .get_or_fetch(key, || async {
                tracing::info!(symbol = %query.symbol(), "loading market data");

                let prices = self
                    .provider
                    .fetch_history(query.symbol(), query.start(), query.end())
                    .await
                    .map_err(|e| DashError::data_unavailable(query.symbol(), e))?;

                let fundamentals = self
                    .provider
                    .fetch_fundamentals(query.symbol())
                    .await
                    .map_err(|e| DashError::data_unavailable(query.symbol(), e))?;

                Ok(MarketSnapshot {
                    prices,
                    fundamentals,
                })
            })
            .await
    }

    /// Drop the cached snapshot for a query, if any
    pub async fn invalidate(&self, query: &Query) {
        self.cache.invalidate(&SnapshotKey::from(query)).await;
    }
}
