//! Yahoo Finance provider
//!
//! Historical bars come from the `yahoo_finance_api` chart endpoint; the
//! fundamentals snapshot comes from the quoteSummary endpoint, which the
//! crate does not wrap, so it is fetched with reqwest directly.

use crate::api::MarketDataProvider;
use crate::config::DashConfig;
use crate::error::{DashError, Result};
use crate::model::{Bar, Fundamentals, PriceSeries};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

const QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";
const QUOTE_SUMMARY_MODULES: &str =
    "price,assetProfile,summaryDetail,defaultKeyStatistics,financialData";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Yahoo Finance market data provider
pub struct YahooProvider {
    http: reqwest::Client,
    rate_limiter: SharedRateLimiter,
    request_timeout: Duration,
}

impl YahooProvider {
    /// Create a provider from configuration (timeout, user agent, rate limit)
    pub fn new(config: &DashConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.request_timeout)
            .build()?;

        let per_minute =
            NonZeroU32::new(config.rate_limit_per_minute).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        Ok(Self {
            http,
            rate_limiter,
            request_timeout: config.request_timeout,
        })
    }

    fn to_offset(date: NaiveDate) -> Result<OffsetDateTime> {
        let ts = date.and_time(NaiveTime::MIN).and_utc().timestamp();
        OffsetDateTime::from_unix_timestamp(ts)
            .map_err(|e| DashError::Provider(format!("invalid timestamp for {date}: {e}")))
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn fetch_history(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        // Both retrieval paths share one throttle and one timeout budget.
        self.rate_limiter.until_ready().await;

        let provider = yahoo::YahooConnector::builder()
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| DashError::Provider(e.to_string()))?;

        let start_odt = Self::to_offset(start)?;
        // Exclusive bound of the day after `end`, so bars for the end date
        // itself are included. succ_opt only fails at NaiveDate::MAX.
        let end_odt = Self::to_offset(end.succ_opt().unwrap_or(end))?;

        tracing::info!(symbol, %start, %end, "fetching price history");

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| DashError::Provider(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| DashError::Provider(e.to_string()))?;

        let bars = quotes
            .iter()
            .map(|q| Bar {
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
            })
            .collect();

        Ok(PriceSeries::new(symbol, bars))
    }

    async fn fetch_fundamentals(&self, symbol: &str) -> Result<Fundamentals> {
        self.rate_limiter.until_ready().await;

        tracing::info!(symbol, "fetching fundamentals snapshot");

        let url = format!("{QUOTE_SUMMARY_URL}/{symbol}");
        let response = self
            .http
            .get(&url)
            .query(&[("modules", QUOTE_SUMMARY_MODULES)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DashError::Provider(format!(
                "quoteSummary returned HTTP {} for {symbol}",
                response.status()
            )));
        }

        let body = response.text().await?;
        parse_fundamentals(&body, symbol)
    }
}

/// Parse a quoteSummary response body into a fundamentals snapshot.
///
/// An API-level error or a missing result is a failure; a present result
/// with sparse modules yields absent fields, which is a valid snapshot.
pub(crate) fn parse_fundamentals(body: &str, symbol: &str) -> Result<Fundamentals> {
    let envelope: QuoteSummaryEnvelope = serde_json::from_str(body)?;
    let summary = envelope.quote_summary;

    if let Some(error) = summary.error {
        if !error.is_null() {
            let description = error
                .get("description")
                .and_then(|d| d.as_str())
                .map_or_else(|| error.to_string(), str::to_string);
            return Err(DashError::Provider(format!(
                "quoteSummary error for {symbol}: {description}"
            )));
        }
    }

    let result = summary
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| {
            DashError::Provider(format!("no quoteSummary result for {symbol}"))
        })?;

    let market_cap = result
        .price
        .as_ref()
        .and_then(|p| p.market_cap.and_then(RawNum::to_option))
        .or_else(|| {
            result
                .summary_detail
                .as_ref()
                .and_then(|sd| sd.market_cap.and_then(RawNum::to_option))
        });

    Ok(Fundamentals {
        name: result.price.as_ref().and_then(|p| p.long_name.clone()),
        sector: result.asset_profile.as_ref().and_then(|a| a.sector.clone()),
        market_cap,
        trailing_pe: result
            .summary_detail
            .as_ref()
            .and_then(|sd| sd.trailing_pe.and_then(RawNum::to_option)),
        earnings_quarterly_growth: result
            .default_key_statistics
            .as_ref()
            .and_then(|ks| ks.earnings_quarterly_growth.and_then(RawNum::to_option)),
        return_on_equity: result
            .financial_data
            .as_ref()
            .and_then(|fd| fd.return_on_equity.and_then(RawNum::to_option)),
    })
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    #[serde(default)]
    result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResult {
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(default)]
    asset_profile: Option<AssetProfileModule>,
    #[serde(default)]
    summary_detail: Option<SummaryDetailModule>,
    #[serde(default)]
    default_key_statistics: Option<KeyStatisticsModule>,
    #[serde(default)]
    financial_data: Option<FinancialDataModule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    market_cap: Option<RawNum>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetProfileModule {
    #[serde(default)]
    sector: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryDetailModule {
    #[serde(default, rename = "trailingPE")]
    trailing_pe: Option<RawNum>,
    #[serde(default, rename = "marketCap")]
    market_cap: Option<RawNum>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatisticsModule {
    #[serde(default)]
    earnings_quarterly_growth: Option<RawNum>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialDataModule {
    #[serde(default)]
    return_on_equity: Option<RawNum>,
}

/// Numeric fields arrive either as `{ "raw": 1.23, "fmt": "1.23" }`
/// objects or, with `formatted=false`, as plain numbers.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum RawNum {
    Wrapped { raw: Option<f64> },
    Plain(f64),
}

impl RawNum {
    fn to_option(self) -> Option<f64> {
        match self {
            Self::Plain(v) => Some(v),
            Self::Wrapped { raw } => raw,
        }
    }
}
