//! Stock dashboard core
//!
//! A linear pipeline behind a single external boundary: a user query
//! (ticker symbol plus date range) is resolved against Yahoo Finance into
//! a price history and a fundamentals snapshot, memoized per query, and a
//! canned advisory is derived from three scalar fundamentals. Chart
//! rendering and page layout are external collaborators; this crate only
//! produces the data they consume.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockdash_core::{Dashboard, DashConfig, Query};
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DashConfig::default();
//!     let dashboard = Dashboard::new(&config)?;
//!
//!     let query = Query::new(
//!         "AAPL",
//!         NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
//!     )?;
//!
//!     let report = dashboard.run(&query).await?;
//!     println!("{}", report.advisory);
//!
//!     Ok(())
//! }
//! ```

pub mod advisor;
pub mod api;
pub mod cache;
pub mod chart;
pub mod config;
pub mod error;
pub mod format;
pub mod loader;
pub mod model;
pub mod pipeline;

// Re-export main types for convenience
pub use advisor::{Advisory, advise};
pub use api::{MarketDataProvider, YahooProvider};
pub use cache::{SnapshotCache, SnapshotKey};
pub use chart::ChartPayload;
pub use config::DashConfig;
pub use error::{DashError, Result};
pub use loader::DataLoader;
pub use model::{Bar, Fundamentals, MarketSnapshot, PriceSeries, Query};
pub use pipeline::{Dashboard, Report};
