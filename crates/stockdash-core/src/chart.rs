//! Candlestick chart payload
//!
//! The core does no drawing; this is the serializable document handed to
//! an external renderer.

use crate::model::PriceSeries;
use serde::Serialize;

/// One candlestick point
#[derive(Debug, Clone, Serialize)]
pub struct CandlePoint {
    pub timestamp: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Axis configuration for the renderer
#[derive(Debug, Clone, Serialize)]
pub struct ChartAxes {
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub range_slider_visible: bool,
}

impl Default for ChartAxes {
    fn default() -> Self {
        Self {
            x_title: "Date",
            y_title: "Price (USD)",
            range_slider_visible: false,
        }
    }
}

/// Complete chart document for one price series
#[derive(Debug, Clone, Serialize)]
pub struct ChartPayload {
    pub symbol: String,
    pub data_points: usize,
    pub candles: Vec<CandlePoint>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub axes: ChartAxes,
}

impl ChartPayload {
    /// Build the payload from a price series. An empty series produces a
    /// valid payload with zero points and null bounds.
    pub fn from_series(series: &PriceSeries) -> Self {
        let candles: Vec<CandlePoint> = series
            .bars()
            .iter()
            .map(|bar| CandlePoint {
                timestamp: bar.timestamp.to_rfc3339(),
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
            })
            .collect();

        Self {
            symbol: series.symbol.clone(),
            data_points: candles.len(),
            candles,
            start_date: series.first().map(|b| b.timestamp.to_rfc3339()),
            end_date: series.last().map(|b| b.timestamp.to_rfc3339()),
            min_price: series.min_low(),
            max_price: series.max_high(),
            axes: ChartAxes::default(),
        }
    }
}
