//! Metrics display formatting
//!
//! Absent values always render as `"N/A"`, never as a defaulted zero;
//! a missing growth figure and a reported 0.00% are different facts.

use crate::model::Fundamentals;

/// Placeholder rendered for absent metrics
pub const NOT_AVAILABLE: &str = "N/A";

/// Market capitalization in billions, two decimals
pub fn format_market_cap(cap: Option<f64>) -> String {
    match cap {
        Some(cap) => format!("{:.2} B", cap / 1e9),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Plain ratio (P/E), two decimals
pub fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Fractional rate as a percentage, two decimals, trailing `%`
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Ordered label/value rows for the metrics display
pub fn metric_rows(fundamentals: &Fundamentals) -> Vec<(&'static str, String)> {
    vec![
        (
            "Company",
            fundamentals
                .name
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        (
            "Sector",
            fundamentals
                .sector
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        ("Market Cap", format_market_cap(fundamentals.market_cap)),
        ("Trailing P/E", format_ratio(fundamentals.trailing_pe)),
        (
            "Earnings Growth (QoQ)",
            format_percent(fundamentals.earnings_quarterly_growth),
        ),
        (
            "Return on Equity",
            format_percent(fundamentals.return_on_equity),
        ),
    ]
}
