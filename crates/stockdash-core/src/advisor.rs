//! Advisory engine: a fixed three-way threshold classifier over the
//! fundamentals snapshot. Pure and total; recomputed per query, never
//! cached.

use crate::model::Fundamentals;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three possible advisory outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Advisory {
    /// Low P/E with strong growth and profitability
    Bullish,
    /// P/E above the caution threshold
    Overvalued,
    /// Everything else, including missing data
    Neutral,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Bullish => {
                "Fundamentals favorable; possible undervaluation; consider buying."
            }
            Self::Overvalued => "Valuation elevated; caution warranted.",
            Self::Neutral => "Insufficient signal; await more data.",
        };
        f.write_str(text)
    }
}

/// Classify a fundamentals snapshot.
///
/// Branch order matters: the bullish and overvalued conditions are not
/// mutually exclusive in general, and the first match wins. All cutoffs
/// are strict comparisons. A missing P/E disqualifies both directional
/// branches; missing growth and ROE default to 0.0.
pub fn advise(fundamentals: &Fundamentals) -> Advisory {
    let pe = fundamentals.trailing_pe;
    let growth = fundamentals.earnings_quarterly_growth.unwrap_or(0.0);
    let roe = fundamentals.return_on_equity.unwrap_or(0.0);

    match pe {
        Some(pe) if pe < 15.0 && growth > 0.10 && roe > 0.15 => Advisory::Bullish,
        Some(pe) if pe > 30.0 => Advisory::Overvalued,
        _ => Advisory::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fundamentals(
        pe: Option<f64>,
        growth: Option<f64>,
        roe: Option<f64>,
    ) -> Fundamentals {
        Fundamentals {
            trailing_pe: pe,
            earnings_quarterly_growth: growth,
            return_on_equity: roe,
            ..Default::default()
        }
    }

    #[test]
    fn test_bullish() {
        let f = fundamentals(Some(12.0), Some(0.15), Some(0.20));
        assert_eq!(advise(&f), Advisory::Bullish);
    }

    #[test]
    fn test_overvalued() {
        let f = fundamentals(Some(45.0), Some(0.02), Some(0.05));
        assert_eq!(advise(&f), Advisory::Overvalued);
    }

    #[test]
    fn test_empty_snapshot_is_neutral() {
        assert_eq!(advise(&Fundamentals::default()), Advisory::Neutral);
    }

    #[test]
    fn test_missing_pe_blocks_both_directional_branches() {
        // Strong growth and ROE alone never produce a signal.
        let f = fundamentals(None, Some(0.50), Some(0.50));
        assert_eq!(advise(&f), Advisory::Neutral);
    }

    #[test]
    fn test_missing_growth_and_roe_default_to_zero() {
        let f = fundamentals(Some(10.0), None, None);
        assert_eq!(advise(&f), Advisory::Neutral);

        let f = fundamentals(Some(45.0), None, None);
        assert_eq!(advise(&f), Advisory::Overvalued);
    }

    #[test]
    fn test_cutoffs_are_strict() {
        // pe == 15 does not satisfy the bullish branch
        let f = fundamentals(Some(15.0), Some(0.20), Some(0.20));
        assert_eq!(advise(&f), Advisory::Neutral);

        // pe == 30 does not satisfy the overvalued branch
        let f = fundamentals(Some(30.0), Some(0.0), Some(0.0));
        assert_eq!(advise(&f), Advisory::Neutral);

        // growth and roe cutoffs are strict too
        let f = fundamentals(Some(12.0), Some(0.10), Some(0.20));
        assert_eq!(advise(&f), Advisory::Neutral);
        let f = fundamentals(Some(12.0), Some(0.20), Some(0.15));
        assert_eq!(advise(&f), Advisory::Neutral);
    }

    #[test]
    fn test_bullish_takes_precedence_over_ordering_edge() {
        // Just under both cutoffs on the bullish side
        let f = fundamentals(Some(14.999), Some(0.101), Some(0.151));
        assert_eq!(advise(&f), Advisory::Bullish);

        // Just over the overvalued cutoff
        let f = fundamentals(Some(30.001), Some(0.0), Some(0.0));
        assert_eq!(advise(&f), Advisory::Overvalued);
    }

    #[test]
    fn test_other_fields_are_ignored() {
        let f = Fundamentals {
            name: Some("Example Corp".to_string()),
            sector: Some("Utilities".to_string()),
            market_cap: Some(1.0e12),
            trailing_pe: Some(12.0),
            earnings_quarterly_growth: Some(0.15),
            return_on_equity: Some(0.20),
        };
        assert_eq!(advise(&f), Advisory::Bullish);
    }

    #[test]
    fn test_idempotent() {
        let f = fundamentals(Some(45.0), Some(0.02), Some(0.05));
        assert_eq!(advise(&f), advise(&f));
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(
            Advisory::Bullish.to_string(),
            "Fundamentals favorable; possible undervaluation; consider buying."
        );
        assert_eq!(
            Advisory::Overvalued.to_string(),
            "Valuation elevated; caution warranted."
        );
        assert_eq!(
            Advisory::Neutral.to_string(),
            "Insufficient signal; await more data."
        );
    }
}
