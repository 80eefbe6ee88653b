//! Price/indicator divergence and trend inference.
//!
//! Cross-references the price swing buckets against an indicator's (MACD)
//! equivalent buckets. The divergence rule table:
//!
//! | Price            | Indicator        | Trend      |
//! |------------------|------------------|------------|
//! | top-top-high     | top-top-low      | ascending  |
//! | bottom-bottom-low| bottom-bottom-high| ascending |
//! | bottom-bottom-high| bottom-bottom-low| ascending |
//! | top-top-low      | top-top-high     | descending |
//!
//! Only the most recent segment per extremum kind participates; same-direction
//! pairs carry no divergence signal and resolve to inconclusive.

use serde::Serialize;

use crate::extrema::ExtremumKind;
use crate::segments::{Direction, PatternSegment};
use crate::SwingReport;

/// Outcome of the price/indicator cross-reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendVerdict {
    Ascending,
    Descending,
    /// No divergence, no matching segments, or conflicting top/bottom signals.
    Inconclusive,
}

/// Apply one row of the divergence rule table.
fn divergence_verdict(
    kind: ExtremumKind,
    price: Direction,
    indicator: Direction,
) -> Option<TrendVerdict> {
    if price == indicator {
        return None;
    }
    match kind {
        ExtremumKind::Maxima => match price {
            Direction::Ascending => Some(TrendVerdict::Ascending),
            Direction::Descending => Some(TrendVerdict::Descending),
        },
        // Both bottom divergences resolve upward: lower lows against
        // indicator higher lows is the classic bullish divergence, higher
        // lows against indicator lower lows is a strengthening base.
        ExtremumKind::Minima => Some(TrendVerdict::Ascending),
    }
}

/// Most recent segment of one kind, across both direction buckets.
fn latest_of_kind(report: &SwingReport, kind: ExtremumKind) -> Option<PatternSegment> {
    let (ascending, descending) = match kind {
        ExtremumKind::Maxima => (&report.top_top_high, &report.top_top_low),
        ExtremumKind::Minima => (&report.bottom_bottom_high, &report.bottom_bottom_low),
    };

    ascending
        .iter()
        .chain(descending)
        .copied()
        .max_by_key(|s| s.end)
}

/// Infer the overall trend from a price report and an indicator report.
///
/// The top verdict and the bottom verdict are computed independently; they
/// must not contradict each other. A single signal decides, agreement
/// confirms, disagreement or absence yields
/// [`TrendVerdict::Inconclusive`].
pub fn infer_trend(price: &SwingReport, indicator: &SwingReport) -> TrendVerdict {
    let verdict_for = |kind| -> Option<TrendVerdict> {
        let price_segment = latest_of_kind(price, kind)?;
        let indicator_segment = latest_of_kind(indicator, kind)?;
        divergence_verdict(kind, price_segment.direction, indicator_segment.direction)
    };

    let tops = verdict_for(ExtremumKind::Maxima);
    let bottoms = verdict_for(ExtremumKind::Minima);

    match (tops, bottoms) {
        (Some(t), Some(b)) if t == b => t,
        (Some(_), Some(_)) => TrendVerdict::Inconclusive,
        (Some(t), None) => t,
        (None, Some(b)) => b,
        (None, None) => TrendVerdict::Inconclusive,
    }
}

// ============================================================
// TESTS
// ============================================================
