//! Classification of consecutive extremum pairs into pattern segments.
//!
//! Each pair of literally-adjacent same-kind extrema becomes one
//! [`PatternSegment`]: a strictly higher end value is ascending, an equal or
//! lower end value is descending. Maxima-sourced segments are the
//! "top-top-high" / "top-top-low" buckets, minima-sourced segments the
//! "bottom-bottom-high" / "bottom-bottom-low" buckets.

use serde::Serialize;

use crate::extrema::{ExtremumKind, ExtremumPoint};

/// Direction of change between two consecutive extrema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// End value strictly exceeds the start value.
    Ascending,
    /// End value equals or undercuts the start value.
    Descending,
}

/// A pair of consecutive same-kind extrema.
///
/// Segments partition the point sequence into adjacent pairs with no gaps
/// and no skipping: segment `i` spans (point[i], point[i+1]). Endpoint
/// values repeat between neighboring segments but every instance is
/// independent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatternSegment {
    pub start: i64,
    pub end: i64,
    pub start_value: f64,
    pub end_value: f64,
    pub direction: Direction,
    /// Extremum kind of both endpoints (maxima = top, minima = bottom).
    pub kind: ExtremumKind,
}

impl PatternSegment {
    fn between(current: &ExtremumPoint, next: &ExtremumPoint) -> Self {
        // Non-strict tie-break: equal values classify as descending
        let direction = if next.value > current.value {
            Direction::Ascending
        } else {
            Direction::Descending
        };

        Self {
            start: current.timestamp,
            end: next.timestamp,
            start_value: current.value,
            end_value: next.value,
            direction,
            kind: current.kind,
        }
    }

    /// Bucket name for reporting, e.g. `"top_top_high"` for an ascending
    /// maxima segment.
    pub fn bucket(&self) -> &'static str {
        match (self.kind, self.direction) {
            (ExtremumKind::Maxima, Direction::Ascending) => "top_top_high",
            (ExtremumKind::Maxima, Direction::Descending) => "top_top_low",
            (ExtremumKind::Minima, Direction::Ascending) => "bottom_bottom_high",
            (ExtremumKind::Minima, Direction::Descending) => "bottom_bottom_low",
        }
    }
}

/// Segments of one classification run, split by direction.
///
/// Both lists preserve input order and are append-only within the run; the
/// caller owns any accumulation across runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Classified {
    pub ascending: Vec<PatternSegment>,
    pub descending: Vec<PatternSegment>,
}

impl Classified {
    #[inline]
    pub fn len(&self) -> usize {
        self.ascending.len() + self.descending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ascending.is_empty() && self.descending.is_empty()
    }
}

/// Classify consecutive pairs of same-kind extrema.
///
/// `k` input points produce exactly `k - 1` segments; zero or one point
/// produces none. Pure function of the input slice.
pub fn classify(points: &[ExtremumPoint]) -> Classified {
    let mut classified = Classified::default();

    for pair in points.windows(2) {
        let segment = PatternSegment::between(&pair[0], &pair[1]);
        match segment.direction {
            Direction::Ascending => classified.ascending.push(segment),
            Direction::Descending => classified.descending.push(segment),
        }
    }

    classified
}

// ============================================================
// TESTS
// ============================================================
