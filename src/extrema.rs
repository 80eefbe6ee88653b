//! Local-extremum (swing point) detection.
//!
//! A sample qualifies as a swing high/low when its qualifying field value is
//! strictly more extreme than every sample within a fixed window on both
//! sides (the N-point method). Ties always disqualify the candidate: a
//! neighbor at the same value wins, so plateaus never produce extrema. This
//! asymmetric tie-break is deliberate and load-bearing for the classifier's
//! non-strict descending rule.

use serde::{Deserialize, Serialize};

use crate::{Sample, Timestamped, Window};

// ============================================================
// FIELD SELECTION
// ============================================================

/// Unique identifier for the series field a point qualified on.
///
/// OHLC scans use the ids of [`Field`]; opaque single-value series (e.g. a
/// MACD histogram scanned through [`SwingDetector::detect_by`]) tag points
/// with their own id such as `FieldId("macd_hist")`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FieldId(pub &'static str);

impl FieldId {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// OHLC field used to qualify extrema.
///
/// Conventionally `Low` pairs with [`ExtremumKind::Minima`] and `High` with
/// [`ExtremumKind::Maxima`], but field and kind are independent parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Low,
    High,
    Open,
    Close,
}

impl Field {
    /// Extract this field's value from a sample.
    #[inline]
    pub fn extract<T: Sample>(self, sample: &T) -> f64 {
        match self {
            Field::Low => sample.low(),
            Field::High => sample.high(),
            Field::Open => sample.open(),
            Field::Close => sample.close(),
        }
    }

    #[inline]
    pub fn id(self) -> FieldId {
        match self {
            Field::Low => FieldId("low"),
            Field::High => FieldId("high"),
            Field::Open => FieldId("open"),
            Field::Close => FieldId("close"),
        }
    }
}

/// Comparison direction for extremum detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremumKind {
    /// Swing lows: every window neighbor must be strictly greater.
    Minima,
    /// Swing highs: every window neighbor must be strictly less.
    Maxima,
}

// ============================================================
// EXTREMUM POINT - result of detection (Copy, no allocations)
// ============================================================

/// A sample that qualified as a local extremum.
///
/// Derived and read-only: carries the position in the source series, the
/// sample timestamp, and the qualifying field value. Points from one
/// detection run are strictly ordered by index and by timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtremumPoint {
    /// Position in the source series.
    pub index: usize,
    pub timestamp: i64,
    /// Value of the qualifying field at this sample.
    pub value: f64,
    pub field: FieldId,
    pub kind: ExtremumKind,
}

// ============================================================
// DETECTOR
// ============================================================

/// N-point local-extremum detector.
///
/// Pure function of (series, field, kind, window): no input mutation, no
/// state across calls. Series shorter than `2n + 1` yield an empty result by
/// convention, never an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwingDetector {
    window: Window,
}

impl SwingDetector {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    #[inline]
    pub fn window(&self) -> Window {
        self.window
    }

    /// Detect local extrema of an OHLC field.
    pub fn detect<T: Sample>(
        &self,
        series: &[T],
        field: Field,
        kind: ExtremumKind,
    ) -> Vec<ExtremumPoint> {
        self.detect_by(series, field.id(), |s| field.extract(s), kind)
    }

    /// Detect local extrema of an arbitrary single-value series.
    ///
    /// The generic entry point behind [`detect`](Self::detect): `value`
    /// selects the scanned attribute and `field` tags the resulting points.
    /// This is how indicator series (MACD etc.) reuse the same algorithm
    /// without an OHLC shape.
    pub fn detect_by<T, F>(
        &self,
        series: &[T],
        field: FieldId,
        value: F,
        kind: ExtremumKind,
    ) -> Vec<ExtremumPoint>
    where
        T: Timestamped,
        F: Fn(&T) -> f64,
    {
        let n = self.window.get();
        let mut points = Vec::new();

        // Need n samples on each side; shorter series have no interior.
        if series.len() < 2 * n + 1 {
            return points;
        }

        for i in n..series.len() - n {
            let candidate = value(&series[i]);

            // Strict rule: the candidate loses ties. A neighbor at or beyond
            // the candidate's value disqualifies it, so plateaus never
            // qualify.
            let beats = |j: usize| -> bool {
                let neighbor = value(&series[j]);
                match kind {
                    ExtremumKind::Minima => neighbor > candidate,
                    ExtremumKind::Maxima => neighbor < candidate,
                }
            };

            if (i - n..i).all(beats) && (i + 1..=i + n).all(beats) {
                points.push(ExtremumPoint {
                    index: i,
                    timestamp: series[i].timestamp(),
                    value: candidate,
                    field,
                    kind,
                });
            }
        }

        points
    }
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Window;

    /// Minimal single-value series point.
    #[derive(Debug, Clone, Copy)]
    struct Tick {
        t: i64,
        v: f64,
    }

    impl Timestamped for Tick {
        fn timestamp(&self) -> i64 {
            self.t
        }
    }

    fn ticks(values: &[f64]) -> Vec<Tick> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Tick {
                t: i as i64 * 900,
                v,
            })
            .collect()
    }

    fn detect(values: &[f64], kind: ExtremumKind) -> Vec<ExtremumPoint> {
        SwingDetector::default().detect_by(&ticks(values), FieldId("v"), |t| t.v, kind)
    }

    #[test]
    fn test_short_series_yields_empty() {
        // 2n+1 = 11 with the default window; 10 samples can never qualify
        let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
        assert!(detect(&values, ExtremumKind::Minima).is_empty());
        assert!(detect(&values, ExtremumKind::Maxima).is_empty());
        assert!(detect(&[], ExtremumKind::Minima).is_empty());
        assert!(detect(&[1.0], ExtremumKind::Minima).is_empty());
    }

    #[test]
    fn test_single_minimum_v_shape() {
        // 11 samples, strict V: only index 5 has 5 strictly-greater
        // neighbors on each side
        let values = [10.0, 9.0, 8.0, 7.0, 6.0, 1.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let points = detect(&values, ExtremumKind::Minima);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].index, 5);
        assert_eq!(points[0].value, 1.0);
        assert_eq!(points[0].timestamp, 5 * 900);
        assert_eq!(points[0].kind, ExtremumKind::Minima);
    }

    #[test]
    fn test_single_maximum_peak() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 9.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let points = detect(&values, ExtremumKind::Maxima);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].index, 5);
        assert_eq!(points[0].value, 9.0);
    }

    #[test]
    fn test_edges_never_qualify() {
        // Global minimum sits at index 0, inside the leading skip zone; the
        // interior trough at index 6 is the only point that can qualify
        let values = [
            -5.0, 10.0, 9.0, 8.0, 7.0, 6.0, 1.0, 6.0, 7.0, 8.0, 9.0, 10.0,
        ];
        let points = detect(&values, ExtremumKind::Minima);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].index, 6);
    }

    #[test]
    fn test_tie_disqualifies_candidate() {
        // Duplicate trough value inside the window: both candidates lose
        let values = [10.0, 9.0, 8.0, 7.0, 1.0, 1.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        assert!(detect(&values, ExtremumKind::Minima).is_empty());
    }

    #[test]
    fn test_plateau_produces_no_extrema() {
        let values = vec![5.0; 20];
        assert!(detect(&values, ExtremumKind::Minima).is_empty());
        assert!(detect(&values, ExtremumKind::Maxima).is_empty());
    }

    #[test]
    fn test_multiple_extrema_ordered_by_index() {
        // Two troughs far enough apart for disjoint windows
        let mut values = vec![10.0, 9.0, 8.0, 7.0, 6.0, 1.0, 6.0, 7.0, 8.0, 9.0];
        values.extend([10.0, 9.0, 8.0, 7.0, 6.0, 2.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let points = detect(&values, ExtremumKind::Minima);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].index, 5);
        assert_eq!(points[1].index, 15);
        assert!(points[0].timestamp < points[1].timestamp);
    }

    #[test]
    fn test_kind_and_field_are_independent() {
        // Maxima over the same data the minima scan rejects
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 9.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        assert!(detect(&values, ExtremumKind::Minima).is_empty());
        assert_eq!(detect(&values, ExtremumKind::Maxima).len(), 1);
    }

    #[test]
    fn test_custom_window() {
        let detector = SwingDetector::new(Window::new(2).unwrap());
        let values = [3.0, 2.0, 1.0, 2.0, 3.0];
        let points = detector.detect_by(&ticks(&values), FieldId("v"), |t| t.v, ExtremumKind::Minima);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].index, 2);
    }

    #[test]
    fn test_detect_is_pure_and_idempotent() {
        let values = [10.0, 9.0, 8.0, 7.0, 6.0, 1.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let first = detect(&values, ExtremumKind::Minima);
        let second = detect(&values, ExtremumKind::Minima);
        assert_eq!(first, second);
    }
}
