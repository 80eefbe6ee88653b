//! Property-based tests for extremum detection and classification.

use proptest::prelude::*;
use swingscan::prelude::*;

/// Plain single-value series point for detector properties.
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
            t: i as i64,
            v,
        })
        .collect()
}

fn detect(values: &[f64], kind: ExtremumKind) -> Vec<ExtremumPoint> {
    SwingDetector::default().detect_by(&ticks(values), FieldId("v"), |t| t.v, kind)
}

proptest! {
    /// Series shorter than 2n+1 never produce extrema.
    #[test]
    fn prop_short_series_empty(values in prop::collection::vec(-1000.0..1000.0f64, 0..11)) {
        prop_assert!(detect(&values, ExtremumKind::Minima).is_empty());
        prop_assert!(detect(&values, ExtremumKind::Maxima).is_empty());
    }

    /// No qualifying extremum has a window neighbor that ties or beats it.
    #[test]
    fn prop_strict_extremum_rule(values in prop::collection::vec(-1000.0..1000.0f64, 11..80)) {
        let n = Window::default().get();
        for kind in [ExtremumKind::Minima, ExtremumKind::Maxima] {
            for p in detect(&values, kind) {
                for j in (p.index - n)..=(p.index + n) {
                    if j == p.index {
                        continue;
                    }
                    match kind {
                        ExtremumKind::Minima => prop_assert!(values[j] > p.value),
                        ExtremumKind::Maxima => prop_assert!(values[j] < p.value),
                    }
                }
            }
        }
    }

    /// Detected points are strictly ordered by index and timestamp.
    #[test]
    fn prop_points_strictly_ordered(values in prop::collection::vec(-1000.0..1000.0f64, 11..80)) {
        let points = detect(&values, ExtremumKind::Maxima);
        for pair in points.windows(2) {
            prop_assert!(pair[0].index < pair[1].index);
            prop_assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    /// detect and classify are pure: identical input, identical output.
    #[test]
    fn prop_detect_classify_idempotent(values in prop::collection::vec(-1000.0..1000.0f64, 11..80)) {
        let first = detect(&values, ExtremumKind::Minima);
        let second = detect(&values, ExtremumKind::Minima);
        prop_assert_eq!(&first, &second);

        let c1 = classify(&first);
        let c2 = classify(&second);
        prop_assert_eq!(c1.ascending, c2.ascending);
        prop_assert_eq!(c1.descending, c2.descending);
    }

    /// classify pairs adjacent points: k points, exactly k-1 segments.
    #[test]
    fn prop_classify_segment_count(values in prop::collection::vec(-1000.0..1000.0f64, 2..40)) {
        let points: Vec<ExtremumPoint> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| ExtremumPoint {
                index: i,
                timestamp: i as i64,
                value: v,
                field: FieldId("v"),
                kind: ExtremumKind::Maxima,
            })
            .collect();

        let classified = classify(&points);
        prop_assert_eq!(classified.len(), points.len() - 1);

        // Every segment spans two literally-adjacent inputs
        let mut all: Vec<PatternSegment> = classified
            .ascending
            .iter()
            .chain(&classified.descending)
            .copied()
            .collect();
        all.sort_by_key(|s| s.start);
        for (i, s) in all.iter().enumerate() {
            prop_assert_eq!(s.start, i as i64);
            prop_assert_eq!(s.end, i as i64 + 1);
        }
    }

    /// Flat runs longer than 2n+1 produce zero extrema.
    #[test]
    fn prop_plateau_yields_nothing(value in -1000.0..1000.0f64, len in 11usize..60) {
        let values = vec![value; len];
        prop_assert!(detect(&values, ExtremumKind::Minima).is_empty());
        prop_assert!(detect(&values, ExtremumKind::Maxima).is_empty());
    }
}
