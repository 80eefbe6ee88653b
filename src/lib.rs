//! # SwingScan - swing-point detection and divergence classification
//!
//! Detects local extrema (swing highs/lows) in OHLCV and indicator series,
//! classifies consecutive extremum pairs into ascending/descending pattern
//! segments, and cross-references price patterns against an indicator (MACD)
//! to infer trend direction from divergence.
//!
//! ## Quick Start
//!
//! ```rust
//! use swingscan::prelude::*;
//!
//! // Materialize your candle series (normally via a SeriesSource)
//! let candles: Vec<Candle> = (0..40i64)
//!     .map(|i| {
//!         let base = 100.0 + (i as f64 * 0.7).sin() * 10.0;
//!         Candle {
//!             timestamp: i * 900,
//!             low: base - 1.0,
//!             high: base + 1.0,
//!             open: base - 0.5,
//!             close: base + 0.5,
//!             volume: 1000.0,
//!         }
//!     })
//!     .collect();
//!
//! let engine = EngineBuilder::new().build();
//! let report = engine.scan(&candles).unwrap();
//! println!("higher highs: {}", report.top_top_high.len());
//! ```

pub mod extrema;
pub mod segments;
pub mod source;
pub mod trend;

pub mod prelude {
    pub use crate::{
        // Detection
        extrema::{ExtremumKind, ExtremumPoint, Field, FieldId, SwingDetector},
        // Pipeline
        analyze,
        // Parallel
        scan_parallel,
        // Classification
        segments::{classify, Classified, Direction, PatternSegment},
        // Collaborator contracts
        source::{
            Candle, FetchConfig, FetchError, IndicatorConfig, IndicatorSource, MacdPoint,
            SeriesSource,
        },
        // Trend inference
        trend::{infer_trend, TrendVerdict},
        EngineBuilder,
        Result,
        Sample,
        ScanFailure,
        ScanOutcome,
        SwingEngine,
        SwingError,
        SwingReport,
        Timestamped,
        TrendAnalysis,
        Window,
    };
}

use extrema::{ExtremumKind, ExtremumPoint, Field, FieldId, SwingDetector};
use segments::{classify, PatternSegment};
use source::{FetchConfig, FetchError, IndicatorConfig, IndicatorSource, SeriesSource};
use trend::{infer_trend, TrendVerdict};

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, SwingError>;

/// Errors that can occur while scanning a series
#[derive(Debug, Clone, thiserror::Error)]
pub enum SwingError {
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),

    #[error("Invalid sample at index {index}: {reason}")]
    InvalidSample { index: usize, reason: &'static str },

    #[error("Non-monotonic timestamp at index {index}")]
    NonMonotonicTimestamp { index: usize },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

// ============================================================
// VALIDATED TYPES
// ============================================================

/// One-sided extremum window size (must be > 0)
///
/// A sample qualifies as an extremum only with `Window` samples on each
/// side, so the first and last `Window` positions of a series never qualify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Window(usize);

impl Window {
    /// The N-point method default, 5 samples each side.
    pub const DEFAULT: Window = Window(5);

    /// Create a new Window, validating value is > 0
    pub fn new(value: usize) -> Result<Self> {
        if value == 0 {
            return Err(SwingError::InvalidValue("Window must be > 0"));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }

    /// Minimum series length that can produce any extremum (`2n + 1`).
    #[inline]
    pub fn min_series_len(self) -> usize {
        2 * self.0 + 1
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl serde::Serialize for Window {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

impl<'de> serde::Deserialize<'de> for Window {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = usize::deserialize(d)?;
        Window::new(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================
// SERIES TRAITS
// ============================================================

/// A time-series observation with a Unix-seconds timestamp.
///
/// The minimal bound for extremum detection; opaque single-value series
/// (indicators) implement only this.
pub trait Timestamped {
    fn timestamp(&self) -> i64;
}

/// Core OHLCV sample trait
pub trait Sample: Timestamped {
    fn low(&self) -> f64;
    fn high(&self) -> f64;
    fn open(&self) -> f64;
    fn close(&self) -> f64;
    fn volume(&self) -> f64;

    /// Validate field consistency of a single sample
    fn validate(&self) -> Result<()> {
        if self.high() < self.low() {
            return Err(SwingError::InvalidSample {
                index: 0,
                reason: "high < low",
            });
        }
        let fields = [
            self.low(),
            self.high(),
            self.open(),
            self.close(),
            self.volume(),
        ];
        if fields.iter().any(|v| v.is_nan()) {
            return Err(SwingError::InvalidSample {
                index: 0,
                reason: "NaN field value",
            });
        }
        if fields.iter().any(|v| v.is_infinite()) {
            return Err(SwingError::InvalidSample {
                index: 0,
                reason: "infinite field value",
            });
        }
        Ok(())
    }
}

// ============================================================
// SWING REPORT
// ============================================================

/// Result of one full scan: detected extrema plus the four pattern buckets.
///
/// Every bucket is an ordered append-only list local to the producing scan;
/// nothing is shared or accumulated across invocations. The caller owns any
/// cross-run history.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct SwingReport {
    /// Qualifying maxima, ordered by index.
    pub highs: Vec<ExtremumPoint>,
    /// Qualifying minima, ordered by index.
    pub lows: Vec<ExtremumPoint>,
    /// Ascending maxima pairs (new peak exceeds prior peak).
    pub top_top_high: Vec<PatternSegment>,
    /// Descending maxima pairs.
    pub top_top_low: Vec<PatternSegment>,
    /// Ascending minima pairs.
    pub bottom_bottom_high: Vec<PatternSegment>,
    /// Descending minima pairs.
    pub bottom_bottom_low: Vec<PatternSegment>,
}

impl SwingReport {
    /// Total segments across the four buckets.
    pub fn segment_count(&self) -> usize {
        self.top_top_high.len()
            + self.top_top_low.len()
            + self.bottom_bottom_high.len()
            + self.bottom_bottom_low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highs.is_empty() && self.lows.is_empty()
    }
}

// ============================================================
// ENGINE
// ============================================================

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Field scanned for maxima ("top" buckets).
    pub high_field: Field,
    /// Field scanned for minima ("bottom" buckets).
    pub low_field: Field,
    /// Fail fast on NaN/infinite fields and non-monotonic timestamps.
    pub validate_data: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            high_field: Field::High,
            low_field: Field::Low,
            validate_data: true,
        }
    }
}

/// Swing detection and classification engine.
///
/// One `scan` runs the full detect → classify pipeline sequentially to
/// completion and returns a fresh [`SwingReport`]; the engine itself holds no
/// per-run state.
#[derive(Debug, Clone)]
pub struct SwingEngine {
    detector: SwingDetector,
    config: EngineConfig,
}

impl Default for SwingEngine {
    fn default() -> Self {
        EngineBuilder::new().build()
    }
}

impl SwingEngine {
    #[inline]
    pub fn detector(&self) -> &SwingDetector {
        &self.detector
    }

    /// Scan an OHLCV series.
    ///
    /// Maxima of the configured high field feed the top buckets, minima of
    /// the low field the bottom buckets. Series shorter than
    /// [`Window::min_series_len`] produce an empty report, not an error.
    pub fn scan<T: Sample>(&self, series: &[T]) -> Result<SwingReport> {
        if self.config.validate_data {
            self.validate_samples(series)?;
        }

        let highs = self
            .detector
            .detect(series, self.config.high_field, ExtremumKind::Maxima);
        let lows = self
            .detector
            .detect(series, self.config.low_field, ExtremumKind::Minima);

        Ok(Self::assemble(highs, lows))
    }

    /// Scan an opaque single-value series (e.g. a MACD line).
    ///
    /// Same pipeline as [`scan`](Self::scan) with `value` standing in for
    /// both the high and low field; `field` tags the resulting points.
    pub fn scan_by<T, F>(&self, series: &[T], field: FieldId, value: F) -> Result<SwingReport>
    where
        T: Timestamped,
        F: Fn(&T) -> f64,
    {
        if self.config.validate_data {
            self.validate_values(series, &value)?;
        }

        let highs = self
            .detector
            .detect_by(series, field, &value, ExtremumKind::Maxima);
        let lows = self
            .detector
            .detect_by(series, field, &value, ExtremumKind::Minima);

        Ok(Self::assemble(highs, lows))
    }

    fn assemble(highs: Vec<ExtremumPoint>, lows: Vec<ExtremumPoint>) -> SwingReport {
        let tops = classify(&highs);
        let bottoms = classify(&lows);

        SwingReport {
            highs,
            lows,
            top_top_high: tops.ascending,
            top_top_low: tops.descending,
            bottom_bottom_high: bottoms.ascending,
            bottom_bottom_low: bottoms.descending,
        }
    }

    fn validate_samples<T: Sample>(&self, series: &[T]) -> Result<()> {
        for (i, sample) in series.iter().enumerate() {
            sample.validate().map_err(|e| match e {
                SwingError::InvalidSample { reason, .. } => {
                    SwingError::InvalidSample { index: i, reason }
                }
                other => other,
            })?;
        }
        self.validate_timestamps(series)
    }

    fn validate_values<T, F>(&self, series: &[T], value: &F) -> Result<()>
    where
        T: Timestamped,
        F: Fn(&T) -> f64,
    {
        for (i, point) in series.iter().enumerate() {
            if !value(point).is_finite() {
                return Err(SwingError::InvalidSample {
                    index: i,
                    reason: "non-finite value",
                });
            }
        }
        self.validate_timestamps(series)
    }

    fn validate_timestamps<T: Timestamped>(&self, series: &[T]) -> Result<()> {
        for (i, pair) in series.windows(2).enumerate() {
            if pair[1].timestamp() <= pair[0].timestamp() {
                return Err(SwingError::NonMonotonicTimestamp { index: i + 1 });
            }
        }
        Ok(())
    }
}

// ============================================================
// BUILDER
// ============================================================

/// Builder for [`SwingEngine`] instances
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    window: Window,
    config: EngineConfig,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            window: Window::default(),
            config: EngineConfig::default(),
        }
    }

    /// Set the one-sided extremum window (default 5).
    pub fn window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Field scanned for maxima (default [`Field::High`]).
    pub fn high_field(mut self, field: Field) -> Self {
        self.config.high_field = field;
        self
    }

    /// Field scanned for minima (default [`Field::Low`]).
    pub fn low_field(mut self, field: Field) -> Self {
        self.config.low_field = field;
        self
    }

    /// Enable/disable fail-fast input validation (default on).
    pub fn validate_data(mut self, enable: bool) -> Self {
        self.config.validate_data = enable;
        self
    }

    /// Build the engine
    pub fn build(self) -> SwingEngine {
        SwingEngine {
            detector: SwingDetector::new(self.window),
            config: self.config,
        }
    }
}

// ============================================================
// PIPELINE
// ============================================================

/// Result of one full fetch → detect → classify → cross-reference run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TrendAnalysis {
    pub price: SwingReport,
    pub indicator: SwingReport,
    pub verdict: TrendVerdict,
}

/// Run the full pipeline against a price source and an indicator source.
///
/// Executes sequentially to completion; fetch failures propagate unchanged
/// and are never retried here. The MACD line is scanned as an opaque
/// single-value series.
pub fn analyze<P, I>(
    engine: &SwingEngine,
    price_source: &P,
    indicator_source: &I,
    price_config: &FetchConfig,
    indicator_config: &IndicatorConfig,
) -> Result<TrendAnalysis>
where
    P: SeriesSource,
    I: IndicatorSource,
{
    let candles = price_source.fetch_series(price_config)?;
    let price = engine.scan(&candles)?;

    let macd = indicator_source.fetch_macd(indicator_config)?;
    let indicator = engine.scan_by(&macd, FieldId("macd"), |p| p.macd)?;

    let verdict = infer_trend(&price, &indicator);

    Ok(TrendAnalysis {
        price,
        indicator,
        verdict,
    })
}

// ============================================================
// PARALLEL SCANNING
// ============================================================

use rayon::prelude::*;

/// Result of scanning a single instrument
#[derive(Debug)]
pub struct ScanOutcome {
    pub symbol: String,
    pub report: SwingReport,
}

/// Error from scanning a single instrument
#[derive(Debug)]
pub struct ScanFailure {
    pub symbol: String,
    pub error: SwingError,
}

/// Parallel scanning of multiple instruments
pub fn scan_parallel<'a, T, I>(
    engine: &SwingEngine,
    instruments: I,
) -> (Vec<ScanOutcome>, Vec<ScanFailure>)
where
    T: Sample + Sync + 'a,
    I: IntoParallelIterator<Item = (&'a str, &'a [T])>,
{
    let results: Vec<_> = instruments
        .into_par_iter()
        .map(|(symbol, series)| {
            engine
                .scan(series)
                .map(|report| ScanOutcome {
                    symbol: symbol.to_string(),
                    report,
                })
                .map_err(|error| ScanFailure {
                    symbol: symbol.to_string(),
                    error,
                })
        })
        .collect();

    let mut successes = Vec::new();
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(r) => successes.push(r),
            Err(e) => errors.push(e),
        }
    }

    (successes, errors)
}

// ============================================================
// TESTS
// ============================================================
