//! Data-source collaborator contracts.
//!
//! The core never performs network I/O itself: it consumes already
//! materialized series through [`SeriesSource`] / [`IndicatorSource`]. Retry,
//! timeout, and persistence policy all live behind these traits. Implementors
//! typically wrap an exchange candle endpoint (Coinbase-style) and an
//! indicator endpoint (taapi-style MACD).

use serde::{Deserialize, Serialize};

use crate::{Sample, Timestamped};

/// Errors from a data-retrieval collaborator.
///
/// Propagated unchanged through the pipeline; the core never retries.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("upstream responded with HTTP status {status}")]
    Status { status: u16 },

    #[error("malformed upstream payload: {0}")]
    Malformed(String),

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Candle-series request parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Product identifier, e.g. "BTC-USD".
    pub product: String,
    /// Sampling granularity in seconds.
    pub granularity: u64,
    /// Range start, Unix seconds.
    pub start: i64,
    /// Range end, Unix seconds.
    pub end: i64,
}

impl FetchConfig {
    pub const DEFAULT_PRODUCT: &'static str = "BTC-USD";
    /// 15 minutes, the granularity the strategy was tuned on.
    pub const DEFAULT_GRANULARITY: u64 = 900;

    pub fn new(product: impl Into<String>, granularity: u64, start: i64, end: i64) -> Self {
        Self {
            product: product.into(),
            granularity,
            start,
            end,
        }
    }

    /// Default product and granularity over the 24 hours before `end`.
    pub fn last_day(end: i64) -> Self {
        Self::new(
            Self::DEFAULT_PRODUCT,
            Self::DEFAULT_GRANULARITY,
            end - 24 * 60 * 60,
            end,
        )
    }
}

/// A single OHLCV observation, chronologically ordered within a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix seconds.
    pub timestamp: i64,
    pub low: f64,
    pub high: f64,
    pub open: f64,
    pub close: f64,
    pub volume: f64,
}

impl Timestamped for Candle {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

impl Sample for Candle {
    fn low(&self) -> f64 {
        self.low
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn open(&self) -> f64 {
        self.open
    }

    fn close(&self) -> f64 {
        self.close
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Price-series retrieval contract.
///
/// Returned candles must be chronological (oldest first) with strictly
/// increasing timestamps; upstreams that deliver newest-first are expected to
/// reverse before returning.
pub trait SeriesSource {
    fn fetch_series(&self, config: &FetchConfig) -> Result<Vec<Candle>, FetchError>;
}

/// Indicator-series request parameters (taapi-style).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub exchange: String,
    pub symbol: String,
    pub interval: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            exchange: "binance".to_string(),
            symbol: "BTC/USDT".to_string(),
            interval: "15m".to_string(),
        }
    }
}

/// A single MACD observation.
///
/// Serde names follow the upstream taapi payload so responses deserialize
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    /// Unix seconds.
    pub timestamp: i64,
    #[serde(rename = "valueMACD")]
    pub macd: f64,
    #[serde(rename = "valueMACDSignal")]
    pub signal: f64,
    #[serde(rename = "valueMACDHist")]
    pub histogram: f64,
}

impl Timestamped for MacdPoint {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// MACD-series retrieval contract, chronological like [`SeriesSource`].
pub trait IndicatorSource {
    fn fetch_macd(&self, config: &IndicatorConfig) -> Result<Vec<MacdPoint>, FetchError>;
}

// ============================================================
// TESTS
// ============================================================
