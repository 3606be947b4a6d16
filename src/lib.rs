//! # chartspec - chart composition for technical analysis
//!
//! Turns OHLCV bars and precomputed analysis results (indicators, support and
//! resistance levels, candlestick patterns) into a renderable, multi-pane
//! [`ChartSpec`]. Every rebuild is a pure function of
//! `(bars, analysis, toggles)`.
//!
//! ## Quick Start
//!
//! ```rust
//! use chartspec::prelude::*;
//!
//! let bars = vec![
//!     Bar::new(1_700_000_000_000, 100.0, 105.0, 98.0, 104.0, 1_200.0),
//!     Bar::new(1_700_000_060_000, 104.0, 106.0, 101.0, 102.0, 900.0),
//! ];
//!
//! let composer = ComposerBuilder::new()
//!     .default_pattern("doji")
//!     .build()
//!     .unwrap();
//!
//! let toggles = ToggleState::default().with_rsi(true);
//! let chart = composer.compose(&bars, None, &toggles);
//! assert!(chart.layout.contains(Pane::Rsi));
//! assert_eq!(chart.candlestick().unwrap().candles.len(), 2);
//! ```

pub mod analysis;
pub mod builders;
pub mod chart;
pub mod config;
pub mod plotly;
pub mod style;

pub mod prelude {
    pub use crate::{
        // Inputs
        analysis::{
            AnalysisResult, BandIndicator, BreakType, IndicatorSeries, Indicators, Level,
            LevelBreak, MacdIndicator, PatternFamily, PatternOccurrence, PatternType,
            RsiIndicator, SupportResistance, TimeframeAnalysis, ToggleState,
        },
        // Outputs
        chart::{
            AxisRange, BandSeries, BarSeries, Candle, CandlestickSeries, ChartSpec, Domain,
            LineSeries, Marker, MarkerSeries, Pane, PaneAxis, PaneLayout, Point, Series,
        },
        // Configuration
        config::{ChartConfig, LayoutConfig, Palette, RsiLevels},
        // Parallel
        compose_parallel,
        style::{Color, Dash, LineStyle, MarkerSymbol},
        // Core traits
        Bar,
        // Errors
        ChartError,
        ChartComposer,
        ComposeError,
        ComposerBuilder,
        OHLCVExt,
        Ratio,
        Result,
        TimeframeChart,
        OHLCV,
        validate_bars,
    };
}

use tracing::{debug, debug_span, warn};

use analysis::{AnalysisResult, TimeframeAnalysis, ToggleState};
use builders::{levels, overlays, patterns};
use chart::{BarSeries, CandlestickSeries, ChartSpec, Pane, Point, Series};
use config::{ChartConfig, LayoutConfig, Palette};
use style::Color;

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, ChartError>;

/// Errors from configuration and optional input validation.
///
/// Composition itself never fails; missing or invalid inputs only drop
/// series.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChartError {
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),

    #[error("{field} = {value} out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid bar at index {index}: {reason}")]
    InvalidBar { index: usize, reason: &'static str },

    #[error("Timestamps not increasing at index {index}: {previous} -> {current}")]
    UnorderedTimestamps {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("Invalid color: {0:?}")]
    InvalidColor(String),
}

// ============================================================
// VALIDATED TYPES
// ============================================================

/// Normalized value in range 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ratio(f64);

impl Ratio {
    /// Create a new Ratio, validating the value is in [0.0, 1.0]
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() || value.is_infinite() {
            return Err(ChartError::InvalidValue("Ratio cannot be NaN or infinite"));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ChartError::OutOfRange {
                field: "Ratio",
                value,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(Self(value))
    }

    /// Create a Ratio from a compile-time constant (library internal use)
    #[doc(hidden)]
    pub const fn new_const(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl serde::Serialize for Ratio {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(s)
    }
}

impl<'de> serde::Deserialize<'de> for Ratio {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = f64::deserialize(d)?;
        Ratio::new(value).map_err(serde::de::Error::custom)
    }
}

// ============================================================
// OHLCV TRAITS
// ============================================================

/// Core OHLCV data trait. Timestamps are epoch milliseconds.
pub trait OHLCV {
    fn timestamp(&self) -> i64;
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;
    fn volume(&self) -> f64;
}

/// Extension trait with computed properties for OHLCV data
pub trait OHLCVExt: OHLCV {
    #[inline]
    fn body(&self) -> f64 {
        (self.close() - self.open()).abs()
    }

    #[inline]
    fn range(&self) -> f64 {
        self.high() - self.low()
    }

    #[inline]
    fn midpoint(&self) -> f64 {
        (self.open() + self.close()) / 2.0
    }

    /// `close >= open`; a flat bar counts as up
    #[inline]
    fn is_up(&self) -> bool {
        self.close() >= self.open()
    }

    /// Validate OHLCV data consistency
    fn validate(&self) -> Result<()> {
        let values = [self.open(), self.high(), self.low(), self.close()];
        if values.iter().any(|v| v.is_nan()) {
            return Err(ChartError::InvalidBar {
                index: 0,
                reason: "NaN in OHLC",
            });
        }
        if values.iter().any(|v| v.is_infinite()) {
            return Err(ChartError::InvalidBar {
                index: 0,
                reason: "Infinite value in OHLC",
            });
        }
        if self.high() < self.low() {
            return Err(ChartError::InvalidBar {
                index: 0,
                reason: "high < low",
            });
        }
        Ok(())
    }
}

impl<T: OHLCV> OHLCVExt for T {}

/// Plain OHLCV bar
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub const fn new(
        timestamp: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl OHLCV for Bar {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }

    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Check every bar and that timestamps strictly increase
pub fn validate_bars<T: OHLCV>(bars: &[T]) -> Result<()> {
    for (i, bar) in bars.iter().enumerate() {
        bar.validate().map_err(|e| match e {
            ChartError::InvalidBar { reason, .. } => ChartError::InvalidBar { index: i, reason },
            other => other,
        })?;
    }
    for (i, pair) in bars.windows(2).enumerate() {
        let (previous, current) = (pair[0].timestamp(), pair[1].timestamp());
        if current <= previous {
            return Err(ChartError::UnorderedTimestamps {
                index: i + 1,
                previous,
                current,
            });
        }
    }
    Ok(())
}

// ============================================================
// CHART COMPOSER
// ============================================================

/// Builds a [`ChartSpec`] from bars, analysis and toggles.
///
/// Holds only configuration, so one composer can serve any number of
/// rebuilds, including concurrent ones.
#[derive(Debug, Clone)]
pub struct ChartComposer {
    config: ChartConfig,
}

impl Default for ChartComposer {
    fn default() -> Self {
        Self {
            config: ChartConfig::default(),
        }
    }
}

impl ChartComposer {
    /// Composer with a validated configuration
    pub fn from_config(config: ChartConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Full rebuild.
    ///
    /// Series order: candles, volume, Bollinger bands, moving averages, RSI,
    /// MACD, support/resistance, pattern annotations. With no bars the spec
    /// holds only an empty candlestick series.
    pub fn compose<T: OHLCV>(
        &self,
        bars: &[T],
        analysis: Option<&TimeframeAnalysis>,
        toggles: &ToggleState,
    ) -> ChartSpec {
        let config = &self.config;
        let palette = &config.palette;

        let mut layout = builders::allocate(&config.layout, toggles.rsi, toggles.macd);
        if let Some(price) = layout.axis_mut(Pane::Price) {
            price.range = Some(builders::price_range(
                bars,
                config.layout.price_padding.get(),
            ));
        }
        let time_range = builders::time_range(bars, config.layout.time_padding.get());

        let mut series = vec![self.candlestick(bars)];

        if bars.is_empty() {
            debug!("no bars, chart holds an empty candlestick series");
            return ChartSpec {
                layout,
                time_range,
                series,
            };
        }

        series.push(volume(bars, palette));

        match analysis {
            Some(analysis) => self.push_analysis(&mut series, bars, analysis, toggles),
            None => debug!("no analysis result, indicators skipped"),
        }

        debug!(
            bars = bars.len(),
            series = series.len(),
            panes = layout.len(),
            "chart rebuilt"
        );

        ChartSpec {
            layout,
            time_range,
            series,
        }
    }

    /// Validate bars first when `validate_data` is enabled, then compose
    pub fn try_compose<T: OHLCV>(
        &self,
        bars: &[T],
        analysis: Option<&TimeframeAnalysis>,
        toggles: &ToggleState,
    ) -> Result<ChartSpec> {
        if self.config.validate_data {
            if let Err(e) = validate_bars(bars) {
                warn!(error = %e, "bar validation failed");
                return Err(e);
            }
        }
        Ok(self.compose(bars, analysis, toggles))
    }

    fn candlestick<T: OHLCV>(&self, bars: &[T]) -> Series {
        Series::Candlestick(CandlestickSeries {
            name: "Price".to_string(),
            pane: Pane::Price,
            candles: builders::normalize_candles(bars, self.config.min_body_factor.get()),
            up_color: self.config.palette.candle_up,
            down_color: self.config.palette.candle_down,
        })
    }

    fn push_analysis<T: OHLCV>(
        &self,
        series: &mut Vec<Series>,
        bars: &[T],
        analysis: &TimeframeAnalysis,
        toggles: &ToggleState,
    ) {
        let config = &self.config;
        let palette = &config.palette;
        let indicators = &analysis.indicators;

        if toggles.bollinger {
            if let Some(band) = &indicators.bollinger {
                series.extend(overlays::bollinger(bars, band, palette.bollinger));
            }
        }

        let averages = [
            (toggles.sma_20, &indicators.sma_20, "SMA 20", palette.sma_20),
            (toggles.sma_50, &indicators.sma_50, "SMA 50", palette.sma_50),
            (toggles.ema_20, &indicators.ema_20, "EMA 20", palette.ema_20),
            (toggles.ema_50, &indicators.ema_50, "EMA 50", palette.ema_50),
            (toggles.vwap, &indicators.vwap, "VWAP", palette.vwap),
        ];
        for (enabled, indicator, label, color) in averages {
            if let (true, Some(indicator)) = (enabled, indicator) {
                series.extend(overlays::moving_average(bars, indicator, label, color));
            }
        }

        if toggles.rsi {
            if let Some(rsi) = &indicators.rsi {
                series.extend(overlays::rsi(bars, rsi, palette, config.rsi));
            }
        }
        if toggles.macd {
            if let Some(macd) = &indicators.macd {
                series.extend(overlays::macd(bars, macd, palette));
            }
        }

        if toggles.support_resistance {
            if let Some(sr) = &analysis.support_resistance {
                series.extend(levels::support_resistance(
                    bars,
                    sr,
                    palette,
                    config.strength_cap,
                ));
            }
        }

        if toggles.patterns {
            let selected = patterns::resolve_selection(
                toggles.selected_pattern.as_deref(),
                &config.default_pattern,
            );
            series.extend(patterns::selected_pattern_markers(
                bars,
                &analysis.candlestick_patterns,
                selected,
                palette,
                config.pattern_offset.get(),
            ));
        }
    }
}

fn volume<T: OHLCV>(bars: &[T], palette: &Palette) -> Series {
    let (points, colors): (Vec<Point>, Vec<Color>) = bars
        .iter()
        .map(|b| {
            let color = if b.is_up() {
                palette.volume_up
            } else {
                palette.volume_down
            };
            (Point::new(b.timestamp(), b.volume()), color)
        })
        .unzip();

    Series::Bar(BarSeries {
        name: "Volume".to_string(),
        pane: Pane::Volume,
        points,
        colors,
        opacity: 0.5,
    })
}

// ============================================================
// BUILDER
// ============================================================

/// Builder for creating ChartComposer instances
#[derive(Debug, Clone, Default)]
pub struct ComposerBuilder {
    config: ChartConfig,
}

impl ComposerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.config.layout = layout;
        self
    }

    pub fn palette(mut self, palette: Palette) -> Self {
        self.config.palette = palette;
        self
    }

    pub fn min_body_factor(mut self, factor: Ratio) -> Self {
        self.config.min_body_factor = factor;
        self
    }

    pub fn pattern_offset(mut self, offset: Ratio) -> Self {
        self.config.pattern_offset = offset;
        self
    }

    /// Strength at which level lines reach full opacity
    pub fn strength_cap(mut self, cap: f64) -> Self {
        self.config.strength_cap = cap;
        self
    }

    /// Pattern family drawn when the toggles carry no selection
    pub fn default_pattern(mut self, family: impl Into<String>) -> Self {
        self.config.default_pattern = family.into();
        self
    }

    pub fn rsi_levels(mut self, overbought: f64, oversold: f64) -> Self {
        self.config.rsi.overbought = overbought;
        self.config.rsi.oversold = oversold;
        self
    }

    /// Enable/disable bar validation in `try_compose`
    pub fn validate_data(mut self, enable: bool) -> Self {
        self.config.validate_data = enable;
        self
    }

    /// Build the composer
    pub fn build(self) -> Result<ChartComposer> {
        ChartComposer::from_config(self.config)
    }
}

// ============================================================
// PARALLEL COMPOSITION
// ============================================================

use rayon::prelude::*;

/// Chart for one timeframe
#[derive(Debug)]
pub struct TimeframeChart {
    pub timeframe: String,
    pub chart: ChartSpec,
}

/// Error from composing a single timeframe
#[derive(Debug)]
pub struct ComposeError {
    pub timeframe: String,
    pub error: ChartError,
}

/// Compose one chart per `(timeframe, bars)` pair in parallel.
///
/// Each pair is matched to the analysis of the same timeframe; a timeframe
/// without analysis still gets candles and volume. Output order follows
/// input order.
pub fn compose_parallel<'a, T, I>(
    composer: &ChartComposer,
    inputs: I,
    analysis: Option<&AnalysisResult>,
    toggles: &ToggleState,
) -> (Vec<TimeframeChart>, Vec<ComposeError>)
where
    T: OHLCV + Sync + 'a,
    I: IntoParallelIterator<Item = (&'a str, &'a [T])>,
{
    let results: Vec<_> = inputs
        .into_par_iter()
        .map(|(timeframe, bars)| {
            let _span = debug_span!("compose", timeframe).entered();
            let tf_analysis = analysis.and_then(|a| a.timeframe(timeframe));
            composer
                .try_compose(bars, tf_analysis, toggles)
                .map(|chart| TimeframeChart {
                    timeframe: timeframe.to_string(),
                    chart,
                })
                .map_err(|error| ComposeError {
                    timeframe: timeframe.to_string(),
                    error,
                })
        })
        .collect();

    let mut charts = Vec::new();
    let mut errors = Vec::new();

    for result in results {
        match result {
            Ok(c) => charts.push(c),
            Err(e) => errors.push(e),
        }
    }

    (charts, errors)
}

// ============================================================
// TESTS
// ============================================================
