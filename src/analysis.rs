//! Precomputed analysis results consumed by the composer.
//!
//! Shapes follow the analysis service's JSON payload: indicators are keyed
//! `MA_20`, `EMA_50`, `RSI`, `MACD`, `BollingerBands`, `VWAP`, patterns are
//! keyed by family name. Every input is optional so absence is a typed case.

use std::collections::BTreeMap;

// ============================================================
// INDICATORS
// ============================================================

/// Timestamp-aligned samples, one per bar index.
///
/// Warm-up samples arrive as `0.0`; the builders decide validity.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IndicatorSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub current_value: Option<f64>,
    pub signal: Option<String>,
}

impl IndicatorSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            current_value: None,
            signal: None,
        }
    }
}

/// Bollinger-style band: three aligned series
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BandIndicator {
    #[serde(alias = "upper")]
    pub upper_band: Vec<f64>,
    #[serde(alias = "middle")]
    pub middle_band: Vec<f64>,
    #[serde(alias = "lower")]
    pub lower_band: Vec<f64>,
    pub signal: Option<String>,
}

/// RSI with its reference levels
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RsiIndicator {
    pub name: String,
    pub values: Vec<f64>,
    pub period: Option<u32>,
    pub current_value: Option<f64>,
    pub signal: Option<String>,
    pub overbought_level: f64,
    pub oversold_level: f64,
}

impl Default for RsiIndicator {
    fn default() -> Self {
        Self {
            name: "RSI".to_string(),
            values: Vec::new(),
            period: None,
            current_value: None,
            signal: None,
            overbought_level: 70.0,
            oversold_level: 30.0,
        }
    }
}

/// MACD line, signal line and histogram sharing one pane
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MacdIndicator {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
    pub current_macd: Option<f64>,
    pub current_signal: Option<f64>,
    pub signal: Option<String>,
}

/// All indicators of one timeframe
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Indicators {
    #[serde(rename = "MA_20", alias = "SMA_20")]
    pub sma_20: Option<IndicatorSeries>,
    #[serde(rename = "MA_50", alias = "SMA_50")]
    pub sma_50: Option<IndicatorSeries>,
    #[serde(rename = "EMA_20")]
    pub ema_20: Option<IndicatorSeries>,
    #[serde(rename = "EMA_50")]
    pub ema_50: Option<IndicatorSeries>,
    #[serde(rename = "VWAP")]
    pub vwap: Option<IndicatorSeries>,
    #[serde(rename = "RSI")]
    pub rsi: Option<RsiIndicator>,
    #[serde(rename = "MACD")]
    pub macd: Option<MacdIndicator>,
    #[serde(rename = "BollingerBands")]
    pub bollinger: Option<BandIndicator>,
}

// ============================================================
// SUPPORT / RESISTANCE
// ============================================================

/// Horizontal support or resistance price
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Level {
    pub price: f64,
    /// Unbounded; styling saturates at the configured cap
    pub strength: f64,
    pub touches: u32,
    /// Percent distance from the current price
    #[serde(alias = "distanceFromCurrent")]
    pub distance_from_current: f64,
    #[serde(alias = "isDynamic")]
    pub is_dynamic: bool,
    #[serde(alias = "lastTouchTimestamp")]
    pub last_touch_timestamp: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakType {
    Breakout,
    Breakdown,
}

impl BreakType {
    pub fn as_str(self) -> &'static str {
        match self {
            BreakType::Breakout => "Breakout",
            BreakType::Breakdown => "Breakdown",
        }
    }
}

/// A level being broken through
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LevelBreak {
    #[serde(alias = "breakType")]
    pub break_type: BreakType,
    #[serde(alias = "levelPrice")]
    pub level_price: f64,
    #[serde(alias = "priceAtBreak")]
    pub price_at_break: f64,
    #[serde(default)]
    pub significance: f64,
    pub timestamp: i64,
}

/// Support/resistance analysis. Sequence order is rendering order.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SupportResistance {
    #[serde(alias = "currentPrice")]
    pub current_price: Option<f64>,
    #[serde(alias = "nearestSupport")]
    pub nearest_support: Option<Level>,
    #[serde(alias = "nearestResistance")]
    pub nearest_resistance: Option<Level>,
    #[serde(alias = "supportLevels")]
    pub support_levels: Option<Vec<Level>>,
    #[serde(alias = "resistanceLevels")]
    pub resistance_levels: Option<Vec<Level>>,
    #[serde(alias = "levelBreaks")]
    pub level_breaks: Option<Vec<LevelBreak>>,
}

// ============================================================
// CANDLESTICK PATTERNS
// ============================================================

/// Bias of one pattern occurrence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl PatternType {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternType::Bullish => "bullish",
            PatternType::Bearish => "bearish",
            PatternType::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PatternOccurrence {
    pub name: String,
    pub candle_index: usize,
    pub pattern_type: PatternType,
    /// 0.0..=1.0
    pub confidence: f64,
    pub description: String,
}

/// Detected occurrences of one named pattern
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PatternFamily {
    pub pattern_name: String,
    pub total_count: usize,
    pub last_occurrence: Option<String>,
    pub occurrences: Vec<PatternOccurrence>,
}

// ============================================================
// ANALYSIS RESULT
// ============================================================

/// Analysis of one timeframe
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimeframeAnalysis {
    pub timeframe: String,
    pub data_points: usize,
    pub indicators: Indicators,
    #[serde(alias = "candlestickPatterns")]
    pub candlestick_patterns: BTreeMap<String, PatternFamily>,
    #[serde(alias = "supportResistance")]
    pub support_resistance: Option<SupportResistance>,
}

/// Analysis across requested timeframes
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub stock_name: String,
    pub analysis_date: String,
    pub timeframe_results: Vec<TimeframeAnalysis>,
}

impl AnalysisResult {
    pub fn timeframe(&self, timeframe: &str) -> Option<&TimeframeAnalysis> {
        self.timeframe_results
            .iter()
            .find(|t| t.timeframe == timeframe)
    }
}

// ============================================================
// TOGGLES
// ============================================================

/// Which overlays are enabled for a rebuild.
///
/// Defaults show the 20-period averages, Bollinger bands, support/resistance
/// and pattern annotations; oscillator panes start hidden.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ToggleState {
    pub sma_20: bool,
    pub sma_50: bool,
    pub ema_20: bool,
    pub ema_50: bool,
    pub bollinger: bool,
    pub vwap: bool,
    pub rsi: bool,
    pub macd: bool,
    pub support_resistance: bool,
    pub patterns: bool,
    /// Falls back to the configured default family when `None`
    pub selected_pattern: Option<String>,
}

impl Default for ToggleState {
    fn default() -> Self {
        Self {
            sma_20: true,
            sma_50: false,
            ema_20: true,
            ema_50: false,
            bollinger: true,
            vwap: false,
            rsi: false,
            macd: false,
            support_resistance: true,
            patterns: true,
            selected_pattern: None,
        }
    }
}

impl ToggleState {
    /// Everything off: candles and volume only
    pub fn none() -> Self {
        Self {
            sma_20: false,
            sma_50: false,
            ema_20: false,
            ema_50: false,
            bollinger: false,
            vwap: false,
            rsi: false,
            macd: false,
            support_resistance: false,
            patterns: false,
            selected_pattern: None,
        }
    }

    /// Everything on
    pub fn all() -> Self {
        Self {
            sma_20: true,
            sma_50: true,
            ema_20: true,
            ema_50: true,
            bollinger: true,
            vwap: true,
            rsi: true,
            macd: true,
            support_resistance: true,
            patterns: true,
            selected_pattern: None,
        }
    }

    pub fn with_rsi(mut self, enabled: bool) -> Self {
        self.rsi = enabled;
        self
    }

    pub fn with_macd(mut self, enabled: bool) -> Self {
        self.macd = enabled;
        self
    }

    pub fn select_pattern(mut self, family: impl Into<String>) -> Self {
        self.selected_pattern = Some(family.into());
        self
    }
}
