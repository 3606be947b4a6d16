//! Chart specification - the output of a rebuild.
//!
//! A [`ChartSpec`] is library-agnostic: panes are symbolic ([`Pane`]) and
//! every series carries the pane it is drawn on. Concrete axis identifiers
//! only appear in a rendering adapter (see [`crate::plotly`]).

use crate::style::{Color, LineStyle, MarkerSymbol};

// ============================================================
// PANES
// ============================================================

/// Horizontally spanning band of the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    Price,
    Volume,
    Rsi,
    Macd,
}

impl Pane {
    pub fn as_str(self) -> &'static str {
        match self {
            Pane::Price => "price",
            Pane::Volume => "volume",
            Pane::Rsi => "rsi",
            Pane::Macd => "macd",
        }
    }
}

/// Vertical fraction `[low, high]` of the plotting area
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Domain {
    pub low: f64,
    pub high: f64,
}

impl Domain {
    pub fn height(&self) -> f64 {
        self.high - self.low
    }

    /// True if the two domains share more than a boundary point
    pub fn overlaps(&self, other: &Domain) -> bool {
        self.low < other.high && other.low < self.high
    }
}

/// Numeric axis extent
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// One pane with its vertical axis
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PaneAxis {
    pub pane: Pane,
    pub domain: Domain,
    /// 1-based vertical axis slot. Resolved to a concrete axis id by adapters.
    pub slot: usize,
    /// Explicit value range; `None` lets the renderer auto-range
    pub range: Option<AxisRange>,
    /// Zoom disabled on this axis
    pub fixed_range: bool,
}

/// Ordered pane allocation, bottom-up.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct PaneLayout {
    axes: Vec<PaneAxis>,
}

impl PaneLayout {
    pub(crate) fn from_axes(axes: Vec<PaneAxis>) -> Self {
        Self { axes }
    }

    /// Panes from the bottom of the chart to the top
    pub fn axes(&self) -> &[PaneAxis] {
        &self.axes
    }

    pub fn axis(&self, pane: Pane) -> Option<&PaneAxis> {
        self.axes.iter().find(|a| a.pane == pane)
    }

    pub(crate) fn axis_mut(&mut self, pane: Pane) -> Option<&mut PaneAxis> {
        self.axes.iter_mut().find(|a| a.pane == pane)
    }

    pub fn contains(&self, pane: Pane) -> bool {
        self.axis(pane).is_some()
    }

    pub fn domain(&self, pane: Pane) -> Option<Domain> {
        self.axis(pane).map(|a| a.domain)
    }

    /// Vertical axis slot for `pane`.
    ///
    /// Price is slot 1 and volume slot 2. RSI takes slot 3 when shown; MACD
    /// takes the next free slot, so it moves between 3 and 4 depending on
    /// whether RSI is shown.
    pub fn axis_slot(&self, pane: Pane) -> Option<usize> {
        self.axis(pane).map(|a| a.slot)
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }
}

// ============================================================
// SERIES
// ============================================================

/// Sample position: bar timestamp and value
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Point {
    pub x: i64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: i64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Drawn candle (possibly with a normalized body)
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CandlestickSeries {
    pub name: String,
    pub pane: Pane,
    pub candles: Vec<Candle>,
    pub up_color: Color,
    pub down_color: Color,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BarSeries {
    pub name: String,
    pub pane: Pane,
    pub points: Vec<Point>,
    /// One color per point
    pub colors: Vec<Color>,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LineSeries {
    pub name: String,
    pub pane: Pane,
    pub points: Vec<Point>,
    pub style: LineStyle,
    /// Text drawn next to the line
    pub label: Option<String>,
    pub hover: Option<String>,
}

/// Filled area between two aligned boundaries
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BandSeries {
    pub name: String,
    pub pane: Pane,
    pub upper: Vec<Point>,
    pub lower: Vec<Point>,
    pub fill: Color,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Marker {
    pub x: i64,
    pub y: f64,
    pub symbol: MarkerSymbol,
    pub color: Color,
    pub size: f64,
    pub text: Option<String>,
    pub hover: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MarkerSeries {
    pub name: String,
    pub pane: Pane,
    pub markers: Vec<Marker>,
}

/// One drawable element
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Series {
    Candlestick(CandlestickSeries),
    Bar(BarSeries),
    Line(LineSeries),
    Band(BandSeries),
    Marker(MarkerSeries),
}

impl Series {
    pub fn pane(&self) -> Pane {
        match self {
            Series::Candlestick(s) => s.pane,
            Series::Bar(s) => s.pane,
            Series::Line(s) => s.pane,
            Series::Band(s) => s.pane,
            Series::Marker(s) => s.pane,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Series::Candlestick(s) => &s.name,
            Series::Bar(s) => &s.name,
            Series::Line(s) => &s.name,
            Series::Band(s) => &s.name,
            Series::Marker(s) => &s.name,
        }
    }

    /// Number of drawn elements (candles, points, markers)
    pub fn len(&self) -> usize {
        match self {
            Series::Candlestick(s) => s.candles.len(),
            Series::Bar(s) => s.points.len(),
            Series::Line(s) => s.points.len(),
            Series::Band(s) => s.upper.len(),
            Series::Marker(s) => s.markers.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_line(&self) -> Option<&LineSeries> {
        match self {
            Series::Line(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_markers(&self) -> Option<&MarkerSeries> {
        match self {
            Series::Marker(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bars(&self) -> Option<&BarSeries> {
        match self {
            Series::Bar(s) => Some(s),
            _ => None,
        }
    }
}

// ============================================================
// CHART SPECIFICATION
// ============================================================

/// Complete chart: pane layout, padded time axis and ordered series
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChartSpec {
    pub layout: PaneLayout,
    /// `None` when there are no bars; the renderer auto-ranges
    pub time_range: Option<AxisRange>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    /// The candlestick series. Every spec built by the composer has one.
    pub fn candlestick(&self) -> Option<&CandlestickSeries> {
        self.series.iter().find_map(|s| match s {
            Series::Candlestick(c) => Some(c),
            _ => None,
        })
    }

    pub fn price_range(&self) -> Option<AxisRange> {
        self.layout.axis(Pane::Price).and_then(|a| a.range)
    }

    pub fn series_on(&self, pane: Pane) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(move |s| s.pane() == pane)
    }

    pub fn find(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name() == name)
    }

    /// Every series targets a pane present in the layout
    pub fn is_consistent(&self) -> bool {
        self.series.iter().all(|s| self.layout.contains(s.pane()))
    }
}
