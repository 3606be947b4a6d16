//! Support/resistance rendering
//!
//! Each level becomes a full-width horizontal line whose opacity and width
//! grow with strength:
//!
//! - `opacity = min(1, strength / cap)`
//! - `width = max(1, strength / 2)`
//!
//! Levels with a last touch get a directional marker, breaks get a marker
//! at the break price, and a known current price gets a dotted line.

use tracing::trace;

use super::helpers::{fmt_price, full_width};
use crate::analysis::{BreakType, Level, LevelBreak, SupportResistance};
use crate::chart::{LineSeries, Marker, MarkerSeries, Pane, Series};
use crate::config::Palette;
use crate::style::{Color, LineStyle, MarkerSymbol};
use crate::OHLCV;

const MARKER_SIZE: f64 = 10.0;

/// Which list a level came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSide {
    Support,
    Resistance,
}

impl LevelSide {
    pub fn as_str(self) -> &'static str {
        match self {
            LevelSide::Support => "Support",
            LevelSide::Resistance => "Resistance",
        }
    }

    pub fn color(self, palette: &Palette) -> Color {
        match self {
            LevelSide::Support => palette.support,
            LevelSide::Resistance => palette.resistance,
        }
    }

    /// Support is touched from above, resistance from below
    pub fn touch_symbol(self) -> MarkerSymbol {
        match self {
            LevelSide::Support => MarkerSymbol::TriangleUp,
            LevelSide::Resistance => MarkerSymbol::TriangleDown,
        }
    }
}

/// `min(1, strength / cap)`
#[inline]
pub fn level_opacity(strength: f64, cap: f64) -> f64 {
    (strength / cap).min(1.0)
}

/// `max(1, strength / 2)`
#[inline]
pub fn level_width(strength: f64) -> f64 {
    (strength / 2.0).max(1.0)
}

fn level_hover(side: LevelSide, level: &Level, nearest: bool) -> String {
    let mut hover = format!(
        "{} {}<br>Strength: {:.1}<br>Touches: {}<br>Distance: {:.2}%<br>Dynamic: {}",
        side.as_str(),
        fmt_price(level.price),
        level.strength,
        level.touches,
        level.distance_from_current,
        if level.is_dynamic { "yes" } else { "no" },
    );
    if nearest {
        hover.push_str("<br>Nearest");
    }
    hover
}

fn is_nearest(level: &Level, nearest: Option<&Level>) -> bool {
    nearest.is_some_and(|n| n.price == level.price)
}

fn level_series<T: OHLCV>(
    bars: &[T],
    side: LevelSide,
    index: usize,
    level: &Level,
    nearest: Option<&Level>,
    palette: &Palette,
    strength_cap: f64,
) -> Vec<Series> {
    let Some(points) = full_width(bars, level.price) else {
        return Vec::new();
    };
    let color = side.color(palette);
    let mut series = vec![Series::Line(LineSeries {
        name: format!("{} {}", side.as_str(), index + 1),
        pane: Pane::Price,
        points,
        style: LineStyle::solid(color, level_width(level.strength))
            .with_opacity(level_opacity(level.strength, strength_cap)),
        label: Some(format!(
            "{} ({:.1})",
            fmt_price(level.price),
            level.strength
        )),
        hover: Some(level_hover(side, level, is_nearest(level, nearest))),
    })];

    if let Some(ts) = level.last_touch_timestamp {
        series.push(Series::Marker(MarkerSeries {
            name: format!("{} {} Touch", side.as_str(), index + 1),
            pane: Pane::Price,
            markers: vec![Marker {
                x: ts,
                y: level.price,
                symbol: side.touch_symbol(),
                color,
                size: MARKER_SIZE,
                text: None,
                hover: format!(
                    "Last touch of {} {}",
                    side.as_str().to_lowercase(),
                    fmt_price(level.price)
                ),
            }],
        }));
    }
    series
}

fn break_marker(brk: &LevelBreak, palette: &Palette) -> Marker {
    let (symbol, color) = match brk.break_type {
        BreakType::Breakout => (MarkerSymbol::TriangleUp, palette.support),
        BreakType::Breakdown => (MarkerSymbol::TriangleDown, palette.resistance),
    };
    Marker {
        x: brk.timestamp,
        y: brk.price_at_break,
        symbol,
        color,
        size: MARKER_SIZE + 4.0,
        text: Some(brk.break_type.as_str().to_string()),
        hover: format!(
            "{} of {} at {}<br>Significance: {:.2}",
            brk.break_type.as_str(),
            fmt_price(brk.level_price),
            fmt_price(brk.price_at_break),
            brk.significance
        ),
    }
}

/// Lines and markers for one support/resistance analysis.
///
/// Missing level lists silently omit their side. Returns nothing for an
/// empty bar set since lines span the bars.
pub fn support_resistance<T: OHLCV>(
    bars: &[T],
    sr: &SupportResistance,
    palette: &Palette,
    strength_cap: f64,
) -> Vec<Series> {
    let mut series = Vec::new();
    if bars.is_empty() {
        return series;
    }

    let sides = [
        (LevelSide::Support, &sr.support_levels, sr.nearest_support.as_ref()),
        (LevelSide::Resistance, &sr.resistance_levels, sr.nearest_resistance.as_ref()),
    ];
    for (side, levels, nearest) in sides {
        let Some(levels) = levels else {
            trace!(side = side.as_str(), "no levels supplied");
            continue;
        };
        for (i, level) in levels.iter().enumerate() {
            series.extend(level_series(bars, side, i, level, nearest, palette, strength_cap));
        }
    }

    if let Some(breaks) = sr.level_breaks.as_ref().filter(|b| !b.is_empty()) {
        series.push(Series::Marker(MarkerSeries {
            name: "Level Breaks".to_string(),
            pane: Pane::Price,
            markers: breaks.iter().map(|b| break_marker(b, palette)).collect(),
        }));
    }

    if let Some(price) = sr.current_price {
        if let Some(points) = full_width(bars, price) {
            series.push(Series::Line(LineSeries {
                name: "Current Price".to_string(),
                pane: Pane::Price,
                points,
                style: LineStyle::dotted(palette.current_price, 1.0),
                label: Some(fmt_price(price)),
                hover: Some(format!("Current price {}", fmt_price(price))),
            }));
        }
    }

    series
}
