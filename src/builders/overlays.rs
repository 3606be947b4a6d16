//! Indicator series builders
//!
//! Each builder filters invalid samples, never interpolates, and emits
//! nothing when no sample survives. Builders are independent of each other;
//! several of them appending to the same pane is expected.

use tracing::trace;

use super::helpers::{full_width, is_nonzero, is_positive, points_at, valid_indices, valid_points};
use crate::analysis::{BandIndicator, IndicatorSeries, MacdIndicator, RsiIndicator};
use crate::chart::{BandSeries, BarSeries, LineSeries, Pane, Point, Series};
use crate::config::{Palette, RsiLevels};
use crate::style::{Color, LineStyle};
use crate::OHLCV;

const OVERLAY_WIDTH: f64 = 1.5;
const BAND_FILL_OPACITY: f64 = 0.1;

fn signal_hover(label: &str, signal: Option<&str>, current: Option<f64>) -> Option<String> {
    match (signal, current) {
        (None, None) => None,
        (Some(s), None) => Some(format!("{label}: {s}")),
        (None, Some(v)) => Some(format!("{label}: {v:.2}")),
        (Some(s), Some(v)) => Some(format!("{label}: {v:.2} ({s})")),
    }
}

// ============================================================
// MOVING AVERAGES
// ============================================================

/// SMA / EMA / VWAP line on the price pane. Samples `<= 0` are dropped.
pub fn moving_average<T: OHLCV>(
    bars: &[T],
    indicator: &IndicatorSeries,
    label: &str,
    color: Color,
) -> Option<Series> {
    let points = valid_points(bars, &indicator.values, is_positive);
    if points.is_empty() {
        trace!(indicator = label, "no valid samples, series omitted");
        return None;
    }

    Some(Series::Line(LineSeries {
        name: label.to_string(),
        pane: Pane::Price,
        points,
        style: LineStyle::solid(color, OVERLAY_WIDTH),
        label: None,
        hover: signal_hover(label, indicator.signal.as_deref(), indicator.current_value),
    }))
}

// ============================================================
// BANDS
// ============================================================

/// Bollinger bands: a filled area first, then upper (dashed), middle
/// (solid) and lower (dashed) lines.
///
/// Validity is decided by the upper band alone; all four series share the
/// resulting index subset.
pub fn bollinger<T: OHLCV>(bars: &[T], band: &BandIndicator, color: Color) -> Vec<Series> {
    let indices = valid_indices(&band.upper_band, bars.len(), is_positive);
    if indices.is_empty() {
        trace!("bollinger bands have no valid samples, series omitted");
        return Vec::new();
    }

    let upper = points_at(bars, &band.upper_band, &indices);
    let middle = points_at(bars, &band.middle_band, &indices);
    let lower = points_at(bars, &band.lower_band, &indices);

    let line = |name: &str, points: Vec<Point>, style: LineStyle, hover: Option<String>| {
        Series::Line(LineSeries {
            name: name.to_string(),
            pane: Pane::Price,
            points,
            style,
            label: None,
            hover,
        })
    };

    vec![
        Series::Band(BandSeries {
            name: "BB Range".to_string(),
            pane: Pane::Price,
            upper: upper.clone(),
            lower: lower.clone(),
            fill: color,
            opacity: BAND_FILL_OPACITY,
        }),
        line("BB Upper", upper, LineStyle::dashed(color, 1.0), None),
        line(
            "BB Middle",
            middle,
            LineStyle::solid(color, 1.0),
            signal_hover("BB", band.signal.as_deref(), None),
        ),
        line("BB Lower", lower, LineStyle::dashed(color, 1.0), None),
    ]
}

// ============================================================
// OSCILLATORS
// ============================================================

fn reference_line<T: OHLCV>(
    bars: &[T],
    pane: Pane,
    name: &str,
    y: f64,
    color: Color,
) -> Option<Series> {
    Some(Series::Line(LineSeries {
        name: name.to_string(),
        pane,
        points: full_width(bars, y)?,
        style: LineStyle::dotted(color, 1.0),
        label: None,
        hover: None,
    }))
}

/// RSI line plus overbought/oversold reference lines on the RSI pane.
///
/// Levels carried by the indicator win over the configured defaults.
pub fn rsi<T: OHLCV>(
    bars: &[T],
    indicator: &RsiIndicator,
    palette: &Palette,
    levels: RsiLevels,
) -> Vec<Series> {
    let points = valid_points(bars, &indicator.values, is_positive);
    if points.is_empty() {
        trace!("rsi has no valid samples, series omitted");
        return Vec::new();
    }

    let overbought = if indicator.overbought_level > 0.0 {
        indicator.overbought_level
    } else {
        levels.overbought
    };
    let oversold = if indicator.oversold_level > 0.0 {
        indicator.oversold_level
    } else {
        levels.oversold
    };

    let mut series = vec![Series::Line(LineSeries {
        name: "RSI".to_string(),
        pane: Pane::Rsi,
        points,
        style: LineStyle::solid(palette.rsi, OVERLAY_WIDTH),
        label: None,
        hover: signal_hover("RSI", indicator.signal.as_deref(), indicator.current_value),
    })];
    series.extend(reference_line(bars, Pane::Rsi, "RSI Overbought", overbought, palette.bearish));
    series.extend(reference_line(bars, Pane::Rsi, "RSI Oversold", oversold, palette.bullish));
    series
}

/// MACD line, signal line, histogram and a zero line on the MACD pane.
///
/// Validity is `macd_line != 0`; the signal line and histogram share the
/// MACD line's index subset.
pub fn macd<T: OHLCV>(bars: &[T], indicator: &MacdIndicator, palette: &Palette) -> Vec<Series> {
    let indices = valid_indices(&indicator.macd_line, bars.len(), is_nonzero);
    if indices.is_empty() {
        trace!("macd has no valid samples, series omitted");
        return Vec::new();
    }

    let histogram = points_at(bars, &indicator.histogram, &indices);
    let colors = histogram
        .iter()
        .map(|p| if p.y >= 0.0 { palette.bullish } else { palette.bearish })
        .collect();

    let mut series = vec![
        Series::Line(LineSeries {
            name: "MACD".to_string(),
            pane: Pane::Macd,
            points: points_at(bars, &indicator.macd_line, &indices),
            style: LineStyle::solid(palette.macd, OVERLAY_WIDTH),
            label: None,
            hover: signal_hover("MACD", indicator.signal.as_deref(), indicator.current_macd),
        }),
        Series::Line(LineSeries {
            name: "Signal".to_string(),
            pane: Pane::Macd,
            points: points_at(bars, &indicator.signal_line, &indices),
            style: LineStyle::solid(palette.macd_signal, OVERLAY_WIDTH),
            label: None,
            hover: signal_hover("Signal", None, indicator.current_signal),
        }),
        Series::Bar(BarSeries {
            name: "Histogram".to_string(),
            pane: Pane::Macd,
            points: histogram,
            colors,
            opacity: 0.6,
        }),
    ];
    series.extend(reference_line(bars, Pane::Macd, "MACD Zero", 0.0, palette.reference));
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bar;

    fn bars(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| Bar::new(i as i64 * 1_000, 10.0, 11.0, 9.0, 10.5, 100.0))
            .collect()
    }

    #[test]
    fn test_moving_average_filters_invalid() {
        let bars = bars(4);
        let sma = IndicatorSeries::new("SMA_20", vec![-1.0, 0.0, 5.0, 10.0]);
        let series = moving_average(&bars, &sma, "SMA 20", Color::rgb(0, 0, 0)).unwrap();
        let line = series.as_line().unwrap();
        assert_eq!(line.pane, Pane::Price);
        assert_eq!(line.points, vec![Point::new(2_000, 5.0), Point::new(3_000, 10.0)]);
    }

    #[test]
    fn test_moving_average_all_invalid() {
        let bars = bars(3);
        let sma = IndicatorSeries::new("SMA_50", vec![0.0, 0.0, 0.0]);
        assert!(moving_average(&bars, &sma, "SMA 50", Color::rgb(0, 0, 0)).is_none());
    }

    #[test]
    fn test_moving_average_hover_carries_signal() {
        let bars = bars(2);
        let mut ema = IndicatorSeries::new("EMA_20", vec![1.0, 2.0]);
        ema.signal = Some("BULLISH".into());
        ema.current_value = Some(2.0);
        let series = moving_average(&bars, &ema, "EMA 20", Color::rgb(0, 0, 0)).unwrap();
        assert_eq!(series.as_line().unwrap().hover.as_deref(), Some("EMA 20: 2.00 (BULLISH)"));
    }

    #[test]
    fn test_bollinger_uses_upper_validity() {
        let bars = bars(4);
        let band = BandIndicator {
            upper_band: vec![0.0, 12.0, 13.0, 0.0],
            // a zero middle sample still rides along with a valid upper one
            middle_band: vec![0.0, 0.0, 11.0, 11.0],
            lower_band: vec![0.0, 8.0, 9.0, 9.0],
            signal: None,
        };
        let series = bollinger(&bars, &band, Color::rgb(1, 1, 1));
        assert_eq!(series.len(), 4);
        assert!(matches!(series[0], Series::Band(_)));
        assert_eq!(series[1].name(), "BB Upper");
        assert_eq!(series[2].name(), "BB Middle");
        assert_eq!(series[3].name(), "BB Lower");
        for s in &series {
            assert_eq!(s.len(), 2);
        }
        let middle = series[2].as_line().unwrap();
        assert_eq!(middle.points[0], Point::new(1_000, 0.0));
        assert_eq!(series[1].as_line().unwrap().style.dash, crate::style::Dash::Dash);
    }

    #[test]
    fn test_bollinger_signal_on_middle_line() {
        let bars = bars(2);
        let band = BandIndicator {
            upper_band: vec![12.0, 13.0],
            middle_band: vec![10.0, 11.0],
            lower_band: vec![8.0, 9.0],
            signal: Some("SQUEEZE".into()),
        };
        let series = bollinger(&bars, &band, Color::rgb(1, 1, 1));
        let hovers: Vec<Option<&str>> = series
            .iter()
            .filter_map(Series::as_line)
            .map(|l| l.hover.as_deref())
            .collect();
        assert_eq!(hovers, vec![None, Some("BB: SQUEEZE"), None]);
    }

    #[test]
    fn test_bollinger_empty() {
        let bars = bars(2);
        let band = BandIndicator {
            upper_band: vec![0.0, 0.0],
            ..Default::default()
        };
        assert!(bollinger(&bars, &band, Color::rgb(1, 1, 1)).is_empty());
    }

    #[test]
    fn test_rsi_series_and_levels() {
        let bars = bars(3);
        let indicator = RsiIndicator {
            values: vec![0.0, 45.0, 72.0],
            ..Default::default()
        };
        let series = rsi(&bars, &indicator, &Palette::default(), RsiLevels::default());
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|s| s.pane() == Pane::Rsi));
        assert_eq!(series[0].len(), 2);
        let overbought = series[1].as_line().unwrap();
        assert_eq!(overbought.points[0].y, 70.0);
        assert_eq!(series[2].as_line().unwrap().points[1].y, 30.0);
    }

    #[test]
    fn test_macd_zero_is_warmup() {
        let bars = bars(4);
        let indicator = MacdIndicator {
            macd_line: vec![0.0, 0.0, -0.4, 0.3],
            signal_line: vec![0.0, 0.1, -0.2, 0.1],
            histogram: vec![0.0, 0.0, -0.2, 0.2],
            ..Default::default()
        };
        let palette = Palette::default();
        let series = macd(&bars, &indicator, &palette);
        assert_eq!(series.len(), 4);
        assert!(series.iter().all(|s| s.pane() == Pane::Macd));
        assert_eq!(series[0].len(), 2);
        assert_eq!(series[1].len(), 2);

        let histogram = series[2].as_bars().unwrap();
        assert_eq!(histogram.colors, vec![palette.bearish, palette.bullish]);

        let zero = series[3].as_line().unwrap();
        assert_eq!(zero.name, "MACD Zero");
        assert!(zero.points.iter().all(|p| p.y == 0.0));
    }

    #[test]
    fn test_macd_hover_carries_current_values() {
        let bars = bars(2);
        let indicator = MacdIndicator {
            macd_line: vec![0.5, 0.7],
            signal_line: vec![0.4, 0.5],
            histogram: vec![0.1, 0.2],
            current_macd: Some(0.7),
            current_signal: Some(0.5),
            signal: Some("BULLISH".into()),
        };
        let series = macd(&bars, &indicator, &Palette::default());
        assert_eq!(
            series[0].as_line().unwrap().hover.as_deref(),
            Some("MACD: 0.70 (BULLISH)")
        );
        assert_eq!(series[1].as_line().unwrap().hover.as_deref(), Some("Signal: 0.50"));
    }

    #[test]
    fn test_macd_all_zero() {
        let bars = bars(2);
        let indicator = MacdIndicator {
            macd_line: vec![0.0, 0.0],
            ..Default::default()
        };
        assert!(macd(&bars, &indicator, &Palette::default()).is_empty());
    }
}
