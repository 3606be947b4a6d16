//! Candle body normalization
//!
//! Tiny real bodies disappear at typical pane heights. Bodies shorter than
//! `min_body_factor * avg_range` are widened symmetrically around their
//! midpoint. Direction and wicks are left untouched.

use crate::chart::Candle;
use crate::{OHLCVExt, OHLCV};

/// Mean `high - low` over all bars, `0.0` for an empty slice
pub fn average_range<T: OHLCV>(bars: &[T]) -> f64 {
    if bars.is_empty() {
        return 0.0;
    }
    let sum: f64 = bars.iter().map(|b| b.range().abs()).sum();
    sum / bars.len() as f64
}

/// Widen one body to at least `min_body`.
///
/// A bar with `close >= open` stays that way; a bar with `close < open`
/// stays bearish. The widened body is never shorter than `min_body`, even
/// after rounding.
#[inline]
pub fn normalize_body(open: f64, close: f64, min_body: f64) -> (f64, f64) {
    if (close - open).abs() >= min_body {
        return (open, close);
    }
    let mid = (open + close) / 2.0;
    let bottom = mid - min_body / 2.0;
    let mut top = bottom + min_body;
    while top - bottom < min_body {
        top = top.next_up();
    }
    if close >= open {
        (bottom, top)
    } else {
        (top, bottom)
    }
}

/// Candles with every body at least `min_body_factor * average_range`.
///
/// Zero average range makes this a no-op.
pub fn normalize_candles<T: OHLCV>(bars: &[T], min_body_factor: f64) -> Vec<Candle> {
    let min_body = min_body_factor * average_range(bars);

    bars.iter()
        .map(|bar| {
            let (open, close) = normalize_body(bar.open(), bar.close(), min_body);
            Candle {
                timestamp: bar.timestamp(),
                open,
                high: bar.high(),
                low: bar.low(),
                close,
            }
        })
        .collect()
}
