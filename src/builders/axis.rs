//! Padded time and price axis ranges

use crate::chart::AxisRange;
use crate::OHLCV;

/// `[min - pad * span, max + pad * span]` over bar timestamps.
///
/// `None` for an empty slice so the renderer auto-ranges.
pub fn time_range<T: OHLCV>(bars: &[T], padding: f64) -> Option<AxisRange> {
    let min = bars.iter().map(|b| b.timestamp()).min()?;
    let max = bars.iter().map(|b| b.timestamp()).max()?;
    let span = max as f64 - min as f64;
    Some(AxisRange {
        min: min as f64 - padding * span,
        max: max as f64 + padding * span,
    })
}

/// `[min(low) - pad * range, max(high) + pad * range]`.
///
/// An empty slice yields `[0, 0]`; a flat price yields zero padding.
pub fn price_range<T: OHLCV>(bars: &[T], padding: f64) -> AxisRange {
    if bars.is_empty() {
        return AxisRange { min: 0.0, max: 0.0 };
    }
    let low = bars.iter().map(|b| b.low()).fold(f64::INFINITY, f64::min);
    let high = bars.iter().map(|b| b.high()).fold(f64::NEG_INFINITY, f64::max);
    let range = high - low;
    AxisRange {
        min: low - padding * range,
        max: high + padding * range,
    }
}
