//! Sample validity predicates and small shared helpers.

use crate::chart::Point;
use crate::OHLCV;

/// Moving averages, bands and RSI: warm-up samples arrive as `<= 0`
#[inline]
pub fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// MACD components: zero marks a sample that has not warmed up yet
#[inline]
pub fn is_nonzero(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

/// Indices where `values[i]` passes `valid`, truncated to the bar count
pub fn valid_indices(values: &[f64], bar_count: usize, valid: fn(f64) -> bool) -> Vec<usize> {
    values
        .iter()
        .take(bar_count)
        .enumerate()
        .filter(|(_, v)| valid(**v))
        .map(|(i, _)| i)
        .collect()
}

/// Points at `indices`, positioned at the bar timestamps
pub fn points_at<T: OHLCV>(bars: &[T], values: &[f64], indices: &[usize]) -> Vec<Point> {
    indices
        .iter()
        .filter_map(|&i| Some(Point::new(bars.get(i)?.timestamp(), *values.get(i)?)))
        .collect()
}

/// Filter `values` through `valid` and position survivors at bar timestamps
pub fn valid_points<T: OHLCV>(bars: &[T], values: &[f64], valid: fn(f64) -> bool) -> Vec<Point> {
    let indices = valid_indices(values, bars.len(), valid);
    points_at(bars, values, &indices)
}

/// Two points spanning the whole bar set at height `y`
pub fn full_width<T: OHLCV>(bars: &[T], y: f64) -> Option<Vec<Point>> {
    let first = bars.first()?.timestamp();
    let last = bars.last()?.timestamp();
    Some(vec![Point::new(first, y), Point::new(last, y)])
}

/// Price label with two decimals
pub fn fmt_price(value: f64) -> String {
    format!("{value:.2}")
}
