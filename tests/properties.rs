//! Property tests for geometry, layout and level styling.

use chartspec::builders::{allocate, level_opacity, level_width, normalize_candles};
use chartspec::prelude::*;
use proptest::prelude::*;

fn bar_strategy() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (1.0f64..1_000.0, -20.0f64..20.0, 0.0f64..10.0, 0.0f64..10.0).prop_map(
        |(open, delta, upper_wick, lower_wick)| {
            let close = open + delta;
            let high = open.max(close) + upper_wick;
            let low = open.min(close) - lower_wick;
            (open, high, low, close)
        },
    )
}

fn bars_strategy() -> impl Strategy<Value = Vec<Bar>> {
    prop::collection::vec(bar_strategy(), 1..60).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (o, h, l, c))| Bar::new(i as i64 * 60_000, o, h, l, c, 1.0))
            .collect()
    })
}

proptest! {
    #[test]
    fn normalized_bodies_are_visible_and_keep_direction(
        bars in bars_strategy(),
        factor in 0.0f64..1.0,
    ) {
        let avg = bars.iter().map(|b| b.range()).sum::<f64>() / bars.len() as f64;
        let min_body = factor * avg;
        let candles = normalize_candles(&bars, factor);

        prop_assert_eq!(candles.len(), bars.len());
        for (bar, candle) in bars.iter().zip(&candles) {
            let body = (candle.close - candle.open).abs();
            prop_assert!(body >= min_body);
            prop_assert_eq!(candle.close >= candle.open, bar.close >= bar.open);
            prop_assert_eq!(candle.high, bar.high);
            prop_assert_eq!(candle.low, bar.low);
            prop_assert_eq!(candle.timestamp, bar.timestamp);

            let before = (bar.open + bar.close) / 2.0;
            let after = (candle.open + candle.close) / 2.0;
            prop_assert!((before - after).abs() < 1e-9);
        }
    }

    #[test]
    fn pane_domains_never_overlap(show_rsi: bool, show_macd: bool) {
        let layout = allocate(&LayoutConfig::default(), show_rsi, show_macd);
        let axes = layout.axes();

        prop_assert_eq!(layout.axis(Pane::Price).map(|a| a.domain.high), Some(1.0));
        for (i, a) in axes.iter().enumerate() {
            prop_assert!(a.domain.low >= 0.0);
            prop_assert!(a.domain.high > a.domain.low);
            for b in &axes[i + 1..] {
                prop_assert!(!a.domain.overlaps(&b.domain));
            }
        }
    }

    #[test]
    fn level_opacity_is_monotone(a in 0.0f64..50.0, b in 0.0f64..50.0, cap in 1.0f64..20.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(level_opacity(lo, cap) <= level_opacity(hi, cap));
        prop_assert!(level_opacity(hi, cap) <= 1.0);
        prop_assert!(level_width(lo) <= level_width(hi));
        prop_assert!(level_width(lo) >= 1.0);
    }

    #[test]
    fn overlay_points_are_valid_samples(
        bars in bars_strategy(),
        samples in prop::collection::vec(-10.0f64..200.0, 0..80),
    ) {
        let analysis = TimeframeAnalysis {
            indicators: Indicators {
                sma_20: Some(IndicatorSeries::new("SMA_20", samples.clone())),
                ..Default::default()
            },
            ..Default::default()
        };
        let chart = ChartComposer::default().compose(&bars, Some(&analysis), &ToggleState::none());
        prop_assert!(chart.find("SMA 20").is_none());

        let mut toggles = ToggleState::none();
        toggles.sma_20 = true;
        let chart = ChartComposer::default().compose(&bars, Some(&analysis), &toggles);

        let expected: Vec<Point> = samples
            .iter()
            .zip(&bars)
            .filter(|(v, _)| **v > 0.0)
            .map(|(v, b)| Point::new(b.timestamp, *v))
            .collect();

        match chart.find("SMA 20").and_then(Series::as_line) {
            Some(line) => prop_assert_eq!(&line.points, &expected),
            None => prop_assert!(expected.is_empty()),
        }
    }

    #[test]
    fn composition_is_consistent(bars in bars_strategy(), rsi: bool, macd: bool) {
        let toggles = ToggleState::all().with_rsi(rsi).with_macd(macd);
        let chart = ChartComposer::default().compose(&bars, None, &toggles);
        prop_assert!(chart.is_consistent());
        prop_assert_eq!(chart.layout.contains(Pane::Rsi), rsi);
        prop_assert_eq!(chart.layout.contains(Pane::Macd), macd);

        let range = chart.price_range().unwrap();
        for bar in &bars {
            prop_assert!(range.min <= bar.low && bar.high <= range.max);
        }
    }
}
