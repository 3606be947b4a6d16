//! Benchmarks for chart composition.

use std::collections::BTreeMap;

use chartspec::plotly::to_figure;
use chartspec::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Generate realistic bars
fn generate_bars(n: usize) -> Vec<Bar> {
  let mut bars = Vec::with_capacity(n);
  let mut price = 100.0;

  for i in 0..n {
    let change = ((i * 7 + 13) % 100) as f64 / 50.0 - 1.0; // Deterministic "random"
    let volatility = 2.0 + ((i * 3) % 10) as f64 / 5.0;

    let o = price;
    let c = price + change;
    let h = o.max(c) + volatility * 0.5;
    let l = o.min(c) - volatility * 0.5;

    bars.push(Bar::new(1_700_000_000_000 + i as i64 * 60_000, o, h, l, c, 1_000.0 + i as f64));
    price = c;
  }

  bars
}

fn smoothed(bars: &[Bar], period: usize) -> Vec<f64> {
  (0..bars.len())
    .map(|i| {
      if i + 1 < period {
        return 0.0;
      }
      bars[i + 1 - period..=i].iter().map(|b| b.close).sum::<f64>() / period as f64
    })
    .collect()
}

fn generate_analysis(bars: &[Bar]) -> TimeframeAnalysis {
  let n = bars.len();
  let sma_20 = smoothed(bars, 20);
  let sma_50 = smoothed(bars, 50);

  let levels = |offset: f64| -> Vec<Level> {
    (1..=5)
      .map(|k| Level {
        price: 100.0 + offset * k as f64,
        strength: k as f64 * 2.0,
        touches: k,
        distance_from_current: offset * k as f64,
        is_dynamic: k % 2 == 0,
        last_touch_timestamp: bars.get(n / 2).map(|b| b.timestamp),
      })
      .collect()
  };

  let mut patterns = BTreeMap::new();
  patterns.insert(
    "hammer".to_string(),
    PatternFamily {
      pattern_name: "hammer".to_string(),
      total_count: n / 10,
      last_occurrence: None,
      occurrences: (0..n)
        .step_by(10)
        .map(|i| PatternOccurrence {
          name: "Hammer".to_string(),
          candle_index: i,
          pattern_type: PatternType::Bullish,
          confidence: 0.7,
          description: String::new(),
        })
        .collect(),
    },
  );

  TimeframeAnalysis {
    timeframe: "1minute".to_string(),
    data_points: n,
    indicators: Indicators {
      sma_20: Some(IndicatorSeries::new("SMA_20", sma_20.clone())),
      sma_50: Some(IndicatorSeries::new("SMA_50", sma_50.clone())),
      ema_20: Some(IndicatorSeries::new("EMA_20", sma_20.clone())),
      ema_50: Some(IndicatorSeries::new("EMA_50", sma_50.clone())),
      vwap: Some(IndicatorSeries::new("VWAP", sma_20.clone())),
      rsi: Some(RsiIndicator {
        values: (0..n).map(|i| if i < 14 { 0.0 } else { 30.0 + (i % 40) as f64 }).collect(),
        ..Default::default()
      }),
      macd: Some(MacdIndicator {
        macd_line: sma_20.iter().zip(&sma_50).map(|(a, b)| a - b).collect(),
        signal_line: sma_20.iter().zip(&sma_50).map(|(a, b)| (a - b) * 0.8).collect(),
        histogram: sma_20.iter().zip(&sma_50).map(|(a, b)| (a - b) * 0.2).collect(),
        ..Default::default()
      }),
      bollinger: Some(BandIndicator {
        upper_band: sma_20.iter().map(|v| if *v > 0.0 { v + 4.0 } else { 0.0 }).collect(),
        middle_band: sma_20.clone(),
        lower_band: sma_20.iter().map(|v| if *v > 0.0 { v - 4.0 } else { 0.0 }).collect(),
        signal: None,
      }),
    },
    candlestick_patterns: patterns,
    support_resistance: Some(SupportResistance {
      current_price: bars.last().map(|b| b.close),
      support_levels: Some(levels(-2.0)),
      resistance_levels: Some(levels(2.0)),
      ..Default::default()
    }),
  }
}

fn bench_compose_defaults(c: &mut Criterion) {
  let bars = generate_bars(1000);
  let analysis = generate_analysis(&bars);
  let composer = ChartComposer::default();
  let toggles = ToggleState::default();

  c.bench_function("compose_default_toggles_1000_bars", |b| {
    b.iter(|| {
      let _ = black_box(composer.compose(black_box(&bars), Some(&analysis), &toggles));
    })
  });
}

fn bench_compose_all(c: &mut Criterion) {
  let bars = generate_bars(1000);
  let analysis = generate_analysis(&bars);
  let composer = ChartComposer::default();
  let toggles = ToggleState::all();

  c.bench_function("compose_all_toggles_1000_bars", |b| {
    b.iter(|| {
      let _ = black_box(composer.compose(black_box(&bars), Some(&analysis), &toggles));
    })
  });
}

fn bench_scaling(c: &mut Criterion) {
  let composer = ChartComposer::default();
  let toggles = ToggleState::all();

  let mut group = c.benchmark_group("scaling");

  for size in [100, 500, 1000, 5000, 10000].iter() {
    let bars = generate_bars(*size);
    let analysis = generate_analysis(&bars);

    group.bench_with_input(BenchmarkId::new("compose", size), size, |b, _| {
      b.iter(|| {
        let _ = black_box(composer.compose(black_box(&bars), Some(&analysis), &toggles));
      })
    });
  }

  group.finish();
}

fn bench_parallel_compose(c: &mut Criterion) {
  let minute = generate_bars(1000);
  let hourly = generate_bars(1000);
  let daily = generate_bars(1000);
  let weekly = generate_bars(1000);

  let composer = ChartComposer::default();
  let toggles = ToggleState::all();

  let inputs: Vec<(&str, &[Bar])> =
    vec![("1minute", &minute), ("1hour", &hourly), ("1day", &daily), ("1week", &weekly)];

  c.bench_function("parallel_compose_4_timeframes", |b| {
    b.iter(|| {
      let _ = black_box(compose_parallel(&composer, black_box(inputs.clone()), None, &toggles));
    })
  });
}

fn bench_to_figure(c: &mut Criterion) {
  let bars = generate_bars(1000);
  let analysis = generate_analysis(&bars);
  let chart = ChartComposer::default().compose(&bars, Some(&analysis), &ToggleState::all());

  c.bench_function("to_figure_1000_bars", |b| {
    b.iter(|| {
      let _ = black_box(to_figure(black_box(&chart)));
    })
  });
}

criterion_group!(
  benches,
  bench_compose_defaults,
  bench_compose_all,
  bench_scaling,
  bench_parallel_compose,
  bench_to_figure,
);

criterion_main!(benches);
