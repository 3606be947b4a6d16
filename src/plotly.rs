//! Plotly figure adapter
//!
//! Converts a [`ChartSpec`] into a Plotly-style figure (`{"data": [...],
//! "layout": {...}}`). This is the only place where symbolic panes become
//! concrete axis ids: slot `1` is `y`, slot `n` is `y{n}`.

use serde_json::{json, Map, Value};

use crate::chart::{
    BandSeries, BarSeries, CandlestickSeries, ChartSpec, LineSeries, MarkerSeries, Pane,
    PaneLayout, Point, Series,
};

/// Trace axis reference for a slot: `y`, `y2`, `y3`, ...
pub fn axis_ref(slot: usize) -> String {
    if slot <= 1 {
        "y".to_string()
    } else {
        format!("y{slot}")
    }
}

/// Layout key for a slot: `yaxis`, `yaxis2`, ...
pub fn axis_key(slot: usize) -> String {
    if slot <= 1 {
        "yaxis".to_string()
    } else {
        format!("yaxis{slot}")
    }
}

fn trace_axis(layout: &PaneLayout, pane: Pane) -> String {
    // The composer never emits a series for a missing pane; fall back to
    // the price axis for hand-built specs.
    axis_ref(layout.axis_slot(pane).unwrap_or(1))
}

fn xs<'a>(points: impl IntoIterator<Item = &'a Point>) -> Vec<i64> {
    points.into_iter().map(|p| p.x).collect()
}

fn ys<'a>(points: impl IntoIterator<Item = &'a Point>) -> Vec<f64> {
    points.into_iter().map(|p| p.y).collect()
}

fn candlestick_trace(s: &CandlestickSeries, yaxis: String) -> Value {
    json!({
        "type": "candlestick",
        "name": s.name,
        "x": s.candles.iter().map(|c| c.timestamp).collect::<Vec<_>>(),
        "open": s.candles.iter().map(|c| c.open).collect::<Vec<_>>(),
        "high": s.candles.iter().map(|c| c.high).collect::<Vec<_>>(),
        "low": s.candles.iter().map(|c| c.low).collect::<Vec<_>>(),
        "close": s.candles.iter().map(|c| c.close).collect::<Vec<_>>(),
        "increasing": { "line": { "color": s.up_color.to_hex() } },
        "decreasing": { "line": { "color": s.down_color.to_hex() } },
        "xaxis": "x",
        "yaxis": yaxis,
    })
}

fn bar_trace(s: &BarSeries, yaxis: String) -> Value {
    json!({
        "type": "bar",
        "name": s.name,
        "x": xs(&s.points),
        "y": ys(&s.points),
        "marker": { "color": s.colors.iter().map(|c| c.to_hex()).collect::<Vec<_>>() },
        "opacity": s.opacity,
        "xaxis": "x",
        "yaxis": yaxis,
    })
}

fn line_trace(s: &LineSeries, yaxis: String) -> Value {
    let mode = if s.label.is_some() { "lines+text" } else { "lines" };
    let mut trace = json!({
        "type": "scatter",
        "mode": mode,
        "name": s.name,
        "x": xs(&s.points),
        "y": ys(&s.points),
        "line": {
            "color": s.style.color.to_hex(),
            "width": s.style.width,
            "dash": s.style.dash.as_str(),
        },
        "opacity": s.style.opacity,
        "xaxis": "x",
        "yaxis": yaxis,
    });
    if let Some(label) = &s.label {
        // label only at the right end of the line
        let mut text = vec![String::new(); s.points.len()];
        if let Some(last) = text.last_mut() {
            last.clone_from(label);
        }
        trace["text"] = json!(text);
        trace["textposition"] = json!("middle right");
    }
    if let Some(hover) = &s.hover {
        trace["hovertext"] = json!(hover);
        trace["hoverinfo"] = json!("text");
    }
    trace
}

/// Closed polygon: upper boundary left-to-right, lower boundary back
fn band_trace(s: &BandSeries, yaxis: String) -> Value {
    let x: Vec<i64> = xs(&s.upper).into_iter().chain(xs(s.lower.iter().rev())).collect();
    let y: Vec<f64> = ys(&s.upper).into_iter().chain(ys(s.lower.iter().rev())).collect();
    json!({
        "type": "scatter",
        "mode": "lines",
        "name": s.name,
        "x": x,
        "y": y,
        "fill": "toself",
        "fillcolor": s.fill.to_rgba(s.opacity),
        "line": { "width": 0 },
        "hoverinfo": "skip",
        "showlegend": false,
        "xaxis": "x",
        "yaxis": yaxis,
    })
}

fn marker_trace(s: &MarkerSeries, yaxis: String) -> Value {
    let has_text = s.markers.iter().any(|m| m.text.is_some());
    let mode = if has_text { "markers+text" } else { "markers" };
    json!({
        "type": "scatter",
        "mode": mode,
        "name": s.name,
        "x": s.markers.iter().map(|m| m.x).collect::<Vec<_>>(),
        "y": s.markers.iter().map(|m| m.y).collect::<Vec<_>>(),
        "text": s.markers.iter().map(|m| m.text.clone().unwrap_or_default()).collect::<Vec<_>>(),
        "textposition": "top center",
        "hovertext": s.markers.iter().map(|m| m.hover.clone()).collect::<Vec<_>>(),
        "hoverinfo": "text",
        "marker": {
            "symbol": s.markers.iter().map(|m| m.symbol.as_str()).collect::<Vec<_>>(),
            "color": s.markers.iter().map(|m| m.color.to_hex()).collect::<Vec<_>>(),
            "size": s.markers.iter().map(|m| m.size).collect::<Vec<_>>(),
        },
        "xaxis": "x",
        "yaxis": yaxis,
    })
}

/// One Plotly trace for `series`
pub fn trace(series: &Series, layout: &PaneLayout) -> Value {
    let yaxis = trace_axis(layout, series.pane());
    match series {
        Series::Candlestick(s) => candlestick_trace(s, yaxis),
        Series::Bar(s) => bar_trace(s, yaxis),
        Series::Line(s) => line_trace(s, yaxis),
        Series::Band(s) => band_trace(s, yaxis),
        Series::Marker(s) => marker_trace(s, yaxis),
    }
}

fn layout_json(spec: &ChartSpec) -> Value {
    let mut layout = Map::new();

    let mut xaxis = json!({
        "type": "date",
        "rangeslider": { "visible": false },
        "anchor": axis_ref(1),
    });
    if let Some(range) = spec.time_range {
        xaxis["range"] = json!([range.min, range.max]);
    }
    layout.insert("xaxis".to_string(), xaxis);

    for axis in spec.layout.axes() {
        let mut y = json!({
            "domain": [axis.domain.low, axis.domain.high],
            "title": axis.pane.as_str(),
            "fixedrange": axis.fixed_range,
        });
        if axis.slot > 1 {
            y["anchor"] = json!("x");
        }
        if let Some(range) = axis.range {
            y["range"] = json!([range.min, range.max]);
        }
        layout.insert(axis_key(axis.slot), y);
    }

    layout.insert("showlegend".to_string(), json!(true));
    layout.insert("hovermode".to_string(), json!("x unified"));
    Value::Object(layout)
}

/// Full Plotly figure
pub fn to_figure(spec: &ChartSpec) -> Value {
    let data: Vec<Value> = spec.series.iter().map(|s| trace(s, &spec.layout)).collect();
    json!({
        "data": data,
        "layout": layout_json(spec),
    })
}
