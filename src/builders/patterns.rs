//! Candlestick pattern annotations
//!
//! Only one family is drawn at a time. Markers sit a fixed fraction above
//! the bar high so they clear the wick, and are colored by the occurrence's
//! own bias rather than the family.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::analysis::{PatternFamily, PatternOccurrence, PatternType};
use crate::chart::{Marker, MarkerSeries, Pane, Series};
use crate::config::Palette;
use crate::style::{Color, MarkerSymbol};
use crate::OHLCV;

const PATTERN_MARKER_SIZE: f64 = 12.0;

pub fn pattern_color(pattern_type: PatternType, palette: &Palette) -> Color {
    match pattern_type {
        PatternType::Bullish => palette.bullish,
        PatternType::Bearish => palette.bearish,
        PatternType::Neutral => palette.neutral,
    }
}

/// `"hammer"` / `"shooting_star"` -> `"Hammer"` / `"Shooting Star"`
pub fn display_name(family: &str) -> String {
    family
        .split(['_', ' ', '-'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn occurrence_hover(name: &str, occ: &PatternOccurrence) -> String {
    let mut hover = format!(
        "{name}<br>Type: {}<br>Confidence: {:.0}%",
        occ.pattern_type.as_str(),
        occ.confidence * 100.0
    );
    if !occ.description.is_empty() {
        hover.push_str("<br>");
        hover.push_str(&occ.description);
    }
    hover
}

/// Family to draw: the explicit selection, else `default_family`
pub fn resolve_selection<'a>(selected: Option<&'a str>, default_family: &'a str) -> &'a str {
    selected.unwrap_or(default_family)
}

/// Markers for one pattern family.
///
/// Occurrences pointing past the bar set are skipped. `None` when no
/// occurrence can be placed.
pub fn pattern_markers<T: OHLCV>(
    bars: &[T],
    family_key: &str,
    family: &PatternFamily,
    palette: &Palette,
    offset: f64,
) -> Option<Series> {
    let name = if family.pattern_name.is_empty() {
        display_name(family_key)
    } else {
        display_name(&family.pattern_name)
    };

    let markers: Vec<Marker> = family
        .occurrences
        .iter()
        .filter_map(|occ| {
            let Some(bar) = bars.get(occ.candle_index) else {
                debug!(
                    family = family_key,
                    candle_index = occ.candle_index,
                    bars = bars.len(),
                    "pattern occurrence out of range, skipped"
                );
                return None;
            };
            Some(Marker {
                x: bar.timestamp(),
                y: bar.high() * (1.0 + offset),
                symbol: MarkerSymbol::Diamond,
                color: pattern_color(occ.pattern_type, palette),
                size: PATTERN_MARKER_SIZE,
                text: Some(name.clone()),
                hover: occurrence_hover(&name, occ),
            })
        })
        .collect();

    if markers.is_empty() {
        trace!(family = family_key, "no placeable occurrences");
        return None;
    }

    Some(Series::Marker(MarkerSeries {
        name: format!("{name} Patterns"),
        pane: Pane::Price,
        markers,
    }))
}

/// Markers for the selected family only.
///
/// Switching the selection replaces the annotation; nothing accumulates
/// because every call starts from the family map.
pub fn selected_pattern_markers<T: OHLCV>(
    bars: &[T],
    families: &BTreeMap<String, PatternFamily>,
    selected: &str,
    palette: &Palette,
    offset: f64,
) -> Option<Series> {
    let Some(family) = families.get(selected) else {
        trace!(family = selected, "selected pattern family not in analysis");
        return None;
    };
    pattern_markers(bars, selected, family, palette, offset)
}
