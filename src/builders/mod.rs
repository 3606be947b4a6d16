//! Chart component builders
//!
//! Each module turns one kind of input into typed series or layout data.
//! All of them are pure functions of their inputs.
//!
//! # Components
//!
//! - **geometry**: candle body normalization
//! - **axis**: padded time/price ranges
//! - **layout**: pane domains and axis slots
//! - **overlays**: moving averages, Bollinger bands, RSI, MACD
//! - **levels**: support/resistance lines, touches, breaks, current price
//! - **patterns**: annotations for the selected candlestick pattern family

pub mod axis;
pub mod geometry;
pub mod helpers;
pub mod layout;
pub mod levels;
pub mod overlays;
pub mod patterns;

pub use axis::{price_range, time_range};
pub use geometry::{average_range, normalize_body, normalize_candles};
pub use layout::{allocate, RSI_RANGE};
pub use levels::{level_opacity, level_width, support_resistance, LevelSide};
pub use patterns::{pattern_markers, resolve_selection, selected_pattern_markers};
