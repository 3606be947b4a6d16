//! Composer configuration
//!
//! Every tunable constant of the layout and styling lives here so a
//! configuration file can override it:
//!
//! ```rust
//! use chartspec::config::ChartConfig;
//!
//! let config: ChartConfig = serde_json::from_str(r#"{
//!     "layout": { "oscillator_height": 0.25 },
//!     "default_pattern": "doji"
//! }"#).unwrap();
//! assert!(config.validate().is_ok());
//! ```

use crate::style::Color;
use crate::{ChartError, Ratio, Result};

// ============================================================
// LAYOUT
// ============================================================

/// Pane heights and axis padding, all fractions of the whole
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Height of each oscillator pane (RSI, MACD)
    pub oscillator_height: Ratio,
    pub volume_height: Ratio,
    /// Gap between stacked panes
    pub spacing: Ratio,
    /// Time axis padding, fraction of the time span on each side
    pub time_padding: Ratio,
    /// Price axis padding, fraction of the price range on each side
    pub price_padding: Ratio,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            oscillator_height: Ratio::new_const(0.20),
            volume_height: Ratio::new_const(0.15),
            spacing: Ratio::new_const(0.02),
            time_padding: Ratio::new_const(0.05),
            price_padding: Ratio::new_const(0.10),
        }
    }
}

impl LayoutConfig {
    /// Height left for the price pane with both oscillators shown
    pub fn min_price_height(&self) -> f64 {
        let osc = self.oscillator_height.get() + self.spacing.get();
        1.0 - 2.0 * osc - self.volume_height.get() - self.spacing.get()
    }

    pub fn validate(&self) -> Result<()> {
        if self.oscillator_height.get() <= 0.0 || self.volume_height.get() <= 0.0 {
            return Err(ChartError::InvalidValue("pane heights must be > 0"));
        }
        let remaining = self.min_price_height();
        if remaining <= 0.0 {
            return Err(ChartError::InvalidConfig(format!(
                "pane heights leave {remaining:.3} for the price pane"
            )));
        }
        Ok(())
    }
}

// ============================================================
// PALETTE
// ============================================================

/// Fixed hues of every series family
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub candle_up: Color,
    pub candle_down: Color,
    pub volume_up: Color,
    pub volume_down: Color,
    pub sma_20: Color,
    pub sma_50: Color,
    pub ema_20: Color,
    pub ema_50: Color,
    pub vwap: Color,
    pub bollinger: Color,
    pub rsi: Color,
    pub macd: Color,
    pub macd_signal: Color,
    pub reference: Color,
    pub support: Color,
    pub resistance: Color,
    pub current_price: Color,
    pub bullish: Color,
    pub bearish: Color,
    pub neutral: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            candle_up: Color::rgb(0x26, 0xa6, 0x9a),
            candle_down: Color::rgb(0xef, 0x53, 0x50),
            volume_up: Color::rgb(0x26, 0xa6, 0x9a),
            volume_down: Color::rgb(0xef, 0x53, 0x50),
            sma_20: Color::rgb(0xff, 0x98, 0x00),
            sma_50: Color::rgb(0x9c, 0x27, 0xb0),
            ema_20: Color::rgb(0x21, 0x96, 0xf3),
            ema_50: Color::rgb(0x3f, 0x51, 0xb5),
            vwap: Color::rgb(0x79, 0x55, 0x48),
            bollinger: Color::rgb(0x60, 0x7d, 0x8b),
            rsi: Color::rgb(0x67, 0x3a, 0xb7),
            macd: Color::rgb(0x21, 0x96, 0xf3),
            macd_signal: Color::rgb(0xff, 0x57, 0x22),
            reference: Color::rgb(0x9e, 0x9e, 0x9e),
            support: Color::rgb(0x00, 0xc8, 0x53),
            resistance: Color::rgb(0xff, 0x17, 0x44),
            current_price: Color::rgb(0x29, 0x79, 0xff),
            bullish: Color::rgb(0x00, 0xe6, 0x76),
            bearish: Color::rgb(0xff, 0x52, 0x52),
            neutral: Color::rgb(0xff, 0xd7, 0x40),
        }
    }
}

// ============================================================
// CHART CONFIG
// ============================================================

/// RSI reference levels used when the indicator does not carry its own
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RsiLevels {
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiLevels {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub layout: LayoutConfig,
    /// Minimum candle body as a fraction of the average bar range
    pub min_body_factor: Ratio,
    /// Pattern markers sit this fraction above the bar high
    pub pattern_offset: Ratio,
    /// Level strength at which opacity saturates
    pub strength_cap: f64,
    /// Pattern family drawn when no explicit selection exists
    pub default_pattern: String,
    pub rsi: RsiLevels,
    pub palette: Palette,
    /// Validate bars in `try_compose`
    pub validate_data: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            min_body_factor: Ratio::new_const(0.5),
            pattern_offset: Ratio::new_const(0.02),
            strength_cap: 10.0,
            default_pattern: "hammer".to_string(),
            rsi: RsiLevels::default(),
            palette: Palette::default(),
            validate_data: false,
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        if !(self.strength_cap.is_finite() && self.strength_cap > 0.0) {
            return Err(ChartError::OutOfRange {
                field: "strength_cap",
                value: self.strength_cap,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            });
        }
        if self.default_pattern.trim().is_empty() {
            return Err(ChartError::InvalidConfig(
                "default_pattern must not be empty".to_string(),
            ));
        }
        if self.rsi.oversold >= self.rsi.overbought {
            return Err(ChartError::InvalidConfig(format!(
                "rsi oversold {} must be below overbought {}",
                self.rsi.oversold, self.rsi.overbought
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ChartConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.layout.min_price_height() - 0.39).abs() < 1e-9);
    }

    #[test]
    fn test_oversized_panes_rejected() {
        let layout = LayoutConfig {
            oscillator_height: Ratio::new(0.4).unwrap(),
            ..Default::default()
        };
        assert!(matches!(layout.validate(), Err(ChartError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_pane_height_rejected() {
        let layout = LayoutConfig {
            volume_height: Ratio::new(0.0).unwrap(),
            ..Default::default()
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ChartConfig = serde_json::from_str(
            r##"{"layout": {"spacing": 0.01}, "palette": {"support": "#00ff00"}}"##,
        )
        .unwrap();
        assert_eq!(config.layout.spacing.get(), 0.01);
        assert_eq!(config.layout.oscillator_height.get(), 0.20);
        assert_eq!(config.palette.support, Color::rgb(0, 255, 0));
        assert_eq!(config.default_pattern, "hammer");
    }

    #[test]
    fn test_out_of_range_ratio_rejected_on_load() {
        let parsed = serde_json::from_str::<ChartConfig>(r#"{"layout": {"spacing": 1.5}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_invalid_strength_cap() {
        let config = ChartConfig {
            strength_cap: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ChartError::OutOfRange { field: "strength_cap", .. })
        ));
    }

    #[test]
    fn test_inverted_rsi_levels() {
        let config = ChartConfig {
            rsi: RsiLevels {
                overbought: 30.0,
                oversold: 70.0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
