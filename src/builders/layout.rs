//! Pane layout allocation
//!
//! Panes stack bottom-up in a fixed order: MACD, RSI, volume, price. Hiding
//! an oscillator only shifts the panes above it. Price takes whatever is
//! left up to `1.0`.
//!
//! Axis slots are assigned here, once, in the same pass: price `1`,
//! volume `2`, then RSI and MACD take the next free slots in that order.

use crate::chart::{AxisRange, Domain, Pane, PaneAxis, PaneLayout};
use crate::config::LayoutConfig;

/// Fixed value range of the RSI pane
pub const RSI_RANGE: AxisRange = AxisRange {
    min: 0.0,
    max: 100.0,
};

/// Allocate vertical domains for the enabled panes
pub fn allocate(config: &LayoutConfig, show_rsi: bool, show_macd: bool) -> PaneLayout {
    let osc = config.oscillator_height.get();
    let vol = config.volume_height.get();
    let gap = config.spacing.get();

    let mut axes = Vec::with_capacity(4);
    let mut bottom = 0.0;

    // Price and volume always exist; oscillators follow in slot order.
    let rsi_slot = 3;
    let macd_slot = if show_rsi { 4 } else { 3 };

    if show_macd {
        axes.push(PaneAxis {
            pane: Pane::Macd,
            domain: Domain {
                low: bottom,
                high: bottom + osc,
            },
            slot: macd_slot,
            range: None,
            fixed_range: false,
        });
        bottom += osc + gap;
    }

    if show_rsi {
        axes.push(PaneAxis {
            pane: Pane::Rsi,
            domain: Domain {
                low: bottom,
                high: bottom + osc,
            },
            slot: rsi_slot,
            range: Some(RSI_RANGE),
            fixed_range: true,
        });
        bottom += osc + gap;
    }

    axes.push(PaneAxis {
        pane: Pane::Volume,
        domain: Domain {
            low: bottom,
            high: bottom + vol,
        },
        slot: 2,
        range: None,
        fixed_range: false,
    });
    bottom += vol + gap;

    axes.push(PaneAxis {
        pane: Pane::Price,
        domain: Domain {
            low: bottom,
            high: 1.0,
        },
        slot: 1,
        range: None,
        fixed_range: false,
    });

    PaneLayout::from_axes(axes)
}
