//! Limit switch wiring configuration.

use serde::Deserialize;

/// Logic level at which a limit switch input counts as triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchPolarity {
    /// Triggered when the input reads high.
    #[default]
    ActiveHigh,
    /// Triggered when the input reads low (pull-up with switch to ground).
    ActiveLow,
}

impl SwitchPolarity {
    /// Whether an input reading `is_high` means the switch is triggered.
    #[inline]
    pub fn is_triggered(self, is_high: bool) -> bool {
        match self {
            SwitchPolarity::ActiveHigh => is_high,
            SwitchPolarity::ActiveLow => !is_high,
        }
    }
}
