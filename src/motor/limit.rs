//! Limit switch polling.

use embedded_hal::digital::InputPin;

use crate::config::SwitchPolarity;
use crate::error::{MotorError, PinRole, Result};

/// Returns `true` if any active-high limit switch in `pins` reads triggered.
///
/// An empty slice is never triggered, so a motor without switches may always
/// move. Every call reads the live input state.
///
/// # Errors
///
/// Returns `MotorError::Pin` if an input cannot be read.
pub fn check_limit_switches<P: InputPin>(pins: &mut [P]) -> Result<bool> {
    check_limit_switches_with(pins, SwitchPolarity::ActiveHigh)
}

/// Like [`check_limit_switches`] with an explicit trigger polarity.
///
/// Stops reading at the first triggered input.
pub fn check_limit_switches_with<P: InputPin>(
    pins: &mut [P],
    polarity: SwitchPolarity,
) -> Result<bool> {
    for (index, pin) in pins.iter_mut().enumerate() {
        let high = pin
            .is_high()
            .map_err(|_| MotorError::Pin(PinRole::Limit(index as u8)))?;
        if polarity.is_triggered(high) {
            crate::fmt::debug!("limit switch {} triggered", index);
            return Ok(true);
        }
    }
    Ok(false)
}
