//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::units::Degrees;
use super::{DriverConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks every driver:
/// - Full step angle is finite and positive
/// - Initial speed, when given, is positive
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, driver) in config.drivers.iter() {
        validate_driver(driver)?;
    }
    Ok(())
}

/// Validate a single driver configuration.
pub fn validate_driver(config: &DriverConfig) -> Result<()> {
    validate_full_step_angle(config.full_step_angle)?;

    if let Some(speed) = config.speed {
        validate_speed(speed)?;
    }

    Ok(())
}

pub(crate) fn validate_full_step_angle(angle: Degrees) -> Result<()> {
    // NaN fails the comparison as well
    if !(angle.0.is_finite() && angle.0 > 0.0) {
        return Err(Error::Config(ConfigError::InvalidFullStepAngle(angle.0)));
    }
    Ok(())
}

pub(crate) fn validate_speed(speed: u32) -> Result<()> {
    if speed == 0 {
        return Err(Error::Config(ConfigError::InvalidSpeed(speed)));
    }
    Ok(())
}
