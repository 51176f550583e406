//! Driver configuration from TOML.

use heapless::String;
use serde::Deserialize;

use super::limits::SwitchPolarity;
use super::units::{Degrees, StepMode};

/// Default full step angle of a 200 step/rev hybrid stepper.
pub const DEFAULT_FULL_STEP_ANGLE: Degrees = Degrees(1.8);

/// Configuration for one step/direction driver and its motor.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Microstep divisor (1, 2, 4, 8, 16, 32).
    #[serde(default)]
    pub step_mode: StepMode,

    /// Degrees per full step.
    #[serde(default = "default_full_step_angle", rename = "full_step_angle_deg")]
    pub full_step_angle: Degrees,

    /// Initial speed in steps per second.
    #[serde(default, rename = "speed_steps_per_sec")]
    pub speed: Option<u32>,

    /// Swap the DIR pin levels for CW and CCW.
    #[serde(default)]
    pub invert_direction: bool,

    /// Level at which limit switch inputs read as triggered.
    #[serde(default)]
    pub limit_polarity: SwitchPolarity,
}

fn default_full_step_angle() -> Degrees {
    DEFAULT_FULL_STEP_ANGLE
}

impl DriverConfig {
    /// Full steps per motor revolution, rounded to the nearest whole step.
    pub fn full_steps_per_revolution(&self) -> u32 {
        full_steps_per_revolution(self.full_step_angle)
    }

    /// Microsteps per motor revolution at the configured step mode.
    ///
    /// Saturates at `u32::MAX` for very small full step angles.
    pub fn steps_per_revolution(&self) -> u32 {
        self.full_steps_per_revolution()
            .saturating_mul(self.step_mode.divisor() as u32)
    }
}

/// Full steps per revolution for a given full step angle.
pub(crate) fn full_steps_per_revolution(full_step_angle: Degrees) -> u32 {
    if full_step_angle.0 > 0.0 {
        libm::roundf(360.0 / full_step_angle.0) as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_steps() {
        let config = DriverConfig {
            name: String::try_from("test").unwrap(),
            step_mode: StepMode::Sixteenth,
            full_step_angle: Degrees(1.8),
            speed: None,
            invert_direction: false,
            limit_polarity: SwitchPolarity::ActiveHigh,
        };

        // 200 * 16 = 3200
        assert_eq!(config.full_steps_per_revolution(), 200);
        assert_eq!(config.steps_per_revolution(), 3200);
    }

    #[test]
    fn test_half_degree_motor() {
        assert_eq!(full_steps_per_revolution(Degrees(0.9)), 400);
        assert_eq!(full_steps_per_revolution(Degrees(7.5)), 48);
    }

    #[test]
    fn test_tiny_step_angle_saturates() {
        let config = DriverConfig {
            name: String::try_from("tiny").unwrap(),
            step_mode: StepMode::ThirtySecond,
            full_step_angle: Degrees(1e-6),
            speed: None,
            invert_direction: false,
            limit_polarity: SwitchPolarity::ActiveHigh,
        };

        assert_eq!(config.steps_per_revolution(), u32::MAX);
    }
}
