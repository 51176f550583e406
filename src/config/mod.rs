//! Configuration module for drv-stepper.
//!
//! Provides types for loading and validating driver configurations from TOML
//! files (with `std` feature) or pre-parsed data.

mod limits;
mod motor;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use limits::SwitchPolarity;
pub use motor::{DriverConfig, DEFAULT_FULL_STEP_ANGLE};
pub use system::{SystemConfig, MAX_DRIVERS};
pub use validation::{validate_config, validate_driver};

pub(crate) use motor::full_steps_per_revolution;
pub(crate) use validation::{validate_full_step_angle, validate_speed};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, StepMode};

/// Copy as much of `text` as fits into a bounded string.
pub(crate) fn truncated<const N: usize>(text: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_keeps_whole_chars() {
        let short: heapless::String<8> = truncated("pan");
        assert_eq!(short.as_str(), "pan");

        let cut: heapless::String<4> = truncated("aéébc");
        assert_eq!(cut.as_str(), "aé");
    }
}
