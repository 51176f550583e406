//! # drv-stepper
//!
//! Step/direction stepper motor control for DRV8825-class microstepping drivers,
//! built on embedded-hal 1.0.
//!
//! ## Features
//!
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR/ENABLE/M0-M2, `InputPin` for
//!   limit switches, `DelayNs` for pulse timing
//! - **no_std compatible**: Core library works without standard library
//! - **Microstep modes**: Full to 1/32 step, written to the mode select lines
//! - **Position tracking**: Signed microstep position, updated per emitted pulse
//! - **Interruptible moves**: Limit switches or a caller predicate checked between steps
//! - **Configuration-driven**: Driver settings from TOML files (`std` feature)
//!
//! ## Sign convention
//!
//! Positive step counts turn the motor counter-clockwise and increase the
//! position. Negative counts turn it clockwise.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drv_stepper::{StepMode, StepperMotorBuilder};
//!
//! let mut motor = StepperMotorBuilder::new()
//!     .step_pin(step_pin)
//!     .dir_pin(dir_pin)
//!     .enable_pin(enable_pin)
//!     .mode_pins(Some(m0), Some(m1), Some(m2))
//!     .limit_pins([home_switch])
//!     .step_mode(StepMode::Half)
//!     .delay(delay)
//!     .build()?;
//!
//! motor.set_speed(400)?;
//! motor.enable()?;
//! let reached = motor.move_to_absolute(800)?;
//! motor.disable()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_config, DriverConfig, StepMode, SwitchPolarity, SystemConfig};
pub use error::{Error, ErrorKind, Result};
pub use motion::{Direction, StepTiming};
pub use motor::{
    check_limit_switches, check_limit_switches_with, NoPin, StepperMotor, StepperMotorBuilder,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::Degrees;
