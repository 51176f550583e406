//! Motor module for drv-stepper.
//!
//! Provides the step/direction driver with position tracking, its builder, and
//! limit switch polling.

mod builder;
mod driver;
mod limit;
mod pins;
mod position;

pub use builder::StepperMotorBuilder;
pub use driver::{StepperMotor, StepperParts, ENABLE_ACTIVE_LEVEL, MAX_LIMIT_PINS};
pub use limit::{check_limit_switches, check_limit_switches_with};
pub use pins::{ModePins, NoPin};
pub use position::Position;
