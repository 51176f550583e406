//! Motion module for drv-stepper.
//!
//! Provides direction handling, pulse timing and per-move step bookkeeping.

mod direction;
mod executor;
mod timing;

pub use direction::Direction;
pub use executor::MoveExecutor;
pub use timing::StepTiming;
