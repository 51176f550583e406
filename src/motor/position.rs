//! Position tracking for stepper motors.
//!
//! Current and target positions in microsteps at the configured step mode.

use crate::error::{MotorError, Result};
use crate::motion::Direction;

/// Motor position tracker.
///
/// `current` follows emitted pulses only. `target` is bookkeeping for the last
/// absolute or relative move request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    current: i64,
    target: i64,
}

impl Position {
    /// Create a tracker at the origin.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position in microsteps.
    #[inline]
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Last requested target in microsteps.
    #[inline]
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Signed distance from current to target.
    #[inline]
    pub fn steps_to_target(&self) -> i64 {
        self.target.wrapping_sub(self.current)
    }

    /// Record one pulse emitted in `direction`.
    #[inline]
    pub(crate) fn step(&mut self, direction: Direction) {
        self.current = self.current.wrapping_add(direction.sign());
    }

    /// Set an absolute target and return the delta from current.
    pub(crate) fn aim_absolute(&mut self, target: i64) -> Result<i64> {
        let delta = target
            .checked_sub(self.current)
            .ok_or(MotorError::PositionOverflow {
                current: self.current,
                requested: target,
            })?;
        self.target = target;
        Ok(delta)
    }

    /// Set the target `delta` away from current.
    pub(crate) fn aim_relative(&mut self, delta: i64) -> Result<i64> {
        let target = self
            .current
            .checked_add(delta)
            .ok_or(MotorError::PositionOverflow {
                current: self.current,
                requested: delta,
            })?;
        self.target = target;
        Ok(delta)
    }
}
