//! Rotation direction and its sign convention.
//!
//! Positive step counts turn the shaft counter-clockwise and increase the
//! tracked position. Negative counts turn it clockwise and decrease it.

use embedded_hal::digital::PinState;

/// Direction of motor rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (negative step count).
    Clockwise,
    /// Counter-clockwise (positive step count).
    CounterClockwise,
}

impl Direction {
    /// Get direction from signed step count. Zero maps to counter-clockwise.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => -1,
            Direction::CounterClockwise => 1,
        }
    }

    /// DIR pin level for this direction.
    ///
    /// Counter-clockwise is low and clockwise is high unless `inverted`.
    #[inline]
    pub fn pin_state(self, inverted: bool) -> PinState {
        let high = match self {
            Direction::Clockwise => !inverted,
            Direction::CounterClockwise => inverted,
        };
        PinState::from(high)
    }
}
