//! Bookkeeping for one bulk move.

use super::direction::Direction;

/// Runtime state of a constant-velocity move.
#[derive(Debug, Clone)]
pub struct MoveExecutor {
    /// Total steps to emit (absolute value).
    total_steps: u64,

    /// Steps emitted so far.
    emitted: u64,

    /// Direction of the whole move.
    direction: Direction,
}

impl MoveExecutor {
    /// Create an executor for a signed step count.
    pub fn new(count: i64) -> Self {
        Self {
            total_steps: count.unsigned_abs(),
            emitted: 0,
            direction: Direction::from_steps(count),
        }
    }

    /// Check if every step has been emitted.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.emitted >= self.total_steps
    }

    /// Direction of the move.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Get the total number of steps.
    #[inline]
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Steps emitted so far.
    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Record one emitted step.
    ///
    /// Returns `true` if more steps remain.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        self.emitted += 1;
        !self.is_complete()
    }
}
