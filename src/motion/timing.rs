//! Step pulse timing derived from a constant step rate.

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// High and low durations of one step pulse.
///
/// The two halves always add up to the full pulse period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepTiming {
    high_ns: u32,
    low_ns: u32,
}

impl StepTiming {
    /// Timing for `steps_per_sec`. Returns `None` for zero.
    pub fn from_speed(steps_per_sec: u32) -> Option<Self> {
        if steps_per_sec == 0 {
            return None;
        }
        let period_ns = NANOS_PER_SEC / steps_per_sec;
        let high_ns = period_ns / 2;
        Some(Self {
            high_ns,
            low_ns: period_ns - high_ns,
        })
    }

    /// Time the STEP line is held high.
    #[inline]
    pub fn high_ns(&self) -> u32 {
        self.high_ns
    }

    /// Time the STEP line is held low after the rising edge half.
    #[inline]
    pub fn low_ns(&self) -> u32 {
        self.low_ns
    }

    /// Full pulse period.
    #[inline]
    pub fn period_ns(&self) -> u32 {
        self.high_ns + self.low_ns
    }
}
