//! Unit types for physical quantities.
//!
//! Provides the angle newtype used for informational conversions and the
//! [`StepMode`] microstep selector with its fixed M0/M1/M2 encoding.

use core::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Angular quantity in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f32);

/// Microstep resolution selected on the driver's M0/M1/M2 inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepMode {
    /// Full step (no microstepping).
    #[default]
    Full,
    /// Half step.
    Half,
    /// Quarter step.
    Quarter,
    /// Eighth step.
    Eighth,
    /// Sixteenth step.
    Sixteenth,
    /// Thirty-second step.
    ThirtySecond,
}

impl StepMode {
    /// Every mode, finest last.
    pub const ALL: [StepMode; 6] = [
        StepMode::Full,
        StepMode::Half,
        StepMode::Quarter,
        StepMode::Eighth,
        StepMode::Sixteenth,
        StepMode::ThirtySecond,
    ];

    /// Microsteps per full step.
    #[inline]
    pub const fn divisor(self) -> u16 {
        match self {
            StepMode::Full => 1,
            StepMode::Half => 2,
            StepMode::Quarter => 4,
            StepMode::Eighth => 8,
            StepMode::Sixteenth => 16,
            StepMode::ThirtySecond => 32,
        }
    }

    /// Logic levels for (M0, M1, M2), `true` = high.
    ///
    /// Matches the DRV8825 mode table.
    #[inline]
    pub const fn pin_levels(self) -> [bool; 3] {
        match self {
            StepMode::Full => [false, false, false],
            StepMode::Half => [true, false, false],
            StepMode::Quarter => [false, true, false],
            StepMode::Eighth => [true, true, false],
            StepMode::Sixteenth => [false, false, true],
            StepMode::ThirtySecond => [true, false, true],
        }
    }

    /// Lower-case name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            StepMode::Full => "full",
            StepMode::Half => "half",
            StepMode::Quarter => "quarter",
            StepMode::Eighth => "eighth",
            StepMode::Sixteenth => "sixteenth",
            StepMode::ThirtySecond => "thirty_second",
        }
    }

    /// Look up a mode by its divisor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidStepMode` for anything but 1, 2, 4, 8, 16, 32.
    pub fn from_divisor(divisor: u16) -> Result<Self, ConfigError> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.divisor() == divisor)
            .ok_or(ConfigError::InvalidStepMode(divisor))
    }
}

impl TryFrom<u16> for StepMode {
    type Error = ConfigError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_divisor(value)
    }
}

impl FromStr for StepMode {
    type Err = ConfigError;

    /// Accepts a mode name (`"half"`, `"thirty_second"`, ...) or its divisor (`"2"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(divisor) = s.parse::<u16>() {
            return Self::from_divisor(divisor);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let mut name = heapless::String::new();
                for c in s.chars() {
                    if name.push(c).is_err() {
                        break;
                    }
                }
                ConfigError::UnknownStepMode(name)
            })
    }
}

impl<'de> Deserialize<'de> for StepMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use core::fmt::Write;
        let value = u16::deserialize(deserializer)?;
        StepMode::from_divisor(value).map_err(|e| {
            let mut buf = heapless::String::<128>::new();
            let _ = write!(buf, "{}", e);
            serde::de::Error::custom(buf.as_str())
        })
    }
}
