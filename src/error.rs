//! Error types for drv-stepper.
//!
//! Configuration mistakes, motor operation failures and hardware faults share one
//! [`Error`] type. [`Error::kind`] collapses them into the coarse [`ErrorKind`]
//! classes callers usually branch on.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all drv-stepper operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing, validation or construction error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// An argument was out of range or not recognized. State is unchanged.
    InvalidArgument,
    /// The controller is missing a setting the operation needs (no speed set).
    NotConfigured,
    /// A GPIO operation failed in the underlying HAL.
    Hardware,
    /// Construction or configuration file problem.
    Configuration,
}

/// Role of a pin, used to report which line failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinRole {
    /// STEP output
    Step,
    /// DIR output
    Direction,
    /// nENBL output
    Enable,
    /// Microstep mode select output M0, M1 or M2 (index 0..=2)
    Mode(u8),
    /// Limit switch input (index into the configured list)
    Limit(u8),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Invalid microstep divisor (must be 1, 2, 4, 8, 16 or 32)
    InvalidStepMode(u16),
    /// Unrecognized microstep mode name
    UnknownStepMode(heapless::String<16>),
    /// Full step angle must be finite and > 0
    InvalidFullStepAngle(f32),
    /// Speed must be > 0 steps per second
    InvalidSpeed(u32),
    /// Driver name not found in configuration
    DriverNotFound(heapless::String<32>),
    /// A required builder part was not supplied
    Missing(&'static str),
    /// More limit switch inputs than the controller can hold
    TooManyLimitPins {
        /// Maximum number of limit inputs
        max: usize,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    Pin(PinRole),
    /// A step was requested before a speed was set
    SpeedNotSet,
    /// Requested speed is not positive
    InvalidSpeed(u32),
    /// Position arithmetic would overflow
    PositionOverflow {
        /// Current position in microsteps
        current: i64,
        /// Requested target or delta
        requested: i64,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(e) => match e {
                ConfigError::InvalidStepMode(_)
                | ConfigError::UnknownStepMode(_)
                | ConfigError::InvalidFullStepAngle(_)
                | ConfigError::InvalidSpeed(_) => ErrorKind::InvalidArgument,
                _ => ErrorKind::Configuration,
            },
            Error::Motor(e) => match e {
                MotorError::Pin(_) => ErrorKind::Hardware,
                MotorError::SpeedNotSet => ErrorKind::NotConfigured,
                MotorError::InvalidSpeed(_) | MotorError::PositionOverflow { .. } => {
                    ErrorKind::InvalidArgument
                }
            },
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinRole::Step => write!(f, "STEP"),
            PinRole::Direction => write!(f, "DIR"),
            PinRole::Enable => write!(f, "ENABLE"),
            PinRole::Mode(i) => write!(f, "M{}", i),
            PinRole::Limit(i) => write!(f, "limit switch #{}", i),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidStepMode(v) => {
                write!(f, "Invalid step mode: {}. Valid values: 1, 2, 4, 8, 16, 32", v)
            }
            ConfigError::UnknownStepMode(name) => write!(f, "Unknown step mode '{}'", name),
            ConfigError::InvalidFullStepAngle(v) => {
                write!(f, "Invalid full step angle: {}. Must be > 0", v)
            }
            ConfigError::InvalidSpeed(v) => write!(f, "Invalid speed: {}. Must be > 0", v),
            ConfigError::DriverNotFound(name) => write!(f, "Driver '{}' not found", name),
            ConfigError::Missing(what) => write!(f, "{} is required", what),
            ConfigError::TooManyLimitPins { max } => {
                write!(f, "Too many limit switch pins (max {})", max)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::Pin(role) => write!(f, "GPIO operation on {} pin failed", role),
            MotorError::SpeedNotSet => write!(f, "Speed must be set before stepping"),
            MotorError::InvalidSpeed(v) => write!(f, "Invalid speed: {}. Must be > 0", v),
            MotorError::PositionOverflow { current, requested } => {
                write!(f, "Position overflow: current {} with request {}", current, requested)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::from(MotorError::SpeedNotSet).kind(),
            ErrorKind::NotConfigured
        );
        assert_eq!(
            Error::from(MotorError::InvalidSpeed(0)).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            Error::from(ConfigError::InvalidStepMode(3)).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            Error::from(MotorError::Pin(PinRole::Step)).kind(),
            ErrorKind::Hardware
        );
        assert_eq!(
            Error::from(ConfigError::Missing("step_pin")).kind(),
            ErrorKind::Configuration
        );
    }
}
