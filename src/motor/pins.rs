//! Pin helpers: the absent-pin placeholder and the optional mode-select lines.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, PinState};

use crate::config::StepMode;
use crate::error::{Error, MotorError, PinRole, Result};

/// Placeholder for a line that is not wired to the microcontroller.
///
/// Writes are ignored and reads return low.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

impl InputPin for NoPin {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(true)
    }
}

/// M0, M1 and M2 microstep select outputs.
///
/// A `None` line is hard-wired on the board and never written.
#[derive(Debug)]
pub struct ModePins<M> {
    pins: [Option<M>; 3],
}

impl<M> Default for ModePins<M> {
    fn default() -> Self {
        Self {
            pins: [None, None, None],
        }
    }
}

impl<M: OutputPin> ModePins<M> {
    /// Wrap the three mode lines.
    pub fn new(m0: Option<M>, m1: Option<M>, m2: Option<M>) -> Self {
        Self { pins: [m0, m1, m2] }
    }

    /// No software-controlled mode lines.
    pub fn none() -> Self {
        Self::default()
    }

    /// Drive the connected lines to `mode`'s pattern.
    pub(crate) fn apply(&mut self, mode: StepMode) -> Result<()> {
        for index in 0..self.pins.len() {
            self.write(index, mode)?;
        }
        Ok(())
    }

    /// Move the lines from `from`'s pattern to `to`'s.
    ///
    /// If a write fails, lines already switched are driven back to `from` on a
    /// best-effort basis before the error is returned.
    pub(crate) fn switch(&mut self, from: StepMode, to: StepMode) -> Result<()> {
        for index in 0..self.pins.len() {
            if let Err(err) = self.write(index, to) {
                for written in 0..index {
                    // The original write error is the one reported.
                    let _ = self.write(written, from);
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn write(&mut self, index: usize, mode: StepMode) -> Result<()> {
        let level = mode.pin_levels()[index];
        match &mut self.pins[index] {
            Some(pin) => pin
                .set_state(PinState::from(level))
                .map_err(|_| Error::from(MotorError::Pin(PinRole::Mode(index as u8)))),
            None => Ok(()),
        }
    }

    /// Give the lines back.
    pub fn release(self) -> [Option<M>; 3] {
        self.pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pin_reads_low() {
        let mut pin = NoPin;
        assert_eq!(pin.is_high(), Ok(false));
        assert_eq!(pin.set_high(), Ok(()));
    }

    #[test]
    fn test_unconnected_mode_pins_accept_any_mode() {
        let mut pins: ModePins<NoPin> = ModePins::none();
        for mode in StepMode::ALL {
            assert!(pins.apply(mode).is_ok());
        }
    }

    /// Output that records its level and can be told to fail.
    #[derive(Default)]
    struct TestPin {
        level: Option<bool>,
        broken: bool,
    }

    #[derive(Debug)]
    struct TestPinError;

    impl embedded_hal::digital::Error for TestPinError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl ErrorType for TestPin {
        type Error = TestPinError;
    }

    impl OutputPin for TestPin {
        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            self.set(false)
        }

        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            self.set(true)
        }
    }

    impl TestPin {
        fn set(&mut self, level: bool) -> core::result::Result<(), TestPinError> {
            if self.broken {
                return Err(TestPinError);
            }
            self.level = Some(level);
            Ok(())
        }
    }

    #[test]
    fn test_failed_switch_restores_written_lines() {
        let broken = TestPin {
            broken: true,
            ..TestPin::default()
        };
        let mut pins = ModePins::new(Some(TestPin::default()), Some(broken), None);
        pins.apply(StepMode::Full).unwrap_err();
        assert_eq!(pins.pins[0].as_ref().unwrap().level, Some(false));

        let result = pins.switch(StepMode::Full, StepMode::Half);
        assert_eq!(result, Err(Error::Motor(MotorError::Pin(PinRole::Mode(1)))));
        assert_eq!(pins.pins[0].as_ref().unwrap().level, Some(false));
    }
}
