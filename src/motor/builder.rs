//! Builder pattern for StepperMotor.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::units::{Degrees, StepMode};
use crate::config::{
    truncated, validate_full_step_angle, validate_speed, DriverConfig, SwitchPolarity,
    SystemConfig, DEFAULT_FULL_STEP_ANGLE,
};
use crate::error::{ConfigError, Error, Result};

use super::driver::{MotorSettings, StepperMotor, MAX_LIMIT_PINS};
use super::pins::{ModePins, NoPin};

/// Builder for creating StepperMotor instances.
///
/// Mode select lines and limit inputs are optional; until they are supplied the
/// builder uses [`NoPin`] for their types.
pub struct StepperMotorBuilder<STEP, DIR, EN, DELAY, MODE = NoPin, LIMIT = NoPin>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    MODE: OutputPin,
    LIMIT: InputPin,
{
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    enable_pin: Option<EN>,
    delay: Option<DELAY>,
    mode_pins: ModePins<MODE>,
    limit_pins: heapless::Vec<LIMIT, MAX_LIMIT_PINS>,
    too_many_limit_pins: bool,
    name: Option<heapless::String<32>>,
    step_mode: StepMode,
    full_step_angle: Degrees,
    speed: Option<u32>,
    invert_direction: bool,
    limit_polarity: SwitchPolarity,
}

impl<STEP, DIR, EN, DELAY> Default for StepperMotorBuilder<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, EN, DELAY> StepperMotorBuilder<STEP, DIR, EN, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            step_pin: None,
            dir_pin: None,
            enable_pin: None,
            delay: None,
            mode_pins: ModePins::none(),
            limit_pins: heapless::Vec::new(),
            too_many_limit_pins: false,
            name: None,
            step_mode: StepMode::Full,
            full_step_angle: DEFAULT_FULL_STEP_ANGLE,
            speed: None,
            invert_direction: false,
            limit_polarity: SwitchPolarity::ActiveHigh,
        }
    }
}

impl<STEP, DIR, EN, DELAY, MODE, LIMIT> StepperMotorBuilder<STEP, DIR, EN, DELAY, MODE, LIMIT>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    MODE: OutputPin,
    LIMIT: InputPin,
{
    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the ENABLE pin.
    pub fn enable_pin(mut self, pin: EN) -> Self {
        self.enable_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the motor name.
    ///
    /// Names longer than 32 bytes are cut at the last whole character that fits.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(truncated(name));
        self
    }

    /// Set the initial microstep mode.
    pub fn step_mode(mut self, mode: StepMode) -> Self {
        self.step_mode = mode;
        self
    }

    /// Set degrees per full step.
    pub fn full_step_angle(mut self, angle: Degrees) -> Self {
        self.full_step_angle = angle;
        self
    }

    /// Set the initial speed in steps per second.
    pub fn speed(mut self, steps_per_sec: u32) -> Self {
        self.speed = Some(steps_per_sec);
        self
    }

    /// Set direction inversion.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Set the level at which limit inputs count as triggered.
    pub fn limit_polarity(mut self, polarity: SwitchPolarity) -> Self {
        self.limit_polarity = polarity;
        self
    }

    /// Set the M0, M1, M2 mode select outputs.
    ///
    /// Pass `None` for a line that is hard-wired on the board.
    pub fn mode_pins<M: OutputPin>(
        self,
        m0: Option<M>,
        m1: Option<M>,
        m2: Option<M>,
    ) -> StepperMotorBuilder<STEP, DIR, EN, DELAY, M, LIMIT> {
        StepperMotorBuilder {
            step_pin: self.step_pin,
            dir_pin: self.dir_pin,
            enable_pin: self.enable_pin,
            delay: self.delay,
            mode_pins: ModePins::new(m0, m1, m2),
            limit_pins: self.limit_pins,
            too_many_limit_pins: self.too_many_limit_pins,
            name: self.name,
            step_mode: self.step_mode,
            full_step_angle: self.full_step_angle,
            speed: self.speed,
            invert_direction: self.invert_direction,
            limit_polarity: self.limit_polarity,
        }
    }

    /// Set the limit switch inputs checked between steps.
    ///
    /// At most [`MAX_LIMIT_PINS`] inputs; more makes [`build`](Self::build) fail.
    pub fn limit_pins<L, I>(self, pins: I) -> StepperMotorBuilder<STEP, DIR, EN, DELAY, MODE, L>
    where
        L: InputPin,
        I: IntoIterator<Item = L>,
    {
        let mut limit_pins = heapless::Vec::new();
        let mut too_many_limit_pins = false;
        for pin in pins {
            if limit_pins.push(pin).is_err() {
                too_many_limit_pins = true;
                break;
            }
        }

        StepperMotorBuilder {
            step_pin: self.step_pin,
            dir_pin: self.dir_pin,
            enable_pin: self.enable_pin,
            delay: self.delay,
            mode_pins: self.mode_pins,
            limit_pins,
            too_many_limit_pins,
            name: self.name,
            step_mode: self.step_mode,
            full_step_angle: self.full_step_angle,
            speed: self.speed,
            invert_direction: self.invert_direction,
            limit_polarity: self.limit_polarity,
        }
    }

    /// Configure from a DriverConfig.
    pub fn from_driver_config(mut self, config: &DriverConfig) -> Self {
        self.name = Some(config.name.clone());
        self.step_mode = config.step_mode;
        self.full_step_angle = config.full_step_angle;
        self.speed = config.speed;
        self.invert_direction = config.invert_direction;
        self.limit_polarity = config.limit_polarity;
        self
    }

    /// Configure from SystemConfig by driver name.
    pub fn from_config(self, config: &SystemConfig, driver_name: &str) -> Result<Self> {
        let driver_config = config.driver(driver_name).ok_or_else(|| {
            Error::Config(ConfigError::DriverNotFound(
                truncated(driver_name),
            ))
        })?;

        Ok(self.from_driver_config(driver_config))
    }

    /// Build the StepperMotor.
    ///
    /// Drives the outputs to their initial levels: driver disabled, DIR
    /// counter-clockwise, mode lines at the configured pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if required parts are missing, a setting is out of
    /// range, or an initial pin write fails.
    pub fn build(self) -> Result<StepperMotor<STEP, DIR, EN, DELAY, MODE, LIMIT>> {
        let step_pin = self
            .step_pin
            .ok_or(Error::Config(ConfigError::Missing("step_pin")))?;
        let dir_pin = self
            .dir_pin
            .ok_or(Error::Config(ConfigError::Missing("dir_pin")))?;
        let enable_pin = self
            .enable_pin
            .ok_or(Error::Config(ConfigError::Missing("enable_pin")))?;
        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::Missing("delay")))?;

        if self.too_many_limit_pins {
            return Err(Error::Config(ConfigError::TooManyLimitPins {
                max: MAX_LIMIT_PINS,
            }));
        }

        validate_full_step_angle(self.full_step_angle)?;
        if let Some(speed) = self.speed {
            validate_speed(speed)?;
        }

        let settings = MotorSettings {
            name: self
                .name
                .unwrap_or_else(|| truncated("stepper")),
            step_mode: self.step_mode,
            full_step_angle: self.full_step_angle,
            invert_direction: self.invert_direction,
            limit_polarity: self.limit_polarity,
        };

        let mut motor = StepperMotor::new(
            step_pin,
            dir_pin,
            enable_pin,
            delay,
            self.mode_pins,
            self.limit_pins,
            settings,
        )?;

        if let Some(speed) = self.speed {
            motor.set_speed(speed)?;
        }

        Ok(motor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn builder() -> StepperMotorBuilder<NoPin, NoPin, NoPin, NoDelay> {
        StepperMotorBuilder::new()
            .step_pin(NoPin)
            .dir_pin(NoPin)
            .enable_pin(NoPin)
            .delay(NoDelay)
    }

    #[test]
    fn test_missing_parts() {
        let result = StepperMotorBuilder::<NoPin, NoPin, NoPin, NoDelay>::new()
            .dir_pin(NoPin)
            .enable_pin(NoPin)
            .delay(NoDelay)
            .build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::Missing("step_pin")))
        ));

        let result = StepperMotorBuilder::<NoPin, NoPin, NoPin, NoDelay>::new()
            .step_pin(NoPin)
            .dir_pin(NoPin)
            .delay(NoDelay)
            .build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::Missing("enable_pin")))
        ));
    }

    #[test]
    fn test_defaults() {
        let motor = builder().build().unwrap();
        assert_eq!(motor.name(), "stepper");
        assert_eq!(motor.step_mode(), StepMode::Full);
        assert_eq!(motor.full_step_angle(), Degrees(1.8));
        assert_eq!(motor.limit_pin_count(), 0);
        assert_eq!(motor.speed(), None);
    }

    #[test]
    fn test_too_many_limit_pins() {
        let result = builder().limit_pins([NoPin; MAX_LIMIT_PINS + 1]).build();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::TooManyLimitPins { .. }))
        ));
    }

    #[test]
    fn test_invalid_settings() {
        assert!(matches!(
            builder().speed(0).build(),
            Err(Error::Config(ConfigError::InvalidSpeed(0)))
        ));
        assert!(matches!(
            builder().full_step_angle(Degrees(0.0)).build(),
            Err(Error::Config(ConfigError::InvalidFullStepAngle(_)))
        ));
    }

    #[test]
    fn test_from_driver_config() {
        let config = DriverConfig {
            name: heapless::String::try_from("pan").unwrap(),
            step_mode: StepMode::Eighth,
            full_step_angle: Degrees(0.9),
            speed: Some(250),
            invert_direction: true,
            limit_polarity: SwitchPolarity::ActiveLow,
        };

        let motor = builder().from_driver_config(&config).build().unwrap();
        assert_eq!(motor.name(), "pan");
        assert_eq!(motor.step_mode(), StepMode::Eighth);
        assert_eq!(motor.speed(), Some(250));
        assert!(motor.is_direction_inverted());
        assert_eq!(motor.steps_per_revolution(), 3200);
    }

    #[test]
    fn test_long_name_is_truncated() {
        let motor = builder()
            .name("a-name-that-is-far-too-long-for-the-buffer")
            .build()
            .unwrap();
        assert_eq!(motor.name(), "a-name-that-is-far-too-long-for-");
        assert_eq!(motor.name().len(), 32);
    }
}
