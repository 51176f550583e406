//! Stepper motor driver.
//!
//! Generic over embedded-hal 1.0 pin and delay types. One controller owns the
//! STEP, DIR and ENABLE lines of a single DRV8825-class driver, plus its optional
//! mode-select lines and limit switch inputs.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::config::units::{Degrees, StepMode};
use crate::config::{full_steps_per_revolution, SwitchPolarity};
use crate::error::{MotorError, PinRole, Result};
use crate::fmt::{debug, info, trace};
use crate::motion::{Direction, MoveExecutor, StepTiming};

use super::limit::check_limit_switches_with;
use super::pins::{ModePins, NoPin};
use super::position::Position;

/// ENABLE level that energizes the driver (nENBL is active low).
pub const ENABLE_ACTIVE_LEVEL: PinState = PinState::Low;

/// Maximum number of limit switch inputs per motor.
pub const MAX_LIMIT_PINS: usize = 4;

/// Stepper motor driver.
///
/// Generic over:
/// - `STEP`, `DIR`, `EN`: STEP, DIR and ENABLE outputs
/// - `DELAY`: Delay provider (must implement `DelayNs`)
/// - `MODE`: M0/M1/M2 output type ([`NoPin`] when none are wired)
/// - `LIMIT`: limit switch input type ([`NoPin`] when none are wired)
///
/// Positions are signed microstep counts at the current step mode. Positive
/// moves turn counter-clockwise.
pub struct StepperMotor<STEP, DIR, EN, DELAY, MODE = NoPin, LIMIT = NoPin>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    MODE: OutputPin,
    LIMIT: InputPin,
{
    /// STEP pin (pulse to move one microstep).
    step_pin: STEP,

    /// DIR pin (low = CCW, high = CW, or inverted).
    dir_pin: DIR,

    /// ENABLE pin.
    enable_pin: EN,

    /// Optional microstep select lines.
    mode_pins: ModePins<MODE>,

    /// Inputs checked between steps by [`StepperMotor::move_steps`].
    limit_pins: heapless::Vec<LIMIT, MAX_LIMIT_PINS>,

    /// Level at which a limit input counts as triggered.
    limit_polarity: SwitchPolarity,

    /// Delay provider for step timing.
    delay: DELAY,

    /// Microstep mode currently driven on the mode lines.
    step_mode: StepMode,

    /// Degrees per full step.
    full_step_angle: Degrees,

    /// Steps per second, once set.
    speed: Option<u32>,

    /// Pulse timing derived from `speed`.
    timing: Option<StepTiming>,

    /// Current and target position.
    position: Position,

    /// Direction last written to the DIR pin.
    direction: Direction,

    /// Whether direction pin logic is inverted.
    invert_direction: bool,

    /// Whether the driver outputs are energized.
    enabled: bool,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,
}

/// Hardware handed back by [`StepperMotor::release`].
pub struct StepperParts<STEP, DIR, EN, DELAY, MODE, LIMIT> {
    /// STEP output.
    pub step_pin: STEP,
    /// DIR output.
    pub dir_pin: DIR,
    /// ENABLE output.
    pub enable_pin: EN,
    /// M0, M1, M2 outputs.
    pub mode_pins: [Option<MODE>; 3],
    /// Limit switch inputs.
    pub limit_pins: heapless::Vec<LIMIT, MAX_LIMIT_PINS>,
    /// Delay provider.
    pub delay: DELAY,
}

/// Construction parameters gathered by the builder.
pub(crate) struct MotorSettings {
    pub(crate) name: heapless::String<32>,
    pub(crate) step_mode: StepMode,
    pub(crate) full_step_angle: Degrees,
    pub(crate) invert_direction: bool,
    pub(crate) limit_polarity: SwitchPolarity,
}

impl<STEP, DIR, EN, DELAY, MODE, LIMIT> StepperMotor<STEP, DIR, EN, DELAY, MODE, LIMIT>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    DELAY: DelayNs,
    MODE: OutputPin,
    LIMIT: InputPin,
{
    /// Create a motor and drive every output to its initial level.
    ///
    /// The driver is left disabled, DIR is set counter-clockwise and the mode
    /// pattern is written once.
    pub(crate) fn new(
        step_pin: STEP,
        dir_pin: DIR,
        enable_pin: EN,
        delay: DELAY,
        mode_pins: ModePins<MODE>,
        limit_pins: heapless::Vec<LIMIT, MAX_LIMIT_PINS>,
        settings: MotorSettings,
    ) -> Result<Self> {
        let mut motor = Self {
            step_pin,
            dir_pin,
            enable_pin,
            mode_pins,
            limit_pins,
            limit_polarity: settings.limit_polarity,
            delay,
            step_mode: settings.step_mode,
            full_step_angle: settings.full_step_angle,
            speed: None,
            timing: None,
            position: Position::new(),
            direction: Direction::CounterClockwise,
            invert_direction: settings.invert_direction,
            enabled: false,
            name: settings.name,
        };

        motor.disable()?;
        motor.set_direction(Direction::CounterClockwise)?;
        motor.mode_pins.apply(motor.step_mode)?;

        Ok(motor)
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Energize the driver outputs. Idempotent.
    pub fn enable(&mut self) -> Result<()> {
        self.enable_pin
            .set_state(ENABLE_ACTIVE_LEVEL)
            .map_err(|_| MotorError::Pin(PinRole::Enable))?;
        self.enabled = true;
        info!("stepper enabled");
        Ok(())
    }

    /// De-energize the driver outputs. Idempotent; position is kept.
    pub fn disable(&mut self) -> Result<()> {
        self.enable_pin
            .set_state(!ENABLE_ACTIVE_LEVEL)
            .map_err(|_| MotorError::Pin(PinRole::Enable))?;
        self.enabled = false;
        info!("stepper disabled");
        Ok(())
    }

    /// Whether the driver outputs are energized.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Select a microstep mode.
    ///
    /// Connected mode lines are written before the mode is stored. Lines that
    /// are not connected are skipped, so board wiring must match `mode`.
    ///
    /// If a line fails, the lines already written are put back to the
    /// current mode and the stored mode is unchanged.
    pub fn set_step_mode(&mut self, mode: StepMode) -> Result<()> {
        self.mode_pins.switch(self.step_mode, mode)?;
        self.step_mode = mode;
        debug!("step mode set to {}", mode);
        Ok(())
    }

    /// Current microstep mode.
    #[inline]
    pub fn step_mode(&self) -> StepMode {
        self.step_mode
    }

    /// Set the step rate in steps per second.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::InvalidSpeed` for zero; the previous speed is kept.
    pub fn set_speed(&mut self, steps_per_sec: u32) -> Result<()> {
        let timing =
            StepTiming::from_speed(steps_per_sec).ok_or(MotorError::InvalidSpeed(steps_per_sec))?;
        self.speed = Some(steps_per_sec);
        self.timing = Some(timing);
        debug!("speed set to {} steps/s", steps_per_sec);
        Ok(())
    }

    /// Step rate in steps per second, if set.
    #[inline]
    pub fn speed(&self) -> Option<u32> {
        self.speed
    }

    /// Pulse timing for the current speed, if set.
    #[inline]
    pub fn step_timing(&self) -> Option<StepTiming> {
        self.timing
    }

    /// Drive the DIR pin for `direction`.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        self.dir_pin
            .set_state(direction.pin_state(self.invert_direction))
            .map_err(|_| MotorError::Pin(PinRole::Direction))?;
        self.direction = direction;
        Ok(())
    }

    /// Direction last written to the DIR pin.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Swap the DIR levels used for clockwise and counter-clockwise.
    ///
    /// For a second motor mounted mirrored on the same axis. The DIR pin is
    /// rewritten so the current direction keeps its physical meaning.
    pub fn set_invert_direction(&mut self, invert: bool) -> Result<()> {
        self.invert_direction = invert;
        self.set_direction(self.direction)
    }

    /// Toggle direction inversion.
    pub fn flip_direction(&mut self) -> Result<()> {
        self.set_invert_direction(!self.invert_direction)
    }

    /// Whether DIR levels are inverted.
    #[inline]
    pub fn is_direction_inverted(&self) -> bool {
        self.invert_direction
    }

    /// Emit exactly one step pulse in the current direction.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::SpeedNotSet` (no pulse emitted) if no speed was set.
    pub fn one_step(&mut self) -> Result<()> {
        let timing = self.timing.ok_or(MotorError::SpeedNotSet)?;
        self.pulse(timing)
    }

    fn pulse(&mut self, timing: StepTiming) -> Result<()> {
        self.step_pin
            .set_high()
            .map_err(|_| MotorError::Pin(PinRole::Step))?;
        self.delay.delay_ns(timing.high_ns());
        self.step_pin
            .set_low()
            .map_err(|_| MotorError::Pin(PinRole::Step))?;
        self.delay.delay_ns(timing.low_ns());

        self.position.step(self.direction);
        Ok(())
    }

    /// Move `count` steps, stopping early if a limit switch triggers.
    ///
    /// Returns `Ok(true)` if every step was emitted and `Ok(false)` if a limit
    /// switch stopped the move. The switches are read before each step.
    pub fn move_steps(&mut self, count: i64) -> Result<bool> {
        self.run(count, Self::limits_triggered)
    }

    /// Move `count` steps, stopping early once `abort` returns `true`.
    ///
    /// `abort` is evaluated before every step, never mid-pulse. Limit switches
    /// are not read unless `abort` does so itself.
    pub fn move_steps_until<F>(&mut self, count: i64, mut abort: F) -> Result<bool>
    where
        F: FnMut() -> bool,
    {
        self.run(count, |_| Ok(abort()))
    }

    fn run<F>(&mut self, count: i64, mut abort: F) -> Result<bool>
    where
        F: FnMut(&mut Self) -> Result<bool>,
    {
        if count == 0 {
            return Ok(true);
        }
        let timing = self.timing.ok_or(MotorError::SpeedNotSet)?;

        let mut executor = MoveExecutor::new(count);
        self.set_direction(executor.direction())?;
        trace!("moving {} steps", count);

        while !executor.is_complete() {
            if abort(self)? {
                debug!(
                    "move aborted after {} of {} steps",
                    executor.emitted(),
                    executor.total_steps()
                );
                return Ok(false);
            }
            self.pulse(timing)?;
            executor.advance();
        }

        Ok(true)
    }

    /// Move to an absolute position in microsteps.
    ///
    /// Sets the target, then moves by the difference. Limit switches can stop
    /// the move early, see [`StepperMotor::move_steps`].
    ///
    /// The new target is kept even if the move then fails, for example with
    /// no speed set. Only an overflowing target leaves it unchanged.
    pub fn move_to_absolute(&mut self, target: i64) -> Result<bool> {
        let delta = self.position.aim_absolute(target)?;
        self.move_steps(delta)
    }

    /// [`StepperMotor::move_to_absolute`] with a caller abort predicate.
    pub fn move_to_absolute_until<F>(&mut self, target: i64, abort: F) -> Result<bool>
    where
        F: FnMut() -> bool,
    {
        let delta = self.position.aim_absolute(target)?;
        self.move_steps_until(delta, abort)
    }

    /// Move by `delta` microsteps from the current position.
    ///
    /// Like [`StepperMotor::move_to_absolute`], the target is updated before
    /// the move starts.
    pub fn move_to_relative(&mut self, delta: i64) -> Result<bool> {
        let delta = self.position.aim_relative(delta)?;
        self.move_steps(delta)
    }

    /// [`StepperMotor::move_to_relative`] with a caller abort predicate.
    pub fn move_to_relative_until<F>(&mut self, delta: i64, abort: F) -> Result<bool>
    where
        F: FnMut() -> bool,
    {
        let delta = self.position.aim_relative(delta)?;
        self.move_steps_until(delta, abort)
    }

    /// Read the limit switches now.
    pub fn limits_triggered(&mut self) -> Result<bool> {
        check_limit_switches_with(&mut self.limit_pins, self.limit_polarity)
    }

    /// Number of limit switch inputs.
    #[inline]
    pub fn limit_pin_count(&self) -> usize {
        self.limit_pins.len()
    }

    /// Current position in microsteps.
    #[inline]
    pub fn current_position(&self) -> i64 {
        self.position.current()
    }

    /// Target of the last absolute or relative move.
    #[inline]
    pub fn target_position(&self) -> i64 {
        self.position.target()
    }

    /// `target_position() - current_position()`.
    #[inline]
    pub fn steps_to_target(&self) -> i64 {
        self.position.steps_to_target()
    }

    /// Degrees per full step.
    #[inline]
    pub fn full_step_angle(&self) -> Degrees {
        self.full_step_angle
    }

    /// Microsteps per revolution at the current step mode.
    ///
    /// Saturates at `u32::MAX` for very small full step angles.
    pub fn steps_per_revolution(&self) -> u32 {
        full_steps_per_revolution(self.full_step_angle)
            .saturating_mul(self.step_mode.divisor() as u32)
    }

    /// Current position as a shaft angle, counter-clockwise positive.
    pub fn position_degrees(&self) -> Degrees {
        Degrees(
            self.position.current() as f32 * self.full_step_angle.0
                / self.step_mode.divisor() as f32,
        )
    }

    /// Microsteps for an angle at the current step mode, rounded.
    pub fn degrees_to_steps(&self, angle: Degrees) -> i64 {
        libm::roundf(angle.0 / self.full_step_angle.0 * self.step_mode.divisor() as f32) as i64
    }

    /// Give back the pins and delay provider.
    pub fn release(self) -> StepperParts<STEP, DIR, EN, DELAY, MODE, LIMIT> {
        StepperParts {
            step_pin: self.step_pin,
            dir_pin: self.dir_pin,
            enable_pin: self.enable_pin,
            mode_pins: self.mode_pins.release(),
            limit_pins: self.limit_pins,
            delay: self.delay,
        }
    }
}
