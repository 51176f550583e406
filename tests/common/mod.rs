//! In-memory hardware fakes shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Output pin that records every level written to it.
#[derive(Clone, Default)]
pub struct RecordingPin {
    levels: Rc<RefCell<Vec<bool>>>,
    broken: Rc<Cell<bool>>,
}

impl RecordingPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every level written, oldest first (`true` = high).
    pub fn levels(&self) -> Vec<bool> {
        self.levels.borrow().clone()
    }

    /// Last level written, if any.
    pub fn level(&self) -> Option<bool> {
        self.levels.borrow().last().copied()
    }

    /// Number of rising edges written (low or nothing followed by high).
    pub fn rising_edges(&self) -> usize {
        let levels = self.levels.borrow();
        let mut previous = false;
        let mut edges = 0;
        for &level in levels.iter() {
            if level && !previous {
                edges += 1;
            }
            previous = level;
        }
        edges
    }

    pub fn clear(&self) {
        self.levels.borrow_mut().clear();
    }

    /// Make every later write fail without recording a level.
    pub fn break_writes(&self) {
        self.broken.set(true);
    }

    fn record(&self, level: bool) -> Result<(), BrokenPinError> {
        if self.broken.get() {
            return Err(BrokenPinError);
        }
        self.levels.borrow_mut().push(level);
        Ok(())
    }
}

impl ErrorType for RecordingPin {
    type Error = BrokenPinError;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(true)
    }
}

/// Input whose level the test controls.
#[derive(Clone, Default)]
pub struct FakeSwitch {
    high: Rc<Cell<bool>>,
    reads: Rc<Cell<usize>>,
    trip_on_read: Rc<Cell<Option<usize>>>,
}

impl FakeSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, high: bool) {
        self.high.set(high);
    }

    /// Read high from the `n`-th read on (1-indexed).
    pub fn trip_on_read(&self, n: usize) {
        self.trip_on_read.set(Some(n));
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl ErrorType for FakeSwitch {
    type Error = Infallible;
}

impl InputPin for FakeSwitch {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let reads = self.reads.get() + 1;
        self.reads.set(reads);
        if let Some(n) = self.trip_on_read.get() {
            if reads >= n {
                self.high.set(true);
            }
        }
        Ok(self.high.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

/// Pin whose every operation fails.
#[derive(Clone, Copy, Default)]
pub struct BrokenPin;

#[derive(Debug)]
pub struct BrokenPinError;

impl embedded_hal::digital::Error for BrokenPinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl ErrorType for BrokenPin {
    type Error = BrokenPinError;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(BrokenPinError)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(BrokenPinError)
    }
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Err(BrokenPinError)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Err(BrokenPinError)
    }
}

/// Delay provider that records requested delays instead of sleeping.
#[derive(Clone, Default)]
pub struct FakeClock {
    delays: Rc<RefCell<Vec<u32>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.delays.borrow().clone()
    }

    /// Total simulated time in nanoseconds.
    pub fn elapsed_ns(&self) -> u64 {
        self.delays.borrow().iter().map(|&ns| ns as u64).sum()
    }
}

impl DelayNs for FakeClock {
    fn delay_ns(&mut self, ns: u32) {
        self.delays.borrow_mut().push(ns);
    }
}

/// Handles to every fake wired into a test motor.
pub struct Rig {
    pub step: RecordingPin,
    pub dir: RecordingPin,
    pub enable: RecordingPin,
    pub modes: [RecordingPin; 3],
    pub switches: [FakeSwitch; 2],
    pub clock: FakeClock,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            step: RecordingPin::new(),
            dir: RecordingPin::new(),
            enable: RecordingPin::new(),
            modes: [RecordingPin::new(), RecordingPin::new(), RecordingPin::new()],
            switches: [FakeSwitch::new(), FakeSwitch::new()],
            clock: FakeClock::new(),
        }
    }

    /// Current M0, M1, M2 levels.
    pub fn mode_levels(&self) -> [Option<bool>; 3] {
        [
            self.modes[0].level(),
            self.modes[1].level(),
            self.modes[2].level(),
        ]
    }
}

pub type RigMotor = drv_stepper::StepperMotor<
    RecordingPin,
    RecordingPin,
    RecordingPin,
    FakeClock,
    RecordingPin,
    FakeSwitch,
>;

/// Build a motor on `rig` with all three mode lines and both switches wired.
pub fn rig_motor(rig: &Rig) -> RigMotor {
    drv_stepper::StepperMotorBuilder::new()
        .step_pin(rig.step.clone())
        .dir_pin(rig.dir.clone())
        .enable_pin(rig.enable.clone())
        .delay(rig.clock.clone())
        .mode_pins(
            Some(rig.modes[0].clone()),
            Some(rig.modes[1].clone()),
            Some(rig.modes[2].clone()),
        )
        .limit_pins(rig.switches.iter().cloned())
        .build()
        .expect("rig motor should build")
}
