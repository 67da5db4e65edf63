//! Free-running 8-bit counter model.
//!
//! The board exposes a prescaled counter that overflows a few times per
//! second. Each overflow is one "tick" of the slow time base used for hold
//! and cancel timing; the low bits of the counter drive the LED animation.

use crate::config::FLICKER_MASK;

/// One observation of the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub struct ClockSample {
    /// Raw counter value.
    pub now: u8,
    /// The counter rolled over since the previous sample.
    pub wrapped: bool,
}

/// Tracks counter rollovers between samples.
#[derive(Debug, Default, Clone)]
pub struct HardwareClock {
    /// Previous raw value
    last_tick: u8,
    /// Rollovers seen since setup
    tick_counter: u16,
    /// Latest raw value
    now: u8,
}

impl HardwareClock {
    /// Creates a clock at power-on state.
    pub const fn new() -> Self {
        Self {
            last_tick: 0,
            tick_counter: 0,
            now: 0,
        }
    }

    /// Records a raw counter value.
    ///
    /// A value smaller than the previous one means the counter overflowed in
    /// between, which bumps the tick counter by exactly one.
    pub fn sample(&mut self, raw: u8) -> ClockSample {
        let wrapped = raw < self.last_tick;
        if wrapped {
            self.tick_counter = self.tick_counter.wrapping_add(1);
        }
        self.last_tick = raw;
        self.now = raw;
        ClockSample { now: raw, wrapped }
    }

    /// Rollovers observed so far.
    pub fn tick_counter(&self) -> u16 {
        self.tick_counter
    }

    /// Latest raw value.
    pub fn now(&self) -> u8 {
        self.now
    }

    /// Animation phase of the latest sample.
    pub fn phase(&self) -> FlickerPhase {
        FlickerPhase::from_counter(self.now)
    }
}

/// Short-period animation phase in `0..=3`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub struct FlickerPhase(u8);

impl FlickerPhase {
    /// Phase for a raw counter value.
    pub const fn from_counter(now: u8) -> Self {
        Self((now >> 1) & FLICKER_MASK)
    }

    /// Phase value in `0..=3`.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Low bit, used to alternate between the two LEDs of a pair.
    pub const fn odd(self) -> bool {
        self.0 & 1 != 0
    }
}
