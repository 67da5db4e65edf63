//! Control logic for a single-pin, twelve-LED decade rosary counter.
//!
//! # Overview
//!
//! The counter walks a fixed sequence of 170 prayers: the Credo, an Our
//! Father and three Hail Marys, then fifteen decades grouped into three
//! mystery sets. Progress is shown on a ring of twelve LEDs, one lit at a
//! time, and driven by four buttons that share one analog pin through a
//! resistor ladder. The same pin doubles as the battery sense input.
//!
//! Everything in this crate is hardware independent: the board reads a
//! free-running 8-bit counter and the sense pin once per loop, passes them
//! to [`Firmware::tick`], and lights the LED it returns.
//!
//! # Buttons
//!
//! | Button     | Tap                          | Hold (≥ 3 clock wraps)       |
//! |------------|------------------------------|------------------------------|
//! | Next       | next prayer                  | toggle Mystery / Overview    |
//! | Reset      | start of the current decade  | back to the Credo            |
//! | Next+Reset | battery gauge                | battery gauge                |
//! | Prev       | previous prayer              | previous prayer              |
//!
//! Outside the Decade view any tap returns to it. A button held for 64 clock
//! wraps is cancelled and the battery calibration starts over.
//!
//! # Module Organization
//!
//! - [`clock`] - free-running counter and animation phase
//! - [`analog`] - sense pin samples
//! - [`battery`] - idle baseline, release detection, ladder bands, gauge
//! - [`button`] - debounce, hold and cancel
//! - [`counter`] - position in the prayer sequence
//! - [`nav`] - view state machine
//! - [`render`] - LED patterns
//! - [`firmware`] - the per-tick loop tying it together
//! - [`charlieplex`] - driver for the four-line LED ring
//! - [`config`] - thresholds and timing
//!
//! # Features
//!
//! - `debug-mode`: defmt logging and `defmt::Format` for the public types.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod analog;
pub mod battery;
pub mod button;
pub mod charlieplex;
pub mod clock;
pub mod config;
pub mod counter;
pub mod firmware;
pub mod nav;
pub mod render;

pub use analog::AnalogSample;
pub use button::{ButtonId, Gesture};
pub use counter::PrayerIndex;
pub use firmware::{Diagnostics, Firmware, TickInput};
pub use nav::NavState;
pub use render::LedIndex;

/// A raw value outside the range of an index type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub struct OutOfRange {
    /// Rejected value
    pub value: u8,
    /// Exclusive upper bound
    pub limit: u8,
}

impl core::fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} is out of range 0..{}", self.value, self.limit)
    }
}

impl core::error::Error for OutOfRange {}
