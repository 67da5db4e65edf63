//! Compile-time configuration of the counter.
//!
//! Thresholds here are properties of the physical board (resistor ladder,
//! LED wiring, timer prescaler) and must not drift from the hardware.

/// Number of prayers in one full pass of the sequence.
///
/// Credo, Our Father, three Hail Marys, then five decades of eleven steps
/// (Our Father plus ten Hail Marys) repeated across three mystery sets:
/// `5 + 15 * 11 = 170`.
pub const PRAYER_COUNT: u8 = 170;

/// Prayers before the first decade starts.
pub const INTRODUCTION_LEN: u8 = 5;

/// Steps in one decade: Our Father plus ten Hail Marys.
pub const DECADE_LEN: u8 = 11;

/// Decades in one mystery set.
pub const DECADES_PER_MYSTERY: u8 = 5;

/// Steps covered by one mystery set.
pub const MYSTERY_LEN: u8 = DECADE_LEN * DECADES_PER_MYSTERY;

/// Clock wraps a button must stay down for the press to count as a hold.
pub const HOLD_TICKS: u8 = 3;

/// Clock wraps after which a held button is cancelled.
pub const CANCEL_TICKS: u8 = 64;

/// LEDs on the ring.
pub const LED_COUNT: u8 = 12;

/// The large bead between decades.
pub const OUR_FATHER_LED: u8 = 10;

/// Hold indicator and battery calibration blink.
pub const INDICATOR_LED: u8 = 11;

/// Ladder ratio at or above which the reading is the Next button.
pub const NEXT_BAND: u16 = 82;

/// Ladder ratio at or above which the reading is the Reset button.
pub const RESET_BAND: u16 = 64;

/// Ladder ratio at or above which the reading is both buttons together.
pub const NEXT_RESET_BAND: u16 = 43;

/// Baselines at or below this are still calibrating and are never divided by.
pub const CALIBRATION_FLOOR: u16 = 128;

/// Baseline at power-on.
pub const BASELINE_SEED: u16 = 1;

/// Baseline written when a stuck button is cancelled.
pub const BASELINE_CANCELLED: u16 = 0;

/// Baseline below which the battery shows as empty.
pub const BATTERY_EMPTY: u16 = 35_500;

/// Baseline at or above which the battery shows as full.
pub const BATTERY_FULL: u16 = 41_500;

/// Baseline span covered by one LED of the battery gauge.
pub const BATTERY_STEP: u16 = 600;

/// Bits of the clock tick counter that make the gauge blink.
pub const BATTERY_BLINK_MASK: u16 = 4;

/// Mask applied to `now >> 1` to get the animation phase.
pub const FLICKER_MASK: u8 = 3;

/// System clock of the reference board: 9.6 MHz oscillator divided by 8.
pub const SYSTEM_CLOCK_HZ: u32 = 9_600_000 / 8;

/// Prescaler between the system clock and the free-running counter.
pub const COUNTER_PRESCALER: u32 = 1024;

/// Rate of the free-running 8-bit counter.
pub const COUNTER_HZ: u32 = SYSTEM_CLOCK_HZ / COUNTER_PRESCALER;

/// Time between two counter wraps, in milliseconds.
pub const WRAP_PERIOD_MS: u32 = 256 * 1000 / COUNTER_HZ;

/// Rough press duration needed for a hold.
pub const HOLD_MS: u32 = HOLD_TICKS as u32 * WRAP_PERIOD_MS;

/// Rough press duration after which a button is cancelled.
pub const CANCEL_MS: u32 = CANCEL_TICKS as u32 * WRAP_PERIOD_MS;
