//! Twelve LEDs on four tri-state lines.
//!
//! Every ordered pair of distinct lines has one LED between them, anode on
//! the first line and cathode on the second: `4 * 3 = 12`. Lighting an LED
//! drives its anode high and its cathode low while the other two lines float,
//! so at most one LED can be lit at a time, which is all the counter needs.
//!
//! LED `n` sits between line `n / 3` (anode) and the `n % 3`-th of the
//! remaining lines (cathode), counting upward and skipping the anode.

use embedded_hal::digital::v2::OutputPin;

use crate::render::LedIndex;

/// Lines shared by the ring.
pub const LINES: usize = 4;

/// A GPIO that can switch between push-pull output and high impedance.
pub trait LinePin: OutputPin {
    /// Switches to push-pull output, keeping the last level written.
    fn drive(&mut self);
    /// Switches to high impedance.
    fn release(&mut self);
}

/// Anode and cathode line for an LED.
pub const fn lines(led: LedIndex) -> (usize, usize) {
    let index = led.get() as usize;
    let anode = index / (LINES - 1);
    let mut cathode = index % (LINES - 1);
    if cathode >= anode {
        cathode += 1;
    }
    (anode, cathode)
}

/// Ring driver.
pub struct Charlieplex<P> {
    /// Lines in board order
    pins: [P; LINES],
    /// LED currently lit
    lit: Option<LedIndex>,
}

impl<P: LinePin> Charlieplex<P> {
    /// Takes the four lines and floats them all.
    pub fn new(mut pins: [P; LINES]) -> Self {
        for pin in pins.iter_mut() {
            pin.release();
        }
        Self { pins, lit: None }
    }

    /// Lights `led`, or nothing.
    ///
    /// Writing the LED that is already lit leaves the lines untouched.
    pub fn show(&mut self, led: Option<LedIndex>) -> Result<(), P::Error> {
        if led == self.lit {
            return Ok(());
        }
        for pin in self.pins.iter_mut() {
            pin.release();
        }
        self.lit = None;

        if let Some(led) = led {
            let (anode, cathode) = lines(led);
            self.pins[anode].set_high()?;
            self.pins[anode].drive();
            self.pins[cathode].set_low()?;
            self.pins[cathode].drive();
            self.lit = Some(led);
        }
        Ok(())
    }

    /// LED currently lit.
    pub fn lit(&self) -> Option<LedIndex> {
        self.lit
    }

    /// Floats every line and hands the pins back.
    pub fn free(mut self) -> [P; LINES] {
        for pin in self.pins.iter_mut() {
            pin.release();
        }
        self.pins
    }
}
