//! Hardware abstraction and peripheral initialization.
//!
//! This module defines the pin mappings and peripheral initialization
//! for the rosary counter board.
//!
//! # Pin Assignments
//!
//! ## LED Ring (charlieplexed, 12 LEDs on 4 lines)
//! - **PA0**: LINE0
//! - **PA1**: LINE1
//! - **PA2**: LINE2
//! - **PA3**: LINE3
//!
//! Unused lines are switched to analog mode (high impedance).
//!
//! ## Button Ladder & Battery Sense
//! - **PA4**: SENSE (ADC_IN4) - Resistor ladder tap. Rests near the supply
//!   rail when idle, pulled down by each of the four buttons.
//!
//! ## Debug (SWD)
//! - **PA13**: SWDIO
//! - **PA14**: SWCLK

use core::convert::Infallible;

use decade_rosary::{
    AnalogSample,
    charlieplex::{Charlieplex, LinePin},
};
use embassy_stm32::{
    adc::{self, Adc, AdcChannel, AnyAdcChannel, Resolution},
    bind_interrupts,
    gpio::{Flex, Speed},
    peripherals::ADC1,
};
use embassy_time::Instant;
use embedded_hal::digital::v2::OutputPin;

bind_interrupts!(struct Irqs {
    ADC1_COMP => adc::InterruptHandler<ADC1>;
});

/// Right shift from the 32.768 kHz time base down to the counter rate.
///
/// 32768 >> 5 = 1024 Hz, close to the 1.17 kHz prescaled timer the thresholds
/// were tuned on. The counter wraps roughly every 250 ms.
const COUNTER_SHIFT: u32 = 5;

/// Conversion width configured on the ADC.
const ADC_BITS: u32 = 10;

/// One LED ring line.
pub struct Line(Flex<'static>);

impl OutputPin for Line {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high();
        Ok(())
    }
}

impl LinePin for Line {
    fn drive(&mut self) {
        self.0.set_as_output(Speed::Low);
    }

    fn release(&mut self) {
        self.0.set_as_analog();
    }
}

/// Free-running 8-bit counter derived from the embassy time base.
pub fn counter() -> u8 {
    (Instant::now().as_ticks() >> COUNTER_SHIFT) as u8
}

/// ADC wired to the ladder tap.
pub struct SensePin {
    /// Converter, configured for 10-bit reads
    adc: Adc<'static, ADC1>,
    /// PA4 channel
    channel: AnyAdcChannel<ADC1>,
}

impl SensePin {
    /// Takes one conversion, left-aligned for the counter logic.
    pub async fn read(&mut self) -> AnalogSample {
        let raw = self.adc.read(&mut self.channel).await;
        AnalogSample::from_right_aligned(raw, ADC_BITS)
    }
}

/// Top-level peripheral container for the rosary counter.
///
/// Owns the LED ring and the sense input.
pub struct Peripherals {
    /// Charlieplexed LED ring
    pub leds: Charlieplex<Line>,
    /// Button ladder and battery sense
    pub sense: SensePin,
}

impl Peripherals {
    /// Initializes all peripherals from STM32 peripheral singleton.
    ///
    /// All four LED lines start floating, so the ring is dark until the
    /// first tick.
    pub fn new(p: embassy_stm32::Peripherals) -> Self {
        let mut adc = Adc::new(p.ADC1, Irqs);
        adc.set_resolution(Resolution::BITS10);

        Self {
            leds: Charlieplex::new([
                Line(Flex::new(p.PA0)),
                Line(Flex::new(p.PA1)),
                Line(Flex::new(p.PA2)),
                Line(Flex::new(p.PA3)),
            ]),
            sense: SensePin {
                adc,
                channel: p.PA4.degrade_adc(),
            },
        }
    }
}
