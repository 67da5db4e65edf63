//! Firmware for a battery-powered decade rosary counter.
//!
//! # Overview
//!
//! This firmware runs the counter logic from the `decade_rosary` library on
//! an STM32L031:
//! - Twelve charlieplexed LEDs showing the current prayer
//! - Four buttons on one resistor ladder, read through a single ADC pin
//! - Battery level estimated from the idle reading of the same pin
//! - Low-power MSI clock, woken by the embassy time driver between ticks
//!
//! # Control Loop
//!
//! Every tick the loop samples the free-running counter and the sense pin,
//! runs one [`Firmware::tick`](decade_rosary::Firmware::tick), and lights the LED it returns. The loop owns
//! all counter state; nothing else touches it.
//!
//! # Module Organization
//!
//! - `hardware` - Pin mappings, LED ring, sense ADC and counter source
//! - `diagnostics` - Snapshot logging task (`debug-mode` only)
//!
//! Host builds compile a stub `main` so the library tests run with the host
//! toolchain.

#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(all(target_os = "none", feature = "debug-mode"))]
mod diagnostics;
#[cfg(target_os = "none")]
mod hardware;

#[cfg(target_os = "none")]
use decade_rosary::{Firmware, TickInput};
#[cfg(target_os = "none")]
use embassy_executor::Spawner;
#[cfg(target_os = "none")]
use embassy_stm32::{
    Config,
    rcc::{LsConfig, mux::ClockMux},
};
#[cfg(target_os = "none")]
use embassy_time::{Duration, Ticker};
#[cfg(target_os = "none")]
use {defmt_rtt as _, panic_probe as _};

#[cfg(target_os = "none")]
use hardware::Peripherals;

/// Control loop period in milliseconds.
///
/// Several ticks must fall inside one counter period (~250 ms) so that every
/// wrap is observed.
#[cfg(target_os = "none")]
const TICK_PERIOD_MS: u64 = 5;

/// Creates a low-power clock configuration for STM32L031.
///
/// # Clock Settings
///
/// - **MSI**: 2.097 MHz, enough for the ADC and a 5 ms loop
/// - **System clock**: MSI (no PLL)
/// - **LSE/LSI**: off, the time driver runs from a general purpose timer
/// - **Voltage scale**: Range 1
#[cfg(target_os = "none")]
fn create_low_power_config() -> embassy_stm32::rcc::Config {
    embassy_stm32::rcc::Config {
        msi: Some(embassy_stm32::rcc::MSIRange::RANGE2M),
        hsi: false,
        hse: None,
        pll: None,
        sys: embassy_stm32::rcc::Sysclk::MSI,
        ahb_pre: embassy_stm32::rcc::AHBPrescaler::DIV1,
        apb1_pre: embassy_stm32::rcc::APBPrescaler::DIV1,
        apb2_pre: embassy_stm32::rcc::APBPrescaler::DIV1,
        ls: LsConfig::off(),
        voltage_scale: embassy_stm32::rcc::VoltageScale::RANGE1,
        mux: ClockMux::default(),
    }
}

/// Main entry point for the rosary counter firmware.
///
/// # Initialization Sequence
///
/// 1. Configure clocks for low power operation
/// 2. Initialize STM32 peripherals (LED lines floating, ADC at 10 bits)
/// 3. Wait for the first conversion so the baseline starts from a real reading
/// 4. Spawn the diagnostics task (`debug-mode` only)
/// 5. Enter the control loop
#[cfg(target_os = "none")]
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let mut config = Config::default();
    config.rcc = create_low_power_config();

    let p = embassy_stm32::init(config);

    #[cfg(feature = "debug-mode")]
    defmt::info!("Rosary counter firmware starting...");

    let mut peripherals = Peripherals::new(p);

    #[cfg(feature = "debug-mode")]
    defmt::info!("Waiting for first conversion...");

    let _first = peripherals.sense.read().await;

    #[cfg(feature = "debug-mode")]
    _spawner
        .spawn(diagnostics::diagnostics_task())
        .unwrap();

    #[cfg(feature = "debug-mode")]
    defmt::info!("Entering control loop, first reading {}", _first);

    let mut firmware = Firmware::setup();
    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));
    #[cfg(feature = "debug-mode")]
    let mut last_wrap = 0u16;

    loop {
        let input = TickInput {
            clock: hardware::counter(),
            analog: peripherals.sense.read().await,
        };
        let led = firmware.tick(input);
        let Ok(()) = peripherals.leds.show(led);

        #[cfg(feature = "debug-mode")]
        {
            let snapshot = firmware.diagnostics();
            if snapshot.tick_counter != last_wrap {
                last_wrap = snapshot.tick_counter;
                diagnostics::DIAGNOSTICS.signal(snapshot);
            }
        }

        ticker.next().await;
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!(
        "decade-rosary firmware runs on the STM32L031; \
         build it with --target thumbv6m-none-eabi (host builds only carry the library tests)"
    );
}
