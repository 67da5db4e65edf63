//! Per-tick control loop.
//!
//! [`Firmware`] owns all counter state. The board driver reads the counter
//! and the sense pin, hands both over in a [`TickInput`], and lights whatever
//! LED comes back. Nothing here touches hardware.

use crate::{
    analog::AnalogSample,
    battery::{BatteryMonitor, Reading},
    button::{ButtonDecoder, ButtonId, Decoded},
    clock::HardwareClock,
    config::CANCEL_TICKS,
    counter::PrayerIndex,
    nav::{NavState, Navigator},
    render::{LedIndex, Scene, render},
};

/// Inputs sampled by the board for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub struct TickInput {
    /// Raw free-running counter value
    pub clock: u8,
    /// Sense pin reading, left-aligned
    pub analog: AnalogSample,
}

/// Read-only view of the internal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub struct Diagnostics {
    /// Current view
    pub state: NavState,
    /// Current prayer
    pub prayer_index: PrayerIndex,
    /// Idle level estimate
    pub battery_baseline: u16,
    /// Button being decoded, if any
    pub active_button: Option<ButtonId>,
    /// Clock wraps the active button has been held
    pub hold_count: u8,
    /// Clock wraps left before the active button is cancelled
    pub cancel_countdown: u8,
    /// Clock wraps since setup
    pub tick_counter: u16,
}

/// The whole counter.
#[derive(Debug, Clone)]
pub struct Firmware {
    clock: HardwareClock,
    battery: BatteryMonitor,
    buttons: ButtonDecoder,
    nav: Navigator,
    led: Option<LedIndex>,
}

impl Default for Firmware {
    fn default() -> Self {
        Self::setup()
    }
}

impl Firmware {
    /// Power-on state. No LED is lit until the first tick.
    pub const fn setup() -> Self {
        Self {
            clock: HardwareClock::new(),
            battery: BatteryMonitor::new(),
            buttons: ButtonDecoder::new(),
            nav: Navigator::new(),
            led: None,
        }
    }

    /// Simulated power cycle.
    pub fn reset(&mut self) {
        #[cfg(feature = "debug-mode")]
        defmt::info!("reset to power-on state");
        *self = Self::setup();
    }

    /// Runs one decode and render step.
    pub fn tick(&mut self, input: TickInput) -> Option<LedIndex> {
        let sample = self.clock.sample(input.clock);

        match self.battery.observe(input.analog) {
            Reading::Released => {
                if let Some(gesture) = self.buttons.release() {
                    self.nav.apply(gesture);
                }
            }
            Reading::Pressed(id) => {
                if self.buttons.decode(id, sample.wrapped) == Decoded::Cancelled {
                    self.battery.invalidate();
                }
            }
            Reading::Calibrating => {}
        }

        let led = render(&Scene {
            state: self.nav.state(),
            prayer: self.nav.prayer(),
            phase: self.clock.phase(),
            battery: &self.battery,
            tick_counter: self.clock.tick_counter(),
            hold_count: self.buttons.hold_count(),
        });
        self.led = Some(led);
        self.led
    }

    /// LED chosen by the last tick.
    pub fn render(&self) -> Option<LedIndex> {
        self.led
    }

    /// Snapshot for external display.
    pub fn diagnostics(&self) -> Diagnostics {
        let hold_count = self.buttons.hold_count();
        Diagnostics {
            state: self.nav.state(),
            prayer_index: self.nav.prayer(),
            battery_baseline: self.battery.baseline(),
            active_button: self.buttons.active(),
            hold_count,
            cancel_countdown: CANCEL_TICKS - hold_count,
            tick_counter: self.clock.tick_counter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BASELINE_CANCELLED, BASELINE_SEED, HOLD_TICKS};

    const IDLE: u16 = 0xFFC0;

    /// Board stand-in that keeps the counter moving one step per tick.
    struct Bench {
        firmware: Firmware,
        counter: u8,
        idle: u16,
        analog: u16,
    }

    impl Bench {
        fn new() -> Self {
            Self::with_idle(IDLE)
        }

        /// Powers up with the sense pin resting at `idle`.
        fn with_idle(idle: u16) -> Self {
            let mut bench = Self {
                firmware: Firmware::setup(),
                counter: 0,
                idle,
                analog: idle,
            };
            bench.tick();
            bench
        }

        fn tick(&mut self) -> Option<LedIndex> {
            let input = TickInput {
                clock: self.counter,
                analog: AnalogSample::from_left_aligned(self.analog),
            };
            self.counter = self.counter.wrapping_add(1);
            self.firmware.tick(input)
        }

        /// Ticks until the counter has wrapped once more.
        fn tick_until_wrap(&mut self) {
            let before = self.firmware.diagnostics().tick_counter;
            while self.firmware.diagnostics().tick_counter == before {
                self.tick();
            }
        }

        fn press(&mut self, id: ButtonId) {
            let ratio = match id {
                ButtonId::Next => 90,
                ButtonId::Reset => 70,
                ButtonId::NextReset => 50,
                ButtonId::Prev => 20,
            };
            self.analog = (self.firmware.diagnostics().battery_baseline >> 7) * ratio;
            self.tick();
        }

        fn release(&mut self) {
            self.analog = self.idle;
            self.tick();
        }

        fn tap(&mut self, id: ButtonId) {
            self.press(id);
            self.release();
        }

        fn hold(&mut self, id: ButtonId, wraps: u8) {
            self.press(id);
            for _ in 0..wraps {
                self.tick_until_wrap();
            }
            self.release();
        }

        fn state(&self) -> NavState {
            self.firmware.diagnostics().state
        }

        fn prayer(&self) -> u8 {
            self.firmware.diagnostics().prayer_index.get()
        }
    }

    #[test]
    fn setup_defaults() {
        let firmware = Firmware::setup();
        assert_eq!(firmware.render(), None);
        let diagnostics = firmware.diagnostics();
        assert_eq!(diagnostics.state, NavState::Decade);
        assert_eq!(diagnostics.prayer_index, PrayerIndex::START);
        assert_eq!(diagnostics.battery_baseline, BASELINE_SEED);
        assert_eq!(diagnostics.active_button, None);
        assert_eq!(diagnostics.hold_count, 0);
        assert_eq!(diagnostics.cancel_countdown, CANCEL_TICKS);
    }

    #[test]
    fn first_tick_calibrates_and_lights() {
        let bench = Bench::new();
        assert_eq!(bench.firmware.diagnostics().battery_baseline, IDLE);
        assert!(bench.firmware.render().is_some());
    }

    #[test]
    fn tap_next_then_hold_next() {
        let mut bench = Bench::new();
        bench.tap(ButtonId::Next);
        assert_eq!(bench.prayer(), 1);
        assert_eq!(bench.state(), NavState::Decade);

        bench.press(ButtonId::Next);
        for _ in 0..HOLD_TICKS {
            bench.tick_until_wrap();
        }
        // hold recognized, waiting for release
        assert_eq!(bench.firmware.render(), Some(LedIndex::INDICATOR));
        assert_eq!(bench.state(), NavState::Decade);
        bench.release();
        assert_eq!(bench.state(), NavState::Mystery);
        assert_eq!(bench.prayer(), 1);
    }

    #[test]
    fn short_press_is_a_tap() {
        let mut bench = Bench::new();
        bench.hold(ButtonId::Next, HOLD_TICKS - 1);
        assert_eq!(bench.prayer(), 1);
        assert_eq!(bench.state(), NavState::Decade);
    }

    #[test]
    fn tap_in_mystery_or_overview_goes_home() {
        for id in [ButtonId::Next, ButtonId::Reset, ButtonId::NextReset, ButtonId::Prev] {
            let mut bench = Bench::new();
            for _ in 0..20 {
                bench.tap(ButtonId::Next);
            }
            bench.hold(ButtonId::Next, HOLD_TICKS);
            assert_eq!(bench.state(), NavState::Mystery);
            bench.hold(ButtonId::Next, HOLD_TICKS);
            assert_eq!(bench.state(), NavState::Overview);

            bench.tap(id);
            assert_eq!(bench.state(), NavState::Decade);
            assert_eq!(bench.prayer(), 20);
        }
    }

    #[test]
    fn next_reset_shows_battery() {
        let mut bench = Bench::new();
        bench.tap(ButtonId::NextReset);
        assert_eq!(bench.state(), NavState::Battery);

        bench.hold(ButtonId::Next, HOLD_TICKS);
        assert_eq!(bench.state(), NavState::Mystery);
        bench.hold(ButtonId::NextReset, HOLD_TICKS);
        assert_eq!(bench.state(), NavState::Battery);
    }

    #[test]
    fn prev_and_reset_move_the_counter() {
        let mut bench = Bench::new();
        bench.tap(ButtonId::Prev);
        assert_eq!(bench.prayer(), 169);
        bench.tap(ButtonId::Reset);
        assert_eq!(bench.prayer(), 159);
        bench.tap(ButtonId::Prev);
        bench.hold(ButtonId::Reset, HOLD_TICKS);
        assert_eq!(bench.prayer(), 0);
    }

    #[test]
    fn stuck_button_is_cancelled() {
        let mut bench = Bench::new();
        bench.press(ButtonId::Prev);
        for _ in 0..CANCEL_TICKS {
            bench.tick_until_wrap();
        }
        let diagnostics = bench.firmware.diagnostics();
        assert_eq!(diagnostics.active_button, Some(ButtonId::Prev));
        assert_eq!(diagnostics.hold_count, CANCEL_TICKS);
        assert_eq!(diagnostics.cancel_countdown, 0);

        bench.tick_until_wrap();
        let diagnostics = bench.firmware.diagnostics();
        assert_eq!(diagnostics.active_button, None);
        assert_eq!(diagnostics.hold_count, 0);
        assert_eq!(diagnostics.battery_baseline, BASELINE_CANCELLED);

        // the stuck reading becomes the new idle level; nothing is stepped
        let stuck = bench.analog;
        bench.tick();
        assert_eq!(bench.firmware.diagnostics().battery_baseline, stuck);
        bench.release();
        assert_eq!(bench.prayer(), 0);
        assert_eq!(bench.state(), NavState::Decade);
        assert_eq!(bench.firmware.diagnostics().battery_baseline, IDLE);
    }

    #[test]
    fn cancel_ignores_prior_baseline() {
        for idle in [20_000u16, 38_300, IDLE] {
            let mut bench = Bench::with_idle(idle);
            assert_eq!(bench.firmware.diagnostics().battery_baseline, idle);
            bench.press(ButtonId::Reset);
            assert_eq!(
                bench.firmware.diagnostics().active_button,
                Some(ButtonId::Reset)
            );
            for _ in 0..=CANCEL_TICKS {
                bench.tick_until_wrap();
            }
            assert_eq!(
                bench.firmware.diagnostics().battery_baseline,
                BASELINE_CANCELLED
            );
        }
    }

    #[test]
    fn battery_view_shows_gauge() {
        let mut bench = Bench::with_idle(38_300);
        bench.tap(ButtonId::NextReset);
        let diagnostics = bench.firmware.diagnostics();
        assert_eq!(diagnostics.state, NavState::Battery);
        assert_eq!(diagnostics.battery_baseline, 38_300);
        assert_eq!(diagnostics.tick_counter & 4, 0);
        assert_eq!(bench.firmware.render().map(LedIndex::get), Some(4));
    }

    #[test]
    fn calibrating_readings_are_ignored() {
        let mut firmware = Firmware::setup();
        // below the seed: not a release, and the baseline is too small to divide
        let led = firmware.tick(TickInput {
            clock: 0,
            analog: AnalogSample::from_left_aligned(0),
        });
        assert!(led.is_some());
        let diagnostics = firmware.diagnostics();
        assert_eq!(diagnostics.active_button, None);
        assert_eq!(diagnostics.battery_baseline, BASELINE_SEED);
    }

    #[test]
    fn reset_restores_power_on_state() {
        let mut bench = Bench::new();
        bench.tap(ButtonId::Prev);
        bench.tap(ButtonId::NextReset);
        bench.firmware.reset();
        let diagnostics = bench.firmware.diagnostics();
        assert_eq!(diagnostics, Firmware::setup().diagnostics());
        assert_eq!(bench.firmware.render(), None);
    }
}
