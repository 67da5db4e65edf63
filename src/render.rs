//! LED patterns for each view.
//!
//! The ring has ten small beads (LEDs 0..=9), the Our Father bead (10) and an
//! indicator (11). Exactly one LED is lit at a time; patterns that need more
//! than one alternate between them on the flicker phase.

use crate::{
    OutOfRange,
    battery::BatteryMonitor,
    clock::FlickerPhase,
    config::{BATTERY_BLINK_MASK, HOLD_TICKS, INDICATOR_LED, LED_COUNT, OUR_FATHER_LED},
    counter::{Position, PrayerIndex},
    nav::NavState,
};

/// One of the twelve LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub struct LedIndex(u8);

impl LedIndex {
    /// The Our Father bead.
    pub const OUR_FATHER: Self = Self(OUR_FATHER_LED);
    /// Hold and battery blink indicator.
    pub const INDICATOR: Self = Self(INDICATOR_LED);

    /// Raw index in `0..12`.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Small bead `0..=9`. Callers keep the value in range.
    const fn bead(index: u8) -> Self {
        Self(index)
    }
}

impl TryFrom<u8> for LedIndex {
    type Error = OutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < LED_COUNT {
            Ok(Self(value))
        } else {
            Err(OutOfRange {
                value,
                limit: LED_COUNT,
            })
        }
    }
}

/// Everything one frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Current view
    pub state: NavState,
    /// Current prayer
    pub prayer: PrayerIndex,
    /// Animation phase of this tick
    pub phase: FlickerPhase,
    /// Baseline source for the gauge
    pub battery: &'a BatteryMonitor,
    /// Clock wraps since setup
    pub tick_counter: u16,
    /// Hold time of the pressed button
    pub hold_count: u8,
}

/// Picks the LED to light for a frame.
pub fn render(scene: &Scene<'_>) -> LedIndex {
    if scene.hold_count >= HOLD_TICKS {
        return LedIndex::INDICATOR;
    }
    let phase = scene.phase;
    match (scene.state, scene.prayer.position()) {
        (NavState::Decade, Position::Introduction(0)) => credo(phase),
        (NavState::Decade, Position::Introduction(1)) => LedIndex::OUR_FATHER,
        (NavState::Decade, Position::Introduction(index)) => hail_mary_of_three(index - 2, phase),
        (NavState::Decade, Position::Decade { decade, bead: 0, .. }) => {
            our_father_in_decade(decade, phase)
        }
        (NavState::Decade, Position::Decade { bead, .. }) => LedIndex::bead(bead - 1),
        (NavState::Mystery | NavState::Overview, Position::Introduction(_)) => {
            introductory_prayer(phase)
        }
        (NavState::Mystery, Position::Decade { decade, .. }) => decade_pair(decade, phase),
        (NavState::Overview, Position::Decade { mystery, .. }) => mystery_set(mystery, phase),
        (NavState::Battery, _) => battery_gauge(scene.battery, scene.tick_counter),
    }
}

/// Walks LEDs 0, 1, 8, 9.
fn credo(phase: FlickerPhase) -> LedIndex {
    let phase = phase.get();
    LedIndex::bead((phase & 1) | ((phase & 2) << 2))
}

/// Mirrored pairs for the three Hail Marys before the first decade.
fn hail_mary_of_three(index: u8, phase: FlickerPhase) -> LedIndex {
    const PAIRS: [(u8, u8); 3] = [(2, 7), (3, 6), (4, 5)];
    let (left, right) = PAIRS[usize::from(index.min(2))];
    LedIndex::bead(if phase.odd() { right } else { left })
}

/// Decade bead pair `(2d, 2d + 1)`.
fn decade_pair(decade: u8, phase: FlickerPhase) -> LedIndex {
    LedIndex::bead(2 * decade + u8::from(phase.odd()))
}

fn our_father_in_decade(decade: u8, phase: FlickerPhase) -> LedIndex {
    if phase.get() < 2 {
        decade_pair(decade, phase)
    } else {
        LedIndex::OUR_FATHER
    }
}

fn introductory_prayer(phase: FlickerPhase) -> LedIndex {
    match phase.get() {
        0 => LedIndex::bead(0),
        1 | 2 => LedIndex::bead(9),
        _ => LedIndex::OUR_FATHER,
    }
}

/// Chases a third of the ring for each mystery set.
fn mystery_set(mystery: u8, phase: FlickerPhase) -> LedIndex {
    let phase = phase.get();
    if mystery & 1 != 0 {
        LedIndex::bead(phase + 3)
    } else if mystery == 0 {
        if phase == 3 {
            LedIndex::OUR_FATHER
        } else {
            LedIndex::bead(phase)
        }
    } else {
        LedIndex(phase + 7)
    }
}

fn battery_gauge(battery: &BatteryMonitor, tick_counter: u16) -> LedIndex {
    if tick_counter & BATTERY_BLINK_MASK != 0 {
        LedIndex::INDICATOR
    } else {
        LedIndex::bead(battery.level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PRAYER_COUNT;

    const STATES: [NavState; 4] = [
        NavState::Decade,
        NavState::Mystery,
        NavState::Overview,
        NavState::Battery,
    ];

    fn phase(value: u8) -> FlickerPhase {
        FlickerPhase::from_counter(value << 1)
    }

    fn frame(state: NavState, prayer: u8, phase_value: u8) -> u8 {
        let battery = BatteryMonitor::new();
        render(&Scene {
            state,
            prayer: PrayerIndex::try_from(prayer).unwrap(),
            phase: phase(phase_value),
            battery: &battery,
            tick_counter: 0,
            hold_count: 0,
        })
        .get()
    }

    fn cycle(state: NavState, prayer: u8) -> [u8; 4] {
        [0, 1, 2, 3].map(|p| frame(state, prayer, p))
    }

    #[test]
    fn every_frame_is_a_valid_led() {
        for state in STATES {
            for prayer in 0..PRAYER_COUNT {
                for p in 0..4 {
                    assert!(frame(state, prayer, p) < LED_COUNT);
                }
            }
        }
    }

    #[test]
    fn decade_introduction() {
        assert_eq!(cycle(NavState::Decade, 0), [0, 1, 8, 9]);
        assert_eq!(cycle(NavState::Decade, 1), [10, 10, 10, 10]);
        assert_eq!(cycle(NavState::Decade, 2), [2, 7, 2, 7]);
        assert_eq!(cycle(NavState::Decade, 3), [3, 6, 3, 6]);
        assert_eq!(cycle(NavState::Decade, 4), [4, 5, 4, 5]);
    }

    #[test]
    fn decade_our_father_alternates_with_large_bead() {
        // odd phase lights the second LED of the pair
        assert_eq!(frame(NavState::Decade, 5, 1), 1);
        assert_eq!(cycle(NavState::Decade, 5), [0, 1, 10, 10]);
        assert_eq!(cycle(NavState::Decade, 16), [2, 3, 10, 10]);
        assert_eq!(cycle(NavState::Decade, 49), [8, 9, 10, 10]);
        // first decade of the next mystery starts over at the first pair
        assert_eq!(cycle(NavState::Decade, 60), [0, 1, 10, 10]);
    }

    #[test]
    fn decade_hail_marys_are_solid() {
        for bead in 1..=10u8 {
            let led = bead - 1;
            assert_eq!(cycle(NavState::Decade, 5 + bead), [led; 4]);
            assert_eq!(cycle(NavState::Decade, 159 + bead), [led; 4]);
        }
    }

    #[test]
    fn mystery_view() {
        assert_eq!(cycle(NavState::Mystery, 0), [0, 9, 9, 10]);
        assert_eq!(cycle(NavState::Mystery, 4), [0, 9, 9, 10]);
        assert_eq!(cycle(NavState::Mystery, 5), [0, 1, 0, 1]);
        assert_eq!(cycle(NavState::Mystery, 15), [0, 1, 0, 1]);
        assert_eq!(cycle(NavState::Mystery, 27), [4, 5, 4, 5]);
        assert_eq!(cycle(NavState::Mystery, 169), [8, 9, 8, 9]);
    }

    #[test]
    fn overview_view() {
        assert_eq!(cycle(NavState::Overview, 2), [0, 9, 9, 10]);
        assert_eq!(cycle(NavState::Overview, 5), [0, 1, 2, 10]);
        assert_eq!(cycle(NavState::Overview, 59), [0, 1, 2, 10]);
        assert_eq!(cycle(NavState::Overview, 60), [3, 4, 5, 6]);
        assert_eq!(cycle(NavState::Overview, 115), [7, 8, 9, 10]);
        assert_eq!(cycle(NavState::Overview, 169), [7, 8, 9, 10]);
    }

    #[test]
    fn battery_gauge_and_blink() {
        let battery = BatteryMonitor::with_baseline(38_300);
        let mut scene = Scene {
            state: NavState::Battery,
            prayer: PrayerIndex::START,
            phase: phase(2),
            battery: &battery,
            tick_counter: 0,
            hold_count: 0,
        };
        assert_eq!(render(&scene).get(), 4);
        scene.tick_counter = 3;
        assert_eq!(render(&scene).get(), 4);
        scene.tick_counter = 4;
        assert_eq!(render(&scene), LedIndex::INDICATOR);
        scene.tick_counter = 8;
        assert_eq!(render(&scene).get(), 4);
    }

    #[test]
    fn hold_indicator_overrides_every_view() {
        let battery = BatteryMonitor::new();
        for state in STATES {
            for hold_count in [HOLD_TICKS, 64] {
                let scene = Scene {
                    state,
                    prayer: PrayerIndex::try_from(33).unwrap(),
                    phase: phase(0),
                    battery: &battery,
                    tick_counter: 0,
                    hold_count,
                };
                assert_eq!(render(&scene), LedIndex::INDICATOR);
            }
        }
    }

    #[test]
    fn led_index_range() {
        assert_eq!(LedIndex::try_from(11), Ok(LedIndex::INDICATOR));
        assert_eq!(
            LedIndex::try_from(12),
            Err(OutOfRange { value: 12, limit: 12 })
        );
    }
}
