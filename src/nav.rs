//! View selection and counter updates driven by completed gestures.

use crate::{
    button::{ButtonId, Gesture},
    counter::PrayerIndex,
};

/// What the LED ring is showing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub enum NavState {
    /// Current bead of the current decade
    #[default]
    Decade,
    /// Which decade of the mystery set
    Mystery,
    /// Which mystery set
    Overview,
    /// Battery gauge
    Battery,
}

/// Navigation state together with the prayer counter it steers.
#[derive(Debug, Default, Clone)]
pub struct Navigator {
    state: NavState,
    prayer: PrayerIndex,
}

impl Navigator {
    /// Power-on navigation: Decade view on the Credo.
    pub const fn new() -> Self {
        Self {
            state: NavState::Decade,
            prayer: PrayerIndex::START,
        }
    }

    /// Current view.
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Current prayer.
    pub fn prayer(&self) -> PrayerIndex {
        self.prayer
    }

    /// Applies a finished press.
    ///
    /// Outside the Decade view any tap just returns to it; the button that
    /// was tapped does not matter.
    pub fn apply(&mut self, gesture: Gesture) {
        if self.state != NavState::Decade && !gesture.is_hold() {
            self.state = NavState::Decade;
        } else {
            match gesture.id {
                ButtonId::Next if gesture.is_hold() => {
                    self.state = match self.state {
                        NavState::Mystery => NavState::Overview,
                        _ => NavState::Mystery,
                    };
                }
                ButtonId::Next => self.prayer.next(),
                ButtonId::Reset if gesture.is_hold() => self.prayer.reset(),
                ButtonId::Reset => self.prayer.snap_to_decade(),
                ButtonId::NextReset => self.state = NavState::Battery,
                ButtonId::Prev => self.prayer.prev(),
            }
        }

        #[cfg(feature = "debug-mode")]
        defmt::info!("{} -> {} at {}", gesture, self.state, self.prayer);
    }

    #[cfg(test)]
    pub(crate) fn at(state: NavState, prayer: u8) -> Self {
        Self {
            state,
            prayer: PrayerIndex::try_from(prayer).unwrap(),
        }
    }
}
