//! Debounce, hold and auto-cancel for the four ladder buttons.
//!
//! The decoder only sees candidate button ids, one per tick while the ladder
//! is pulled down. Deciding when the ladder is released, and what the reading
//! means, is the job of [`crate::battery::BatteryMonitor`].

use crate::config::{CANCEL_TICKS, HOLD_TICKS};

/// Buttons on the resistor ladder.
///
/// Discriminants are the decode priority: when two candidates show up for
/// the same press, the higher one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
#[repr(u8)]
pub enum ButtonId {
    /// Advance one prayer. Held: toggle Mystery and Overview.
    Next = 1,
    /// Back to the start of the decade. Held: back to the Credo.
    Reset = 2,
    /// Next and Reset pressed together: battery gauge.
    NextReset = 3,
    /// Back one prayer.
    Prev = 4,
}

impl ButtonId {
    /// Priority of an optional button, with idle lowest.
    fn rank(id: Option<Self>) -> u8 {
        id.map_or(0, |id| id as u8)
    }
}

/// A completed press, handed over on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub struct Gesture {
    /// Button that was pressed
    pub id: ButtonId,
    /// Clock wraps the button stayed down
    pub hold_count: u8,
}

impl Gesture {
    /// Whether the press lasted long enough to count as a hold.
    pub const fn is_hold(&self) -> bool {
        self.hold_count >= HOLD_TICKS
    }
}

/// What a single [`ButtonDecoder::decode`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub enum Decoded {
    /// Nothing changed
    Unchanged,
    /// A new or higher-priority button became active
    Pressed(ButtonId),
    /// The active button was seen again on a clock wrap
    Held(u8),
    /// The active button stayed down past the cancel window
    Cancelled,
}

/// Press state machine.
#[derive(Debug, Default, Clone)]
pub struct ButtonDecoder {
    active: Option<ButtonId>,
    hold_count: u8,
}

impl ButtonDecoder {
    /// Idle decoder.
    pub const fn new() -> Self {
        Self {
            active: None,
            hold_count: 0,
        }
    }

    /// Feeds one classified reading.
    ///
    /// `turn` is the clock wrap flag of this tick; hold time only advances on
    /// wraps so it tracks real time no matter how often the loop runs.
    ///
    /// On [`Decoded::Cancelled`] the caller must invalidate the battery
    /// baseline, otherwise the stuck reading keeps being decoded as a press.
    pub fn decode(&mut self, candidate: ButtonId, turn: bool) -> Decoded {
        if self.active == Some(candidate) && turn {
            if self.hold_count < CANCEL_TICKS {
                self.hold_count += 1;
                Decoded::Held(self.hold_count)
            } else {
                #[cfg(feature = "debug-mode")]
                defmt::warn!("{} held past cancel window", candidate);
                self.clear();
                Decoded::Cancelled
            }
        } else if ButtonId::rank(self.active) < candidate as u8 {
            self.active = Some(candidate);
            self.hold_count = 0;
            Decoded::Pressed(candidate)
        } else {
            Decoded::Unchanged
        }
    }

    /// Ends the current press, if any, and returns it.
    pub fn release(&mut self) -> Option<Gesture> {
        let gesture = self.active.map(|id| Gesture {
            id,
            hold_count: self.hold_count,
        });
        self.clear();
        gesture
    }

    /// Button currently held down.
    pub fn active(&self) -> Option<ButtonId> {
        self.active
    }

    /// Clock wraps the active button has been held.
    pub fn hold_count(&self) -> u8 {
        self.hold_count
    }

    /// A hold has been recognized and is waiting for release.
    pub fn is_holding(&self) -> bool {
        self.hold_count >= HOLD_TICKS
    }

    fn clear(&mut self) {
        self.active = None;
        self.hold_count = 0;
    }
}
