//! Idle baseline tracking on the shared sense pin.
//!
//! With no button down the pin sits at a level set by the battery voltage.
//! Every button pulls it down through the resistor ladder, so the same pin
//! gives both the battery level (the idle reading) and the pressed button
//! (the ratio of the reading to the idle level).

use crate::{
    analog::AnalogSample,
    button::ButtonId,
    config::{
        BASELINE_CANCELLED, BASELINE_SEED, BATTERY_EMPTY, BATTERY_FULL, BATTERY_STEP,
        CALIBRATION_FLOOR, NEXT_BAND, NEXT_RESET_BAND, RESET_BAND,
    },
};

/// What a reading means relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub enum Reading {
    /// At or near idle; the baseline has been moved to this reading
    Released,
    /// Pulled down by a button
    Pressed(ButtonId),
    /// Pulled down, but the baseline is too small to divide by yet
    Calibrating,
}

/// Decaying estimate of the idle sense level.
#[derive(Debug, Clone)]
pub struct BatteryMonitor {
    baseline: u16,
}

impl Default for BatteryMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatteryMonitor {
    /// Monitor at power-on, before any calibration.
    pub const fn new() -> Self {
        Self {
            baseline: BASELINE_SEED,
        }
    }

    /// Current idle estimate.
    pub fn baseline(&self) -> u16 {
        self.baseline
    }

    /// True when `sample` is within 1/256 of the baseline or above it.
    pub fn is_release(&self, sample: AnalogSample) -> bool {
        sample.get() > self.baseline - (self.baseline >> 8)
    }

    /// Reading relative to the baseline, as a fraction of 128.
    ///
    /// `None` while the baseline is at or below the calibration floor.
    pub fn ratio(&self, sample: AnalogSample) -> Option<u16> {
        if self.baseline > CALIBRATION_FLOOR {
            Some(sample.get() / (self.baseline >> 7))
        } else {
            None
        }
    }

    /// Maps a pulled-down reading onto a button.
    pub fn classify(&self, sample: AnalogSample) -> Option<ButtonId> {
        self.ratio(sample).map(|ratio| {
            if ratio >= NEXT_BAND {
                ButtonId::Next
            } else if ratio >= RESET_BAND {
                ButtonId::Reset
            } else if ratio >= NEXT_RESET_BAND {
                ButtonId::NextReset
            } else {
                ButtonId::Prev
            }
        })
    }

    /// Interprets one sample and recalibrates on release.
    pub fn observe(&mut self, sample: AnalogSample) -> Reading {
        if self.is_release(sample) {
            self.baseline = sample.get();
            Reading::Released
        } else {
            self.classify(sample)
                .map_or(Reading::Calibrating, Reading::Pressed)
        }
    }

    /// Drops the current calibration.
    ///
    /// The next reading, whatever it is, becomes the new baseline.
    pub fn invalidate(&mut self) {
        #[cfg(feature = "debug-mode")]
        defmt::debug!("baseline {=u16} invalidated", self.baseline);
        self.baseline = BASELINE_CANCELLED;
    }

    /// Battery gauge position in `0..=9`.
    pub fn level(&self) -> u8 {
        if self.baseline < BATTERY_EMPTY {
            0
        } else if self.baseline >= BATTERY_FULL {
            9
        } else {
            ((self.baseline - BATTERY_EMPTY) / BATTERY_STEP) as u8
        }
    }

    #[cfg(test)]
    pub(crate) fn with_baseline(baseline: u16) -> Self {
        Self { baseline }
    }
}
