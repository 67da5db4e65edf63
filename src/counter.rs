//! Position within the prayer sequence.

use crate::{
    OutOfRange,
    config::{DECADE_LEN, DECADES_PER_MYSTERY, INTRODUCTION_LEN, MYSTERY_LEN, PRAYER_COUNT},
};

/// Index in `0..PRAYER_COUNT`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub struct PrayerIndex(u8);

/// Where an index falls in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub enum Position {
    /// Credo, Our Father and the three Hail Marys before the decades
    Introduction(u8),
    /// Inside a decade
    Decade {
        /// Mystery set, `0..3`
        mystery: u8,
        /// Decade within the mystery set, `0..5`
        decade: u8,
        /// 0 for the Our Father, 1..=10 for the Hail Marys
        bead: u8,
    },
}

impl PrayerIndex {
    /// The Credo.
    pub const START: Self = Self(0);

    /// Raw index.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Advances by `delta` steps modulo the sequence length.
    ///
    /// Never leaves the 8-bit range, even transiently, so it behaves the same
    /// as the narrow counter on the reference board.
    pub fn step(&mut self, delta: u8) {
        let delta = delta % PRAYER_COUNT;
        if self.0 > u8::MAX - delta {
            self.0 -= PRAYER_COUNT - delta;
        } else {
            self.0 += delta;
            if self.0 >= PRAYER_COUNT {
                self.0 -= PRAYER_COUNT;
            }
        }
    }

    /// Same result as [`step`](Self::step) using wide arithmetic.
    pub fn step_modular(&mut self, delta: u8) {
        self.0 = ((self.0 as u16 + delta as u16) % PRAYER_COUNT as u16) as u8;
    }

    /// One step forward.
    pub fn next(&mut self) {
        self.step(1);
    }

    /// One step back.
    pub fn prev(&mut self) {
        self.step(PRAYER_COUNT - 1);
    }

    /// Back to the Our Father of the current decade, or to the Credo while
    /// still in the introduction.
    pub fn snap_to_decade(&mut self) {
        if self.0 < INTRODUCTION_LEN {
            self.0 = 0;
        } else {
            self.0 -= (self.0 - INTRODUCTION_LEN) % DECADE_LEN;
        }
    }

    /// Back to the Credo.
    pub fn reset(&mut self) {
        *self = Self::START;
    }

    /// Splits the index into its place in the sequence.
    pub fn position(self) -> Position {
        match self.0.checked_sub(INTRODUCTION_LEN) {
            None => Position::Introduction(self.0),
            Some(offset) => Position::Decade {
                mystery: offset / MYSTERY_LEN,
                decade: (offset / DECADE_LEN) % DECADES_PER_MYSTERY,
                bead: offset % DECADE_LEN,
            },
        }
    }
}

impl TryFrom<u8> for PrayerIndex {
    type Error = OutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < PRAYER_COUNT {
            Ok(Self(value))
        } else {
            Err(OutOfRange {
                value,
                limit: PRAYER_COUNT,
            })
        }
    }
}

impl From<PrayerIndex> for u8 {
    fn from(index: PrayerIndex) -> Self {
        index.0
    }
}
