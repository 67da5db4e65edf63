//! Readings of the shared button/battery sense pin.

/// A 10-bit conversion stored left-aligned in 16 bits.
///
/// The reference board reads the ADC with left alignment, so full scale is
/// `0xFFC0` and every threshold in this crate is expressed on that scale.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "debug-mode", derive(defmt::Format))]
pub struct AnalogSample(u16);

impl AnalogSample {
    /// Bits of precision kept from a conversion.
    pub const RESOLUTION_BITS: u32 = 10;

    /// Largest representable sample.
    pub const FULL_SCALE: Self = Self(0x3FF << (16 - Self::RESOLUTION_BITS));

    /// Wraps a value that is already left-aligned.
    pub const fn from_left_aligned(raw: u16) -> Self {
        Self(raw)
    }

    /// Converts a right-aligned conversion of `bits` resolution.
    ///
    /// Precision beyond 10 bits is dropped so that converters of any width
    /// produce the same scale.
    pub fn from_right_aligned(raw: u16, bits: u32) -> Self {
        let bits = bits.clamp(1, 16);
        let ten_bit = if bits >= Self::RESOLUTION_BITS {
            raw >> (bits - Self::RESOLUTION_BITS)
        } else {
            raw << (Self::RESOLUTION_BITS - bits)
        };
        Self((ten_bit & 0x3FF) << (16 - Self::RESOLUTION_BITS))
    }

    /// Left-aligned value.
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl From<u16> for AnalogSample {
    fn from(raw: u16) -> Self {
        Self::from_left_aligned(raw)
    }
}
