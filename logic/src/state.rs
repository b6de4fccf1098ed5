/// Instantaneous levels of both encoder channels, sampled together.
///
/// Bit 0 holds channel A and bit 1 holds channel B (`A | B << 1`).
/// This is the order the pio `in pins, 2` instruction shifts them in when pin A is the input base.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelState(u8);

impl ChannelState {
    pub const LOW_LOW: Self = Self(0b00);
    pub const A_HIGH: Self = Self(0b01);
    pub const HIGH_HIGH: Self = Self(0b11);
    pub const B_HIGH: Self = Self(0b10);

    /// Build a state from a raw word.
    ///
    /// Everything above the two low bits is masked off, so an out of range word can never reach
    /// the transition table.
    pub const fn new(raw: u32) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "value is masked to two bits before the cast"
        )]
        let bits = (raw & 0b11) as u8;
        Self(bits)
    }

    pub const fn from_levels(a: bool, b: bool) -> Self {
        Self(a as u8 | (b as u8) << 1)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }
    pub const fn a(self) -> bool {
        self.0 & 0b01 != 0
    }
    pub const fn b(self) -> bool {
        self.0 & 0b10 != 0
    }

    /// Number of channels that changed level between `self` and `other`.
    pub const fn flipped_bits(self, other: Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}
