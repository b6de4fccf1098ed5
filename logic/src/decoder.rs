use core::num::Wrapping;

use crate::{SampleSource, state::ChannelState};

/// Position delta for every `(previous << 2) | new` pair of channel states.
///
/// Forward rotation walks the Gray sequence `00 -> 01 -> 11 -> 10 -> 00` and counts `+1` per
/// edge, the reverse walk counts `-1`.
/// Keys where nothing changed, or where both channels changed at once, count `0`.
/// A double flip means a sample was missed and the direction cannot be recovered from it.
pub const TRANSITION_TABLE: [i8; 16] = [
    //   new: 00  01  10  11
    /* 00 */ 0, 1, -1, 0, //
    /* 01 */ -1, 0, 0, 1, //
    /* 10 */ 1, 0, 0, -1, //
    /* 11 */ 0, -1, 1, 0, //
];

/// Look up the position delta for a single transition.
pub const fn transition_delta(previous: ChannelState, new: ChannelState) -> i8 {
    TRANSITION_TABLE[((previous.raw() << 2) | new.raw()) as usize]
}

/// Table driven quadrature edge decoder.
///
/// The position accumulator wraps on overflow (two's complement), matching how the step counters
/// of the pio programs roll over. Use [`i32::wrapping_sub`] on two snapshots to get the distance
/// travelled between them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct QuadratureDecoder {
    /// `None` until the first sample has been seen.
    last_state: Option<ChannelState>,
    position: Wrapping<i32>,
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self {
            last_state: None,
            position: Wrapping(0),
        }
    }

    /// Feed the next sample and return the position delta it produced.
    ///
    /// The first sample after construction only seeds the previous state and always returns 0.
    pub fn apply_sample(&mut self, state: ChannelState) -> i8 {
        let Some(previous) = self.last_state.replace(state) else {
            return 0;
        };
        let delta = transition_delta(previous, state);
        self.position += Wrapping(i32::from(delta));
        delta
    }

    /// Apply every sample the source currently has, oldest first.
    ///
    /// Returns the number of samples consumed.
    pub fn drain(&mut self, source: &mut impl SampleSource) -> usize {
        let mut consumed = 0;
        while let Some(state) = source.try_sample() {
            self.apply_sample(state);
            consumed += 1;
        }
        consumed
    }

    pub fn position(&self) -> i32 {
        self.position.0
    }
    pub fn last_state(&self) -> Option<ChannelState> {
        self.last_state
    }
}
