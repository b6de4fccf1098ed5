//! Host side sample sources, used by tests and for exercising the reporting loop without hardware.
use crate::{SampleSource, state::ChannelState};

/// One forward electrical cycle.
const GRAY_CYCLE: [ChannelState; 4] = [
    ChannelState::LOW_LOW,
    ChannelState::A_HIGH,
    ChannelState::HIGH_HIGH,
    ChannelState::B_HIGH,
];

/// Replays a fixed, already ordered sequence of samples.
pub struct Replay<I>(I);

impl<I: Iterator<Item = ChannelState>> Replay<I> {
    pub fn new(samples: I) -> Self {
        Self(samples)
    }
}

impl<I: Iterator<Item = ChannelState>> SampleSource for Replay<I> {
    fn try_sample(&mut self) -> Option<ChannelState> {
        self.0.next()
    }
}

/// A simulated shaft.
///
/// Commanded steps are queued and handed out one channel edge per sample, the way a sampler that
/// never misses an edge would deliver them. The very first sample is the resting state, like the
/// first word the pio program pushes after start up.
pub struct SimulatedEncoder {
    phase: usize,
    pending_steps: i32,
    announced: bool,
}

impl SimulatedEncoder {
    pub fn new(resting: ChannelState) -> Self {
        let phase = GRAY_CYCLE
            .iter()
            .position(|state| *state == resting)
            .unwrap_or(0);
        Self {
            phase,
            pending_steps: 0,
            announced: false,
        }
    }

    /// Queue `steps` edges. Positive steps walk the forward Gray sequence.
    pub fn rotate(&mut self, steps: i32) {
        self.pending_steps = self.pending_steps.saturating_add(steps);
    }

    /// Move the shaft by `steps` edges without producing any samples, as if the sampler missed them.
    pub fn skip(&mut self, steps: i32) {
        self.phase = Self::advance(self.phase, steps);
    }

    /// Current channel levels of the shaft.
    pub fn state(&self) -> ChannelState {
        GRAY_CYCLE[self.phase]
    }

    pub fn pending_steps(&self) -> i32 {
        self.pending_steps
    }

    #[allow(
        clippy::cast_sign_loss,
        reason = "rem_euclid(4) is never negative"
    )]
    fn advance(phase: usize, steps: i32) -> usize {
        (phase + steps.rem_euclid(4) as usize) % GRAY_CYCLE.len()
    }
}

impl SampleSource for SimulatedEncoder {
    fn try_sample(&mut self) -> Option<ChannelState> {
        if !self.announced {
            self.announced = true;
            return Some(self.state());
        }
        let step = self.pending_steps.signum();
        if step == 0 {
            return None;
        }
        self.pending_steps -= step;
        self.phase = Self::advance(self.phase, step);
        Some(self.state())
    }
}
