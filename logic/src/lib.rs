//! This crate contains all the logic for decoding quadrature samples and turning them into
//! position and speed telemetry.
//! This crate specificity does **not** depend on embassy-rp.
//! Depending on embassy-rp would prevent me from running the unit test on my base machine.
#![cfg_attr(not(test), no_std)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
mod config;
pub mod decoder;
mod heartbeat;
mod report;
pub mod schedule;
mod shared;
pub mod sim;
mod speed;
mod state;

pub use config::{Config, ConfigError};
pub use decoder::QuadratureDecoder;
pub use heartbeat::Heartbeat;
pub use report::{Report, Reporter, Tick};
pub use schedule::Interval;
pub use shared::SharedPosition;
pub use speed::{Rpm, SpeedMeter};
pub use state::ChannelState;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}
impl Direction {
    /// Direction of travel implied by a position delta. `None` if nothing moved.
    pub fn from_delta(delta: i32) -> Option<Self> {
        use core::cmp::Ordering as E;
        match delta.cmp(&0) {
            E::Equal => None,
            E::Greater => Some(Direction::Clockwise),
            E::Less => Some(Direction::CounterClockwise),
        }
    }
}

/// A source of channel samples, yielded in the order they were taken.
///
/// This trait exists as a seam so that a simulated encoder can be injected when unit testing
/// application code.
pub trait SampleSource {
    /// The oldest sample not yet consumed, or `None` if none is waiting.
    fn try_sample(&mut self) -> Option<ChannelState>;
}
