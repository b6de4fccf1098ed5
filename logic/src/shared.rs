use core::sync::atomic::{AtomicI32, Ordering};

/// Hands the decoder's accumulator from the sampling context to the reporting context.
///
/// Only plain atomic loads and stores are used: thumbv6m (rp2040) has no read-modify-write
/// atomics, and the decoder is the single writer anyway.
pub struct SharedPosition(AtomicI32);

impl Default for SharedPosition {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedPosition {
    pub const fn new() -> Self {
        Self(AtomicI32::new(0))
    }
    /// Make a new accumulator value visible to readers.
    pub fn publish(&self, position: i32) {
        self.0.store(position, Ordering::Release);
    }
    /// Latest published accumulator value.
    pub fn snapshot(&self) -> i32 {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::SharedPosition;
    use crate::{ChannelState, QuadratureDecoder};

    #[test]
    fn readers_see_published_position() {
        static POSITION: SharedPosition = SharedPosition::new();
        let mut decoder = QuadratureDecoder::new();
        for state in [0, 2, 3, 1, 0] {
            decoder.apply_sample(ChannelState::new(state));
        }
        assert_eq!(POSITION.snapshot(), 0);
        POSITION.publish(decoder.position());
        assert_eq!(POSITION.snapshot(), -4);
    }

    #[test]
    fn snapshot_from_another_thread() {
        let shared = SharedPosition::new();
        std::thread::scope(|scope| {
            scope.spawn(|| shared.publish(1234)).join().unwrap();
        });
        assert_eq!(shared.snapshot(), 1234);
    }
}
