use embedded_hal::digital::StatefulOutputPin;

/// Status indicator that blinks while the main loop is alive.
pub struct Heartbeat<P> {
    pin: P,
    toggles: u32,
}

impl<P: StatefulOutputPin> Heartbeat<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, toggles: 0 }
    }

    /// Flip the indicator.
    ///
    /// # Errors
    /// Whatever the underlying pin reports.
    pub fn toggle(&mut self) -> Result<(), P::Error> {
        self.pin.toggle()?;
        self.toggles = self.toggles.wrapping_add(1);
        Ok(())
    }

    /// How many times the indicator has been flipped.
    pub fn toggles(&self) -> u32 {
        self.toggles
    }

    pub fn release(self) -> P {
        self.pin
    }
}
