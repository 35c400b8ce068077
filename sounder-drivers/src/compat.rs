//! embedded-hal adapters
//!
//! Lets any embedded-hal 1.0 output pin (including the chip HAL's own
//! `Output`) drive a keying line.

use core::convert::Infallible;

use embedded_hal::digital::{OutputPin as EhPin, PinState};
use sounder_hal::OutputPin;

/// Wraps an embedded-hal output pin whose writes cannot fail
///
/// The last written state is cached so `is_set_high` does not need
/// mutable access to the pin.
pub struct EhOutputPin<P> {
    pin: P,
    high: bool,
}

impl<P: EhPin<Error = Infallible>> EhOutputPin<P> {
    /// Wrap a pin, driving it low
    pub fn new(mut pin: P) -> Self {
        infallible(pin.set_low());
        Self { pin, high: false }
    }

    /// Release the pin
    pub fn free(self) -> P {
        self.pin
    }

    fn write(&mut self, high: bool) {
        infallible(self.pin.set_state(PinState::from(high)));
        self.high = high;
    }
}

impl<P: EhPin<Error = Infallible>> OutputPin for EhOutputPin<P> {
    fn set_high(&mut self) {
        self.write(true);
    }

    fn set_low(&mut self) {
        self.write(false);
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

fn infallible(result: Result<(), Infallible>) {
    if let Err(never) = result {
        match never {}
    }
}
