//! GPIO keying output
//!
//! Keys a transmitter, LED or relay directly from a GPIO pin (possibly
//! through a transistor that inverts the logic).

use sounder_core::config::PinConfig;
use sounder_core::traits::{Level, SignalOutput};
use sounder_hal::OutputPin;

/// GPIO keying output
///
/// The pin can be active-high (default) or active-low.
pub struct PinKeyer<P> {
    pin: P,
    /// If true, key down = pin LOW
    inverted: bool,
    /// Current logical level
    level: Level,
}

impl<P: OutputPin> PinKeyer<P> {
    /// Create a new keying output with the key up
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to drive
    /// - `inverted`: If true, key down drives the pin LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut keyer = Self {
            pin,
            inverted,
            level: Level::Low,
        };
        // Ensure the line starts released
        keyer.set_level(Level::Low);
        keyer
    }

    /// Create a keying output from pin configuration
    pub fn from_config(pin: P, config: &PinConfig) -> Self {
        Self::new(pin, config.inverted)
    }

    /// Create an active-high keying output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create an active-low keying output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Release the pin
    pub fn free(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> SignalOutput for PinKeyer<P> {
    fn set_level(&mut self, level: Level) {
        self.level = level;

        // Normal: key down → high; inverted: key down → low
        self.pin.set_state(level.is_high() != self.inverted);
    }

    fn level(&self) -> Level {
        self.level
    }
}
