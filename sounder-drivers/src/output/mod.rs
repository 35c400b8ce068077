//! Keying outputs
//!
//! The keying line is either a plain digital pin or a tone generator. The
//! choice is made once from configuration; timing is identical for both.

pub mod pin;
pub mod tone;

pub use pin::PinKeyer;
pub use tone::ToneKeyer;

use sounder_core::traits::{Level, SignalOutput};
use sounder_hal::{OutputPin, ToneChannel};

/// Keying output selected at startup
pub enum KeyOutput<P, T> {
    /// Direct digital line
    Pin(PinKeyer<P>),
    /// Sidetone on a PWM channel
    Tone(ToneKeyer<T>),
}

impl<P: OutputPin, T: ToneChannel> KeyOutput<P, T> {
    /// True if this output keys a tone
    pub fn is_tone(&self) -> bool {
        matches!(self, KeyOutput::Tone(_))
    }
}

impl<P: OutputPin, T: ToneChannel> SignalOutput for KeyOutput<P, T> {
    fn set_level(&mut self, level: Level) {
        match self {
            KeyOutput::Pin(pin) => pin.set_level(level),
            KeyOutput::Tone(tone) => tone.set_level(level),
        }
    }

    fn level(&self) -> Level {
        match self {
            KeyOutput::Pin(pin) => pin.level(),
            KeyOutput::Tone(tone) => tone.level(),
        }
    }
}
