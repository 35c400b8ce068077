//! Tone generator abstraction
//!
//! Audio keying drives a buzzer or speaker with a square wave. On most
//! chips this is a PWM slice running at 50% duty.

/// Square-wave tone output
pub trait ToneChannel {
    /// Start sounding at the given frequency in Hz
    ///
    /// Calling this while a tone is already sounding retunes it.
    fn start(&mut self, freq_hz: u32);

    /// Silence the output
    fn stop(&mut self);

    /// Check if a tone is currently sounding
    fn is_sounding(&self) -> bool;
}
