//! Sidetone keying output
//!
//! Key down starts a square wave at the configured pitch, key up silences
//! it. Used for practice oscillators and audible beacons.

use sounder_core::traits::{Level, SignalOutput};
use sounder_hal::ToneChannel;

/// Tone keying output
pub struct ToneKeyer<T> {
    channel: T,
    freq_hz: u32,
    level: Level,
}

impl<T: ToneChannel> ToneKeyer<T> {
    /// Create a tone output, initially silent
    pub fn new(channel: T, freq_hz: u16) -> Self {
        let mut keyer = Self {
            channel,
            freq_hz: freq_hz as u32,
            level: Level::Low,
        };
        keyer.set_level(Level::Low);
        keyer
    }

    /// Tone pitch in Hz
    pub fn freq_hz(&self) -> u32 {
        self.freq_hz
    }

    /// Release the channel
    pub fn free(self) -> T {
        self.channel
    }
}

impl<T: ToneChannel> SignalOutput for ToneKeyer<T> {
    fn set_level(&mut self, level: Level) {
        self.level = level;

        match level {
            Level::High => {
                if !self.channel.is_sounding() {
                    self.channel.start(self.freq_hz);
                }
            }
            Level::Low => self.channel.stop(),
        }
    }

    fn level(&self) -> Level {
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockTone {
        freq: Option<u32>,
        starts: u32,
    }

    impl MockTone {
        fn new() -> Self {
            Self {
                freq: None,
                starts: 0,
            }
        }
    }

    impl ToneChannel for MockTone {
        fn start(&mut self, freq_hz: u32) {
            self.freq = Some(freq_hz);
            self.starts += 1;
        }

        fn stop(&mut self) {
            self.freq = None;
        }

        fn is_sounding(&self) -> bool {
            self.freq.is_some()
        }
    }

    #[test]
    fn test_starts_silent() {
        let keyer = ToneKeyer::new(MockTone::new(), 700);

        assert_eq!(keyer.level(), Level::Low);
        assert_eq!(keyer.freq_hz(), 700);
        assert!(!keyer.free().is_sounding());
    }

    #[test]
    fn test_key_down_sounds_at_pitch() {
        let mut keyer = ToneKeyer::new(MockTone::new(), 650);

        keyer.set_level(Level::High);
        assert_eq!(keyer.channel.freq, Some(650));

        keyer.set_level(Level::Low);
        assert_eq!(keyer.channel.freq, None);
        assert_eq!(keyer.level(), Level::Low);
    }

    #[test]
    fn test_repeated_key_down_does_not_restart() {
        let mut keyer = ToneKeyer::new(MockTone::new(), 700);

        keyer.set_level(Level::High);
        keyer.set_level(Level::High);

        assert_eq!(keyer.channel.starts, 1);
    }
}
