//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default dot length (8 WPM)
pub const DEFAULT_UNIT_MS: u32 = 150;

/// Longest dot accepted
pub const MAX_UNIT_MS: u32 = 2000;

/// Fastest speed accepted
pub const MAX_WPM: u8 = 60;

/// Dot length at 1 WPM with the PARIS reference word (50 units per word)
pub const PARIS_MS_PER_WPM: u32 = 1200;

/// Default keying GPIO
pub const DEFAULT_KEY_GPIO: u8 = 15;

/// Default sidetone pitch
pub const DEFAULT_TONE_HZ: u16 = 700;

/// Lowest sidetone accepted
pub const MIN_TONE_HZ: u16 = 100;

/// Highest sidetone accepted
pub const MAX_TONE_HZ: u16 = 4000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Time unit of zero
    ZeroUnit,
    /// Time unit above [`MAX_UNIT_MS`]
    UnitTooLong,
    /// Speed of zero or above [`MAX_WPM`]
    InvalidWpm,
    /// Tone output selected with a pitch outside the audible range
    ToneOutOfRange,
}

/// Keying speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Duration of one dot in milliseconds
    pub unit_ms: u32,
}

impl TimingConfig {
    /// Timing with an explicit dot length
    pub const fn from_unit_ms(unit_ms: u32) -> Self {
        Self { unit_ms }
    }

    /// Timing for a speed in words per minute
    ///
    /// Uses the PARIS convention, `unit = 1200 / wpm` (truncated).
    pub fn from_wpm(wpm: u8) -> Result<Self, ConfigError> {
        if wpm == 0 || wpm > MAX_WPM {
            return Err(ConfigError::InvalidWpm);
        }
        Ok(Self::from_unit_ms(PARIS_MS_PER_WPM / wpm as u32))
    }

    /// Approximate speed in words per minute
    pub fn wpm(&self) -> u32 {
        PARIS_MS_PER_WPM / self.unit_ms.max(1)
    }

    /// Check the unit is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unit_ms == 0 {
            return Err(ConfigError::ZeroUnit);
        }
        if self.unit_ms > MAX_UNIT_MS {
            return Err(ConfigError::UnitTooLong);
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::from_unit_ms(DEFAULT_UNIT_MS)
    }
}

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO number
    pub gpio: u8,
    /// Line is active-low (key down = pin low)
    pub inverted: bool,
}

impl PinConfig {
    /// Active-high pin
    pub const fn new(gpio: u8) -> Self {
        Self {
            gpio,
            inverted: false,
        }
    }

    /// Active-low pin
    pub const fn inverted(gpio: u8) -> Self {
        Self {
            gpio,
            inverted: true,
        }
    }
}

impl Default for PinConfig {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_GPIO)
    }
}

/// Keying output selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputConfig {
    /// Pin driven directly, or carrying the tone
    pub pin: PinConfig,
    /// Drive a tone instead of a plain level
    pub use_tone: bool,
    /// Tone pitch (ignored unless `use_tone`)
    pub tone_hz: u16,
}

impl OutputConfig {
    /// Check the tone pitch when tone output is selected
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.use_tone && !(MIN_TONE_HZ..=MAX_TONE_HZ).contains(&self.tone_hz) {
            return Err(ConfigError::ToneOutOfRange);
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pin: PinConfig::default(),
            use_tone: false,
            tone_hz: DEFAULT_TONE_HZ,
        }
    }
}

/// Complete keyer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyerConfig {
    pub timing: TimingConfig,
    pub output: OutputConfig,
}

impl KeyerConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timing.validate()?;
        self.output.validate()
    }
}
