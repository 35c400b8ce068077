//! Keying output

/// Logical level of the keying line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Key up: line released, tone off
    Low,
    /// Key down: line asserted, tone on
    High,
}

impl Level {
    /// True for [`Level::High`]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Trait for the keying output
///
/// Implementations drive a digital pin or switch a sidetone on and off.
/// Which one is used has no effect on timing.
pub trait SignalOutput {
    /// Apply a logical level to the line
    fn set_level(&mut self, level: Level);

    /// Last level applied
    fn level(&self) -> Level;
}

impl<O: SignalOutput + ?Sized> SignalOutput for &mut O {
    fn set_level(&mut self, level: Level) {
        (**self).set_level(level)
    }

    fn level(&self) -> Level {
        (**self).level()
    }
}
