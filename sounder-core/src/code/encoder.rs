//! Character encoder
//!
//! Converts one character into absolute-time level changes. All times are
//! derived by adding whole units to the character's start time, so there
//! is no rounding and no drift across a transmission.
//!
//! Timing for a letter, in units (`S` shown, `=` key down, `_` key up):
//!
//! ```text
//! = _ = _ = _ _
//! 0 1 2 3 4 5 6 7
//! H L H L H L   L   <- events
//! ```
//!
//! A word gap is a single key-up event four units after its start. Every
//! letter already ends in a letter gap, which together with these four
//! units makes up the word gap.

use heapless::Vec;

use super::table::{lookup, MAX_MARKS};
use crate::traits::{Level, TimeMs};

/// Worst-case events for one character: two per mark plus the gap marker
pub const MAX_EVENTS_PER_CHAR: usize = 2 * MAX_MARKS + 1;

/// Units between the last mark's falling edge and the letter-gap marker
pub const LETTER_GAP_UNITS: u32 = 2;

/// Units a whitespace character adds on top of the trailing letter gap
pub const WORD_GAP_UNITS: u32 = 4;

/// Silence between marks of the same letter
const MARK_GAP_UNITS: u32 = 1;

/// A level change due at an absolute time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalEvent {
    /// When to apply the level
    pub at_ms: TimeMs,
    /// Level to apply
    pub level: Level,
}

impl SignalEvent {
    /// Create a new event
    pub const fn new(at_ms: TimeMs, level: Level) -> Self {
        Self { at_ms, level }
    }

    /// Check if the event is due at `now_ms`
    pub const fn is_due(&self, now_ms: TimeMs) -> bool {
        self.at_ms <= now_ms
    }
}

/// Result of encoding one character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Events in fire order (times never decrease)
    pub events: Vec<SignalEvent, MAX_EVENTS_PER_CHAR>,
    /// Time the character's slot ends; a following character may start here
    pub next_ms: TimeMs,
}

impl Encoded {
    fn empty(at_ms: TimeMs) -> Self {
        Self {
            events: Vec::new(),
            next_ms: at_ms,
        }
    }

    /// True if the character produced no events (unrecognized)
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Check if a character is a word separator
///
/// Space, tab, newline, carriage return and form feed.
pub fn is_word_gap(symbol: u8) -> bool {
    symbol.is_ascii_whitespace()
}

/// Encode one character starting at `start_ms`
///
/// - Letters and digits: a HIGH/LOW pair per mark, one unit of silence
///   between marks, then a LOW marker [`LETTER_GAP_UNITS`] after the last
///   falling edge.
/// - Whitespace: one LOW event [`WORD_GAP_UNITS`] after `start_ms`.
/// - Anything else: no events, `next_ms == start_ms`.
pub fn encode(symbol: u8, start_ms: TimeMs, unit_ms: u32) -> Encoded {
    let unit = unit_ms as TimeMs;

    if is_word_gap(symbol) {
        let at_ms = start_ms + WORD_GAP_UNITS as TimeMs * unit;
        let mut out = Encoded::empty(at_ms);
        push(&mut out.events, at_ms, Level::Low);
        return out;
    }

    let Some(marks) = lookup(symbol) else {
        return Encoded::empty(start_ms);
    };

    let mut out = Encoded::empty(start_ms);
    let mut cursor = start_ms;

    for (i, mark) in marks.iter().enumerate() {
        if i > 0 {
            cursor += MARK_GAP_UNITS as TimeMs * unit;
        }
        push(&mut out.events, cursor, Level::High);
        cursor += mark.units() as TimeMs * unit;
        push(&mut out.events, cursor, Level::Low);
    }

    let gap_end = cursor + LETTER_GAP_UNITS as TimeMs * unit;
    push(&mut out.events, gap_end, Level::Low);
    out.next_ms = gap_end;

    out
}

fn push(events: &mut Vec<SignalEvent, MAX_EVENTS_PER_CHAR>, at_ms: TimeMs, level: Level) {
    // Table codes are at most MAX_MARKS long, so this always fits.
    let pushed = events.push(SignalEvent::new(at_ms, level));
    debug_assert!(pushed.is_ok());
}
