//! International Morse code table
//!
//! Letters A-Z and digits 0-9 only. The table is laid out in index order
//! (letters first, then digits) so lookup is a subtraction, not a search.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single Morse element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mark {
    /// Short element, one unit of key-down
    Dot,
    /// Long element, three units of key-down
    Dash,
}

impl Mark {
    /// Key-down duration in time units
    pub const fn units(self) -> u32 {
        match self {
            Mark::Dot => 1,
            Mark::Dash => 3,
        }
    }
}

/// Longest code in the table (digits are five marks)
pub const MAX_MARKS: usize = 5;

/// One table row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeEntry {
    /// Uppercase ASCII letter or digit
    pub symbol: u8,
    /// Marks in transmission order
    pub marks: &'static [Mark],
}

const DOT: Mark = Mark::Dot;
const DASH: Mark = Mark::Dash;

const fn entry(symbol: u8, marks: &'static [Mark]) -> CodeEntry {
    CodeEntry { symbol, marks }
}

/// The full table, A-Z followed by 0-9
pub static CODE_TABLE: [CodeEntry; 36] = [
    entry(b'A', &[DOT, DASH]),
    entry(b'B', &[DASH, DOT, DOT, DOT]),
    entry(b'C', &[DASH, DOT, DASH, DOT]),
    entry(b'D', &[DASH, DOT, DOT]),
    entry(b'E', &[DOT]),
    entry(b'F', &[DOT, DOT, DASH, DOT]),
    entry(b'G', &[DASH, DASH, DOT]),
    entry(b'H', &[DOT, DOT, DOT, DOT]),
    entry(b'I', &[DOT, DOT]),
    entry(b'J', &[DOT, DASH, DASH, DASH]),
    entry(b'K', &[DASH, DOT, DASH]),
    entry(b'L', &[DOT, DASH, DOT, DOT]),
    entry(b'M', &[DASH, DASH]),
    entry(b'N', &[DASH, DOT]),
    entry(b'O', &[DASH, DASH, DASH]),
    entry(b'P', &[DOT, DASH, DASH, DOT]),
    entry(b'Q', &[DASH, DASH, DOT, DASH]),
    entry(b'R', &[DOT, DASH, DOT]),
    entry(b'S', &[DOT, DOT, DOT]),
    entry(b'T', &[DASH]),
    entry(b'U', &[DOT, DOT, DASH]),
    entry(b'V', &[DOT, DOT, DOT, DASH]),
    entry(b'W', &[DOT, DASH, DASH]),
    entry(b'X', &[DASH, DOT, DOT, DASH]),
    entry(b'Y', &[DASH, DOT, DASH, DASH]),
    entry(b'Z', &[DASH, DASH, DOT, DOT]),
    entry(b'0', &[DASH, DASH, DASH, DASH, DASH]),
    entry(b'1', &[DOT, DASH, DASH, DASH, DASH]),
    entry(b'2', &[DOT, DOT, DASH, DASH, DASH]),
    entry(b'3', &[DOT, DOT, DOT, DASH, DASH]),
    entry(b'4', &[DOT, DOT, DOT, DOT, DASH]),
    entry(b'5', &[DOT, DOT, DOT, DOT, DOT]),
    entry(b'6', &[DASH, DOT, DOT, DOT, DOT]),
    entry(b'7', &[DASH, DASH, DOT, DOT, DOT]),
    entry(b'8', &[DASH, DASH, DASH, DOT, DOT]),
    entry(b'9', &[DASH, DASH, DASH, DASH, DOT]),
];

/// Look up the marks for a character
///
/// Lowercase letters are folded to uppercase first. Anything outside
/// A-Z and 0-9 returns `None`.
pub fn lookup(symbol: u8) -> Option<&'static [Mark]> {
    let symbol = symbol.to_ascii_uppercase();
    let index = match symbol {
        b'A'..=b'Z' => symbol - b'A',
        b'0'..=b'9' => 26 + (symbol - b'0'),
        _ => return None,
    };

    CODE_TABLE.get(index as usize).map(|e| e.marks)
}
