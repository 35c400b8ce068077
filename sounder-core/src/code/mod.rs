//! Morse code table and character encoder
//!
//! The table maps letters and digits to marks. The encoder turns one
//! character into the absolute-time level changes that key it.

pub mod encoder;
pub mod table;

pub use encoder::{
    encode, is_word_gap, Encoded, SignalEvent, LETTER_GAP_UNITS, MAX_EVENTS_PER_CHAR,
    WORD_GAP_UNITS,
};
pub use table::{lookup, CodeEntry, Mark, CODE_TABLE, MAX_MARKS};
