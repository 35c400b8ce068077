//! Keyer configuration
//!
//! Configuration is read once at startup and never changes afterwards.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
