//! Board-agnostic keying engine for the Morse sounder firmware
//!
//! This crate contains all logic that does not depend on specific
//! hardware:
//!
//! - International Morse code table
//! - Character encoder (marks and gaps to absolute-time level changes)
//! - Fixed-capacity input and pending-event queues
//! - Cooperative sequencer and keyer loop
//! - Collaborator traits (byte source, signal output, clock)
//! - Configuration types and text parser
//!
//! Nothing here blocks. The host calls [`scheduler::Keyer::poll`] (or
//! [`scheduler::Sequencer::step`]) as often as it likes; each call does at
//! most one intake, one encode and one emit and returns.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod code;
pub mod config;
pub mod queue;
pub mod scheduler;
pub mod traits;

pub use code::{encode, lookup, Encoded, Mark, SignalEvent};
pub use config::{KeyerConfig, OutputConfig, TimingConfig};
pub use scheduler::{Keyer, Sequencer, StepReport};
pub use traits::{ByteSource, Clock, Level, SignalOutput, TimeMs};
