//! Keying scheduler
//!
//! Moves characters from the byte source through the encoder and releases
//! the resulting level changes when their time arrives.

pub mod keyer;
pub mod sequencer;

pub use keyer::Keyer;
pub use sequencer::{EncodeOutcome, Intake, Sequencer, SequencerStats, SlotPhase, StepReport};
