//! Collaborator traits
//!
//! The keying engine talks to the outside world through three narrow
//! interfaces. Drivers implement them over real peripherals; tests
//! implement them with scripted mocks.

pub mod clock;
pub mod input;
pub mod output;

pub use clock::{Clock, TimeMs};
pub use input::ByteSource;
pub use output::{Level, SignalOutput};
