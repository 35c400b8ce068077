//! Character input sources

pub mod serial;

pub use serial::{RxErrorCounts, SerialSource};
