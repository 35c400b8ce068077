//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in sounder-core, built on the sounder-hal peripheral traits:
//!
//! - Keying outputs (direct pin, sidetone, runtime selection)
//! - Serial byte source with receive-fault accounting
//! - Adapter from embedded-hal output pins

#![no_std]
#![deny(unsafe_code)]

pub mod compat;
pub mod input;
pub mod output;

pub use compat::EhOutputPin;
pub use input::{RxErrorCounts, SerialSource};
pub use output::{KeyOutput, PinKeyer, ToneKeyer};
