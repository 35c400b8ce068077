//! Sounder Hardware Abstraction Layer
//!
//! This crate defines the hardware traits that chip-specific code implements
//! so the keying engine and its drivers never touch registers directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (sounder-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sounder-drivers (PinKeyer, ToneKeyer,  │
//! │  SerialSource)                          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  sounder-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital keying line
//! - [`uart::UartRx`] - Polled serial receiver
//! - [`tone::ToneChannel`] - Square-wave sidetone generator

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod tone;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use tone::ToneChannel;
pub use uart::{RxError, UartConfig, UartRx};
