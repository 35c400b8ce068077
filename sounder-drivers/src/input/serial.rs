//! Serial byte source
//!
//! Feeds the keyer from a polled UART. Line faults are counted and the
//! affected byte is dropped; the keyer only ever sees clean bytes.

use sounder_core::traits::ByteSource;
use sounder_hal::{RxError, UartRx};

/// Receive faults seen since creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxErrorCounts {
    pub framing: u32,
    pub parity: u32,
    pub overrun: u32,
    pub line_break: u32,
    pub other: u32,
}

impl RxErrorCounts {
    fn record(&mut self, error: RxError) {
        let slot = match error {
            RxError::Framing => &mut self.framing,
            RxError::Parity => &mut self.parity,
            RxError::Overrun => &mut self.overrun,
            RxError::Break => &mut self.line_break,
            RxError::Other => &mut self.other,
        };
        *slot = slot.saturating_add(1);
    }

    /// Sum over all kinds
    pub fn total(&self) -> u32 {
        self.framing
            .saturating_add(self.parity)
            .saturating_add(self.overrun)
            .saturating_add(self.line_break)
            .saturating_add(self.other)
    }
}

/// UART-backed byte source
pub struct SerialSource<R> {
    uart: R,
    errors: RxErrorCounts,
}

impl<R: UartRx> SerialSource<R> {
    pub fn new(uart: R) -> Self {
        Self {
            uart,
            errors: RxErrorCounts::default(),
        }
    }

    /// Receive faults seen so far
    pub fn errors(&self) -> RxErrorCounts {
        self.errors
    }

    /// Release the receiver
    pub fn free(self) -> R {
        self.uart
    }
}

impl<R: UartRx> ByteSource for SerialSource<R> {
    fn bytes_available(&mut self) -> usize {
        self.uart.rx_available()
    }

    fn read_one(&mut self) -> Option<u8> {
        match self.uart.try_read_byte() {
            Ok(byte) => byte,
            Err(e) => {
                self.errors.record(e);

                #[cfg(feature = "defmt")]
                defmt::warn!("uart rx error: {}", e);

                None
            }
        }
    }
}
