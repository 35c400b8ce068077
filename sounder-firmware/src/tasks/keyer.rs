//! Keyer task
//!
//! Polls the keyer as fast as the executor allows. Each poll is one
//! non-blocking step; yielding between polls keeps other tasks (and the
//! UART interrupt) serviced.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Output;

use sounder_core::traits::Clock;
use sounder_core::Keyer;
use sounder_drivers::{EhOutputPin, KeyOutput, SerialSource};

use crate::board::{EmbassyClock, PwmTone, RpUartRx};

/// Period of the status log line
pub const STATUS_INTERVAL_MS: u64 = 10_000;

/// Keyer wired to this board's peripherals
pub type FirmwareKeyer =
    Keyer<SerialSource<RpUartRx>, KeyOutput<EhOutputPin<Output<'static>>, PwmTone>, EmbassyClock>;

#[embassy_executor::task]
pub async fn keyer_task(mut keyer: FirmwareKeyer) {
    info!("Keyer task started");

    let mut next_status = EmbassyClock.now_ms() + STATUS_INTERVAL_MS;
    let mut rx_errors = 0;

    loop {
        keyer.poll();

        let now = EmbassyClock.now_ms();
        if now >= next_status {
            next_status = now + STATUS_INTERVAL_MS;
            report_status(&mut keyer, &mut rx_errors);
        }

        yield_now().await;
    }
}

fn report_status(keyer: &mut FirmwareKeyer, rx_errors: &mut u32) {
    let stats = keyer.stats();
    let seq = keyer.sequencer();
    debug!(
        "status: {} chars keyed, {} skipped, input {}/{}",
        stats.chars_encoded,
        stats.chars_skipped,
        seq.input_len(),
        seq.input_capacity()
    );

    let errors = keyer.source_mut().errors();
    if errors.total() != *rx_errors {
        warn!("UART rx errors: {}", errors);
        *rx_errors = errors.total();
    }
}
