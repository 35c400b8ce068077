//! Sounder - Morse Code Keying Firmware
//!
//! Reads text from UART0 and keys it out as International Morse code on a
//! single GPIO line, either as a steady level (LED, relay, transmitter key)
//! or as a square-wave sidetone.
//!
//! Named after the telegraph sounder, the electromagnetic clicker that
//! turned line current into the audible rhythm of dots and dashes.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartRx};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sounder_core::Keyer;
use sounder_drivers::{EhOutputPin, KeyOutput, PinKeyer, SerialSource, ToneKeyer};

use sounder_hal::UartConfig;

use crate::board::{uart_config, EmbassyClock, PwmTone, RpUartRx};
use crate::config::load_config;

mod board;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// UART receive ring size
const RX_BUF_SIZE: usize = 256;

// UART receive buffer (must live forever)
static RX_BUF: StaticCell<[u8; RX_BUF_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sounder firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Serial input on UART0 RX (GPIO1), 115200 8N1
    let rx_buf = RX_BUF.init([0u8; RX_BUF_SIZE]);
    let line = uart_config(&UartConfig::default());
    let rx = BufferedUartRx::new(p.UART0, Irqs, p.PIN_1, rx_buf, line);
    let source = SerialSource::new(RpUartRx::new(rx));
    info!("UART initialized for text input");

    // Keying line on GPIO15: PWM slice 7, channel B when keying a tone
    let output = if config.output.use_tone {
        let pwm = Pwm::new_output_b(p.PWM_SLICE7, p.PIN_15, PwmConfig::default());
        info!("Keying {}Hz sidetone on GPIO15", config.output.tone_hz);
        KeyOutput::Tone(ToneKeyer::new(PwmTone::new(pwm), config.output.tone_hz))
    } else {
        let pin = EhOutputPin::new(Output::new(p.PIN_15, Level::Low));
        info!(
            "Keying GPIO15 ({})",
            if config.output.pin.inverted { "active-low" } else { "active-high" }
        );
        KeyOutput::Pin(PinKeyer::from_config(pin, &config.output.pin))
    };

    let keyer = Keyer::new(config.timing, source, output, EmbassyClock);

    spawner.spawn(tasks::keyer_task(keyer)).unwrap();

    info!("Sounder ready");
}
