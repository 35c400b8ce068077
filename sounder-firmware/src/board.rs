//! RP2040 bindings for the keyer collaborators
//!
//! Glue between embassy-rp peripherals and the sounder-hal / sounder-core
//! traits: the monotonic clock, the buffered UART receiver and the PWM
//! sidetone.

use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{self, BufferedUartRx, Error as UartError};
use embassy_time::Instant;
use embedded_io::{Read, ReadReady};

use sounder_core::traits::{Clock, TimeMs};
use sounder_hal::uart::{DataBits, Parity, StopBits};
use sounder_hal::{RxError, ToneChannel, UartConfig, UartRx};

/// Milliseconds since boot from the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> TimeMs {
        Instant::now().as_millis()
    }
}

/// Interrupt-buffered UART receiver
pub struct RpUartRx {
    rx: BufferedUartRx,
}

impl RpUartRx {
    pub fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }
}

impl UartRx for RpUartRx {
    fn rx_available(&mut self) -> usize {
        // The ring buffer only reports ready / not ready
        match self.rx.read_ready() {
            Ok(true) => 1,
            _ => 0,
        }
    }

    fn try_read_byte(&mut self) -> Result<Option<u8>, RxError> {
        if !self.rx.read_ready().map_err(map_uart_error)? {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        match self.rx.read(&mut byte) {
            Ok(1) => Ok(Some(byte[0])),
            Ok(_) => Ok(None),
            Err(e) => Err(map_uart_error(e)),
        }
    }
}

/// Translate the line settings into the embassy-rp UART configuration
pub fn uart_config(config: &UartConfig) -> uart::Config {
    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    out.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    out
}

fn map_uart_error(e: UartError) -> RxError {
    match e {
        UartError::Overrun => RxError::Overrun,
        UartError::Break => RxError::Break,
        UartError::Parity => RxError::Parity,
        UartError::Framing => RxError::Framing,
        _ => RxError::Other,
    }
}

/// PWM clock divider; 125 MHz / 64 keeps `top` in range for 100 Hz - 4 kHz
const TONE_DIVIDER: u8 = 64;

/// System clock feeding the PWM slices
const SYS_CLOCK_HZ: u32 = 125_000_000;

/// Square-wave sidetone on one PWM output
pub struct PwmTone {
    pwm: Pwm<'static>,
    config: PwmConfig,
    sounding: bool,
}

impl PwmTone {
    /// Wrap a PWM slice driving its B output, initially silent
    pub fn new(mut pwm: Pwm<'static>) -> Self {
        let mut config = PwmConfig::default();
        config.divider = TONE_DIVIDER.into();
        config.compare_b = 0;
        pwm.set_config(&config);

        Self {
            pwm,
            config,
            sounding: false,
        }
    }
}

impl ToneChannel for PwmTone {
    fn start(&mut self, freq_hz: u32) {
        let counts = SYS_CLOCK_HZ / TONE_DIVIDER as u32 / freq_hz.max(1);
        let top = counts.clamp(2, u16::MAX as u32 + 1) - 1;

        self.config.top = top as u16;
        // 50% duty
        self.config.compare_b = ((top + 1) / 2) as u16;
        self.pwm.set_config(&self.config);
        self.sounding = true;
    }

    fn stop(&mut self) {
        self.config.compare_b = 0;
        self.pwm.set_config(&self.config);
        self.sounding = false;
    }

    fn is_sounding(&self) -> bool {
        self.sounding
    }
}
