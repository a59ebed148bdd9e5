//! Command port: UART driver exposed as a [`ByteStream`].
//!
//! The ESP-IDF driver buffers RX bytes in its interrupt handler; this
//! wrapper only reads what is already there (`NON_BLOCK`). The driver has
//! no peek, so one byte of lookahead is kept here.

use esp_idf_svc::hal::delay::NON_BLOCK;
use esp_idf_svc::hal::gpio::{self, InputPin, OutputPin};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, Uart, UartDriver};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use crate::stream::ByteStream;

/// Non-blocking UART command stream.
pub struct UartStream<'d> {
    driver: UartDriver<'d>,
    lookahead: Option<u8>,
}

impl<'d> UartStream<'d> {
    /// Install the UART driver at `baud_rate`, no flow control.
    pub fn new<U: Uart>(
        uart: impl Peripheral<P = U> + 'd,
        tx_pin: impl Peripheral<P = impl OutputPin> + 'd,
        rx_pin: impl Peripheral<P = impl InputPin> + 'd,
        baud_rate: u32,
    ) -> Result<Self, EspError> {
        let config = uart::config::Config::default().baudrate(Hertz(baud_rate));

        let driver = UartDriver::new(
            uart,
            tx_pin,
            rx_pin,
            Option::<gpio::AnyIOPin>::None,  // CTS
            Option::<gpio::AnyIOPin>::None,  // RTS
            &config,
        )?;

        Ok(Self {
            driver,
            lookahead: None,
        })
    }

    /// Bytes waiting in the driver RX buffer (0 on driver error).
    fn driver_pending(&self) -> usize {
        self.driver.remaining_read().unwrap_or(0)
    }

    /// Pull one byte from the driver without waiting.
    fn fetch(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.driver.read(&mut byte, NON_BLOCK) {
            Ok(1) => Some(byte[0]),
            _ => None,
        }
    }
}

impl ByteStream for UartStream<'_> {
    fn available(&mut self) -> usize {
        self.driver_pending() + usize::from(self.lookahead.is_some())
    }

    fn peek(&mut self) -> Option<u8> {
        if self.lookahead.is_none() {
            self.lookahead = self.fetch();
        }
        self.lookahead
    }

    fn read(&mut self) -> Option<u8> {
        self.lookahead.take().or_else(|| self.fetch())
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        self.driver.write(bytes).unwrap_or(0)
    }
}
