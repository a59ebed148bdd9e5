//! Log output drain.
//!
//! Writes queued log entries to a dedicated TX-only UART, keeping them off
//! the command port.
//!
//! # Hardware Setup
//!
//! ```text
//! ESP32-S3 GPIO6 (TX) ──────▶ USB-UART RX
//!                              └─▶ PC Serial Monitor
//! ```
//!
//! **WARNING**: GPIO6 conflicts with Octal PSRAM. Only use on Quad flash boards!

use core::fmt::Write;

use crate::logging::{LogEntry, LogQueue, SliceWriter};

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::peripheral::Peripheral;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::uart::{self, UartTxDriver};

/// Formatted line size (timestamp + level + message).
pub const LINE_BUF_LEN: usize = 160;

/// Format log entry to string.
///
/// Format: `[timestamp_ms] LEVEL: message\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let mut writer = SliceWriter::new(buf);

    let _ = write!(
        writer,
        "[{:10}] {}: {}\n",
        entry.timestamp_ms,
        entry.level.as_str(),
        core::str::from_utf8(entry.message()).unwrap_or("<invalid utf8>")
    );

    writer.len()
}

/// Write up to `budget` queued entries to `out`.
///
/// Once the queue is empty, pending drop counts are reported and cleared.
/// Returns the number of entries written.
pub fn drain_log<const N: usize>(
    log: &mut LogQueue<N>,
    out: &mut dyn Write,
    budget: usize,
) -> usize {
    let mut line = [0u8; LINE_BUF_LEN];
    let mut written = 0;

    while written < budget {
        let Some(entry) = log.drain() else {
            break;
        };
        let len = format_log_entry(&entry, &mut line);
        let _ = out.write_str(core::str::from_utf8(&line[..len]).unwrap_or(""));
        written += 1;
    }

    if !log.has_entries() && log.dropped() > 0 {
        let _ = write!(out, "[WARN] Dropped: {}\n", log.dropped());
        log.reset_dropped();
    }

    written
}

/// Initialize UART1 TX-only on GPIO6 for logging output.
#[cfg(target_os = "espidf")]
pub fn init_uart_logger<'d>(
    uart: impl Peripheral<P = uart::UART1> + 'd,
    tx_pin: impl Peripheral<P = impl gpio::OutputPin> + 'd,
    baud_rate: u32,
) -> Result<UartTxDriver<'d>, esp_idf_svc::sys::EspError> {
    let uart_config = uart::config::Config::default()
        .baudrate(esp_idf_svc::hal::units::Hertz(baud_rate));

    UartTxDriver::new(
        uart,
        tx_pin,
        Option::<gpio::AnyIOPin>::None,  // CTS
        Option::<gpio::AnyIOPin>::None,  // RTS
        &uart_config,
    )
}

/// `fmt::Write` sink over the log UART.
#[cfg(target_os = "espidf")]
pub struct UartLogWriter<'a, 'd> {
    uart: &'a mut UartTxDriver<'d>,
}

#[cfg(target_os = "espidf")]
impl<'a, 'd> UartLogWriter<'a, 'd> {
    pub fn new(uart: &'a mut UartTxDriver<'d>) -> Self {
        Self { uart }
    }
}

#[cfg(target_os = "espidf")]
impl Write for UartLogWriter<'_, '_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.uart
            .write(s.as_bytes())
            .map(|_| ())
            .map_err(|_| core::fmt::Error)
    }
}
