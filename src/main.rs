//! RustWaveGenerator - Main entry point
//!
//! On ESP-IDF: UART0 is the command port, UART1 TX (GPIO6) carries logs.
//! On the host: stdin/stdout stand in for the command port and logs go to
//! stderr, so the firmware can be driven from a terminal or a test script.

#![cfg_attr(target_os = "espidf", no_std)]
#![cfg_attr(target_os = "espidf", no_main)]

#[cfg(target_os = "espidf")]
mod firmware {
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::sys as esp_idf_sys;

    use rust_wave_generator::{
        config::VERSION,
        hal::UartStream,
        uart_logger::{drain_log, init_uart_logger, UartLogWriter},
        ControlLoop, FirmwareConfig,
    };

    /// Yield to the idle task this often so its watchdog stays fed.
    const YIELD_INTERVAL_MS: u32 = 1000;

    #[no_mangle]
    fn main() {
        // Initialize ESP-IDF
        esp_idf_sys::link_patches();

        let config = FirmwareConfig::default();

        let Ok(peripherals) = Peripherals::take() else {
            halt();
        };
        let pins = peripherals.pins;

        // Command port: UART0 on the USB-UART bridge pins
        let Ok(mut serial) = UartStream::new(
            peripherals.uart0,
            pins.gpio43,
            pins.gpio44,
            config.baud_rate,
        ) else {
            halt();
        };

        // Log port: UART1 TX-only on GPIO6
        let Ok(mut log_uart) =
            init_uart_logger(peripherals.uart1, pins.gpio6, config.log_baud_rate)
        else {
            halt();
        };
        let mut log_out = UartLogWriter::new(&mut log_uart);

        let mut control: ControlLoop = ControlLoop::new(&config);
        control.log_boot(now_ms(), VERSION);

        let mut last_yield = now_ms();

        loop {
            let now = now_ms();

            // 1. Waveform + command polling + dispatch
            let _ = control.tick(now, &mut serial);

            // 2. Bounded log drain
            drain_log(control.log_mut(), &mut log_out, config.log_drain_budget);

            // 3. Let the idle task run now and then
            if now.wrapping_sub(last_yield) >= YIELD_INTERVAL_MS {
                unsafe {
                    esp_idf_sys::vTaskDelay(1);
                }
                last_yield = now_ms();
            }
        }
    }

    /// Milliseconds since boot, wrapping like a 32-bit tick counter.
    fn now_ms() -> u32 {
        // SAFETY: esp_timer_get_time has no preconditions
        let us = unsafe { esp_idf_sys::esp_timer_get_time() };
        (us / 1000) as u32
    }

    /// Park forever after a failed hardware init.
    fn halt() -> ! {
        loop {
            unsafe {
                esp_idf_sys::vTaskDelay(1000);
            }
        }
    }
}

#[cfg(not(target_os = "espidf"))]
mod host {
    use std::collections::VecDeque;
    use std::io::{self, Read, Write};
    use std::sync::mpsc::{self, Receiver, TryRecvError};
    use std::thread;
    use std::time::{Duration, Instant};

    use rust_wave_generator::{
        config::VERSION, uart_logger::drain_log, ByteStream, ControlLoop, FirmwareConfig,
    };

    /// Host stand-in for the command UART.
    ///
    /// A reader thread plays the role of the RX interrupt: it moves stdin
    /// bytes into a channel, the loop drains the channel without waiting.
    struct StdioStream {
        rx: Receiver<u8>,
        pending: VecDeque<u8>,
        /// Last byte received, to close an unterminated final line
        last: Option<u8>,
        closed: bool,
    }

    impl StdioStream {
        fn spawn() -> Self {
            let (tx, rx) = mpsc::channel();
            thread::spawn(move || {
                for byte in io::stdin().lock().bytes() {
                    let Ok(byte) = byte else { break };
                    if tx.send(byte).is_err() {
                        break;
                    }
                }
            });
            Self::from_channel(rx)
        }

        fn from_channel(rx: Receiver<u8>) -> Self {
            Self {
                rx,
                pending: VecDeque::new(),
                last: None,
                closed: false,
            }
        }

        fn pump(&mut self) {
            loop {
                match self.rx.try_recv() {
                    Ok(byte) => {
                        self.pending.push_back(byte);
                        self.last = Some(byte);
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        // EOF ends the last line like a line feed would
                        if !self.closed && self.last.is_some_and(|b| b != b'\n') {
                            self.pending.push_back(b'\n');
                        }
                        self.closed = true;
                        break;
                    }
                }
            }
        }

        /// Input closed and fully consumed.
        fn finished(&self) -> bool {
            self.closed && self.pending.is_empty()
        }
    }

    impl ByteStream for StdioStream {
        fn available(&mut self) -> usize {
            self.pump();
            self.pending.len()
        }

        fn peek(&mut self) -> Option<u8> {
            self.pending.front().copied()
        }

        fn read(&mut self) -> Option<u8> {
            self.pending.pop_front()
        }

        fn write(&mut self, bytes: &[u8]) -> usize {
            let mut stdout = io::stdout().lock();
            match stdout.write_all(bytes).and_then(|_| stdout.flush()) {
                Ok(()) => bytes.len(),
                Err(_) => 0,
            }
        }
    }

    /// `fmt::Write` over stderr for the log drain.
    struct StderrLog;

    impl std::fmt::Write for StderrLog {
        fn write_str(&mut self, s: &str) -> std::fmt::Result {
            io::stderr().write_all(s.as_bytes()).map_err(|_| std::fmt::Error)
        }
    }

    pub fn run() {
        let config = FirmwareConfig::default();
        let start = Instant::now();
        let now_ms = || start.elapsed().as_millis() as u32;

        let mut serial = StdioStream::spawn();
        let mut log_out = StderrLog;
        let mut control: ControlLoop = ControlLoop::new(&config);
        control.log_boot(now_ms(), VERSION);

        loop {
            let _ = control.tick(now_ms(), &mut serial);
            drain_log(control.log_mut(), &mut log_out, config.log_drain_budget);

            if serial.finished() && !control.receiver().is_terminated() {
                break;
            }

            thread::sleep(Duration::from_micros(250));
        }

        // Flush whatever the last commands logged
        while drain_log(control.log_mut(), &mut log_out, config.log_drain_budget) > 0 {}
    }

}

#[cfg(not(target_os = "espidf"))]
fn main() {
    host::run();
}
