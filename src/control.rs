//! Control loop: waveform update, command polling, dispatch.
//!
//! One call to [`ControlLoop::tick`] is one loop iteration. Nothing in it
//! blocks, so the waveform keeps being recomputed every millisecond no
//! matter what arrives on the serial line.

use crate::config::{FirmwareConfig, CMD_BUF_LEN};
use crate::console::{execute, ConsoleError, LineCommandReceiver};
use crate::logging::LogQueue;
use crate::stream::{ByteStream, StreamWriter};
use crate::wave::WaveGenerator;
use crate::{rt_debug, rt_info, rt_trace, rt_warn};

/// State the command handlers act on.
#[derive(Debug, Clone)]
pub struct DeviceState {
    pub wave: WaveGenerator,
    /// Reply to `id?`
    pub identity: &'static str,
}

impl DeviceState {
    pub fn new(config: &FirmwareConfig) -> Self {
        Self {
            wave: WaveGenerator::new(config.wave_kind, config.wave_freq_hz),
            identity: config.identity,
        }
    }
}

/// Top-level firmware state, owned by `main`.
pub struct ControlLoop<const N: usize = CMD_BUF_LEN> {
    state: DeviceState,
    receiver: LineCommandReceiver<N>,
    log: LogQueue,
}

impl<const N: usize> ControlLoop<N> {
    pub fn new(config: &FirmwareConfig) -> Self {
        Self {
            state: DeviceState::new(config),
            receiver: LineCommandReceiver::new(),
            log: LogQueue::new(config.log_level),
        }
    }

    /// Run one loop iteration.
    ///
    /// Returns `Some(result)` if a command was dispatched, `None` if no
    /// complete command was available.
    pub fn tick<S: ByteStream + ?Sized>(
        &mut self,
        now_ms: u32,
        stream: &mut S,
    ) -> Option<Result<(), ConsoleError>> {
        self.state.wave.update(now_ms);

        if !self.receiver.poll(stream) {
            return None;
        }

        let overflows = self.receiver.overflow_count();
        let command = self.receiver.retrieve();

        if command.is_truncated() {
            rt_warn!(
                self.log,
                now_ms,
                "command truncated to {} bytes (overflow #{})",
                command.len(),
                overflows
            );
        }

        let line = command.as_str();
        let mut out = StreamWriter::new(stream);
        let result = execute(line, &mut self.state, &mut out);

        match result {
            Ok(()) => rt_trace!(self.log, now_ms, "cmd '{}' ok", line),
            Err(e) => rt_debug!(self.log, now_ms, "cmd '{}' ignored: {}", line, e),
        }

        Some(result)
    }

    /// Log the boot banner.
    pub fn log_boot(&mut self, now_ms: u32, version: &str) {
        rt_info!(
            self.log,
            now_ms,
            "{} ready: {} @ {} Hz, cmd buffer {} bytes",
            version,
            self.state.wave.kind().as_str(),
            self.state.wave.freq_hz(),
            N
        );
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DeviceState {
        &mut self.state
    }

    pub fn receiver(&self) -> &LineCommandReceiver<N> {
        &self.receiver
    }

    pub fn log(&self) -> &LogQueue {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut LogQueue {
        &mut self.log
    }
}
