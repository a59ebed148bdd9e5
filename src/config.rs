//! Module: config
//!
//! Purpose: Firmware configuration for RustWaveGenerator.
//!
//! Architecture:
//! - Compile-time sizes (buffers, queues) as constants
//! - Runtime defaults in `FirmwareConfig`, read once at boot
//! - Nothing persisted: every boot starts from `FirmwareConfig::default()`

use crate::logging::LogLevel;
use crate::wave::{WaveKind, DEFAULT_FREQ_HZ};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Command buffer size including the terminator.
pub const CMD_BUF_LEN: usize = 16;

/// Log queue depth (entries).
pub const LOG_QUEUE_LEN: usize = 32;

/// Reply to `id?`
pub const IDENTITY: &str = "Arduino, Wave generator";

/// Boot-time configuration.
#[derive(Debug, Clone)]
pub struct FirmwareConfig {
    /// Command port baud rate (ignored on native USB)
    pub baud_rate: u32,
    /// Log UART baud rate
    pub log_baud_rate: u32,
    /// Waveform selected at boot
    pub wave_kind: WaveKind,
    /// Waveform frequency at boot [Hz]
    pub wave_freq_hz: f64,
    /// Reply to `id?`
    pub identity: &'static str,
    /// Most verbose level kept in the log queue
    pub log_level: LogLevel,
    /// Log entries written out per loop iteration
    pub log_drain_budget: usize,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            log_baud_rate: 115_200,
            wave_kind: WaveKind::Sine,
            wave_freq_hz: DEFAULT_FREQ_HZ,
            identity: IDENTITY,
            log_level: LogLevel::Info,
            log_drain_budget: 4,
        }
    }
}
