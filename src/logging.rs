//! RT-safe logging for RustWaveGenerator.
//!
//! # Architecture
//!
//! ```text
//! Control loop            LogQueue              Log UART
//! ────────────            ────────              ────────
//!
//! rt_info!() ──────────▶ [L0][L1][L2] ──────▶ drain_log()
//! format on stack         fixed capacity        bounded per tick
//! never blocks            drop when full
//! ```
//!
//! # Rules
//!
//! - The control loop never calls blocking log functions
//! - println!/ESP_LOGx are not used in the loop, only the rt_* macros
//! - Messages are dropped (and counted) when the queue is full
//! - Filtered levels cost one comparison, no formatting

use heapless::Deque;

use crate::config::LOG_QUEUE_LEN;

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 96;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Timestamp in milliseconds since boot.
    pub timestamp_ms: u32,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    /// Build an entry, truncating `msg` to [`MAX_MSG_LEN`].
    pub fn new(timestamp_ms: u32, level: LogLevel, msg: &[u8]) -> Self {
        let len = msg.len().min(MAX_MSG_LEN);
        let mut buf = [0u8; MAX_MSG_LEN];
        buf[..len].copy_from_slice(&msg[..len]);
        Self {
            timestamp_ms,
            level,
            len: len as u8,
            msg: buf,
        }
    }

    /// Message bytes.
    pub fn message(&self) -> &[u8] {
        &self.msg[..self.len as usize]
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::new(0, LogLevel::Info, &[])
    }
}

/// Bounded log queue, owned by the control loop.
///
/// - Push never blocks (drops message if full)
/// - Drain happens at the end of each loop iteration, a few entries at a time
pub struct LogQueue<const N: usize = LOG_QUEUE_LEN> {
    entries: Deque<LogEntry, N>,
    level: LogLevel,
    dropped: u32,
}

impl<const N: usize> LogQueue<N> {
    /// Create a new empty queue keeping messages up to `level`.
    pub const fn new(level: LogLevel) -> Self {
        Self {
            entries: Deque::new(),
            level,
            dropped: 0,
        }
    }

    /// Would a message at `level` be kept?
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.level
    }

    /// Most verbose level kept.
    #[inline]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    #[inline]
    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    /// Push a log entry (RT-safe, never blocks).
    ///
    /// Returns `true` if message was queued, `false` if filtered or dropped.
    #[inline]
    pub fn push(&mut self, timestamp_ms: u32, level: LogLevel, msg: &[u8]) -> bool {
        if !self.enabled(level) {
            return false;
        }

        if self
            .entries
            .push_back(LogEntry::new(timestamp_ms, level, msg))
            .is_err()
        {
            self.dropped = self.dropped.wrapping_add(1);
            return false;
        }

        true
    }

    /// Drain next log entry.
    ///
    /// Returns `None` if no entries available.
    #[inline]
    pub fn drain(&mut self) -> Option<LogEntry> {
        self.entries.pop_front()
    }

    /// Get count of dropped messages.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Reset dropped counter (e.g., after reporting).
    #[inline]
    pub fn reset_dropped(&mut self) {
        self.dropped = 0;
    }

    /// Check if there are entries to drain.
    #[inline]
    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Get number of entries waiting to be drained.
    #[inline]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}

impl<const N: usize> Default for LogQueue<N> {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

/// `fmt::Write` over a byte slice that silently truncates.
pub struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }
}

impl core::fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let to_write = bytes.len().min(self.buf.len() - self.pos);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Format a message into a buffer.
///
/// Returns the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    let mut writer = SliceWriter::new(buf);
    let _ = core::fmt::write(&mut writer, args);
    writer.len()
}

/// RT-safe log macro.
///
/// Use this in the control loop instead of println!, ESP_LOGx, etc.
///
/// # Example
///
/// ```ignore
/// rt_log!(LogLevel::Info, self.log, now_ms, "wave {}", kind.as_str());
/// ```
#[macro_export]
macro_rules! rt_log {
    ($level:expr, $log:expr, $timestamp:expr, $($arg:tt)*) => {{
        let level = $level;
        if $log.enabled(level) {
            let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
            let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
            $log.push($timestamp, level, &buf[..len]);
        }
    }};
}

/// RT-safe info log.
#[macro_export]
macro_rules! rt_info {
    ($log:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Info, $log, $timestamp, $($arg)*)
    };
}

/// RT-safe warning log.
#[macro_export]
macro_rules! rt_warn {
    ($log:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Warn, $log, $timestamp, $($arg)*)
    };
}

/// RT-safe error log.
#[macro_export]
macro_rules! rt_error {
    ($log:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Error, $log, $timestamp, $($arg)*)
    };
}

/// RT-safe debug log.
#[macro_export]
macro_rules! rt_debug {
    ($log:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Debug, $log, $timestamp, $($arg)*)
    };
}

/// RT-safe trace log (maximum verbosity).
#[macro_export]
macro_rules! rt_trace {
    ($log:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Trace, $log, $timestamp, $($arg)*)
    };
}
