//! Byte-stream abstraction shared by the command receivers and the dispatcher.
//!
//! # Architecture
//!
//! ```text
//! UART / stdin ──▶ ByteStream ──▶ LineCommandReceiver::poll()
//!                      ▲
//!   dispatcher ────────┘ write() (replies via StreamWriter)
//! ```
//!
//! # Rules
//!
//! - No method may block: `available()` reports what is already buffered
//!   at the transport layer, `peek()`/`read()` return `None` when empty.
//! - Receivers only use `available`/`peek`/`read`. Replies go through
//!   `write`.

use heapless::{Deque, Vec};

/// Non-blocking byte stream (serial port, loopback, host stdin/stdout).
pub trait ByteStream {
    /// Number of bytes that can be read right now without waiting.
    fn available(&mut self) -> usize;

    /// Next byte without consuming it.
    fn peek(&mut self) -> Option<u8>;

    /// Consume and return the next byte.
    fn read(&mut self) -> Option<u8>;

    /// Write bytes, returns how many were accepted.
    fn write(&mut self, bytes: &[u8]) -> usize;
}

impl<S: ByteStream + ?Sized> ByteStream for &mut S {
    #[inline]
    fn available(&mut self) -> usize {
        (**self).available()
    }

    #[inline]
    fn peek(&mut self) -> Option<u8> {
        (**self).peek()
    }

    #[inline]
    fn read(&mut self) -> Option<u8> {
        (**self).read()
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) -> usize {
        (**self).write(bytes)
    }
}

/// `core::fmt::Write` adapter over a [`ByteStream`], used for replies.
///
/// A short write (transport refused part of the text) is reported as
/// `fmt::Error`.
pub struct StreamWriter<'a, S: ?Sized> {
    stream: &'a mut S,
}

impl<'a, S: ByteStream + ?Sized> StreamWriter<'a, S> {
    pub fn new(stream: &'a mut S) -> Self {
        Self { stream }
    }
}

impl<S: ByteStream + ?Sized> core::fmt::Write for StreamWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        if self.stream.write(bytes) == bytes.len() {
            Ok(())
        } else {
            Err(core::fmt::Error)
        }
    }
}

/// In-memory byte stream with fixed capacity.
///
/// Input is queued with [`feed`](Self::feed) and drained by the receiver,
/// written bytes accumulate in an output buffer. Used as the loopback
/// transport in tests and by the host simulator.
pub struct MemoryStream<const N: usize> {
    rx: Deque<u8, N>,
    tx: Vec<u8, N>,
}

impl<const N: usize> MemoryStream<N> {
    /// Create an empty stream.
    pub const fn new() -> Self {
        Self {
            rx: Deque::new(),
            tx: Vec::new(),
        }
    }

    /// Queue incoming bytes. Returns how many fit.
    pub fn feed(&mut self, bytes: &[u8]) -> usize {
        let mut queued = 0;
        for &b in bytes {
            if self.rx.push_back(b).is_err() {
                break;
            }
            queued += 1;
        }
        queued
    }

    /// Bytes written so far.
    pub fn output(&self) -> &[u8] {
        &self.tx
    }

    /// Written bytes as text (empty if not UTF-8).
    pub fn output_str(&self) -> &str {
        core::str::from_utf8(&self.tx).unwrap_or("")
    }

    /// Discard written bytes.
    pub fn clear_output(&mut self) {
        self.tx.clear();
    }

    /// Incoming bytes not consumed yet.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl<const N: usize> Default for MemoryStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ByteStream for MemoryStream<N> {
    #[inline]
    fn available(&mut self) -> usize {
        self.rx.len()
    }

    #[inline]
    fn peek(&mut self) -> Option<u8> {
        self.rx.front().copied()
    }

    #[inline]
    fn read(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn write(&mut self, bytes: &[u8]) -> usize {
        let room = N - self.tx.len();
        let n = bytes.len().min(room);
        // Cannot fail: n is bounded by the remaining capacity
        let _ = self.tx.extend_from_slice(&bytes[..n]);
        n
    }
}
