//! Line command receiver
//!
//! Assembles bytes from a [`ByteStream`] into newline-delimited ASCII
//! commands. Non-blocking: each poll only drains bytes already buffered
//! by the transport.
//!
//! - `\r` is dropped, `\n` completes the command
//! - A full buffer force-terminates the command (marked truncated); the
//!   byte that did not fit stays in the stream for the next command
//! - Zero heap allocation, capacity fixed by `N`

use crate::stream::ByteStream;

const CR: u8 = b'\r';
const LF: u8 = b'\n';

/// Terminator written after a completed command.
pub const TERMINATOR: u8 = 0;

/// A completed command, borrowed from the receiver buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command<'a> {
    bytes: &'a [u8],
    truncated: bool,
}

impl<'a> Command<'a> {
    /// The "nothing received" command.
    pub const EMPTY: Self = Command {
        bytes: &[],
        truncated: false,
    };

    /// Raw command bytes (terminator excluded).
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Command as text, empty if not valid UTF-8.
    pub fn as_str(&self) -> &'a str {
        core::str::from_utf8(self.bytes).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True if the buffer filled up before a line feed arrived.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// Receiver for newline-terminated ASCII commands.
///
/// `N` is the buffer size including the terminator, so the longest command
/// is `N - 1` bytes.
pub struct LineCommandReceiver<const N: usize> {
    buf: [u8; N],
    /// Number of command bytes held (never more than N - 1)
    cursor: usize,
    /// Complete command waiting for `retrieve()`
    terminated: bool,
    /// Current command was force-terminated
    truncated: bool,
    /// Force-terminations since construction
    overflows: u32,
}

impl<const N: usize> LineCommandReceiver<N> {
    /// Create an empty receiver.
    pub const fn new() -> Self {
        const { assert!(N >= 2 && N <= 65536, "Command buffer must hold 2..=65536 bytes") };

        Self {
            buf: [TERMINATOR; N],
            cursor: 0,
            terminated: false,
            truncated: false,
            overflows: 0,
        }
    }

    /// Poll the stream for incoming bytes.
    ///
    /// Returns true when a complete command is ready for [`retrieve`](Self::retrieve).
    /// Stops at the first completed command; later bytes stay in the stream.
    pub fn poll<S: ByteStream + ?Sized>(&mut self, stream: &mut S) -> bool {
        if self.terminated {
            return true;
        }

        while stream.available() > 0 {
            let Some(byte) = stream.peek() else {
                break;
            };

            match byte {
                CR => {
                    stream.read();
                }
                LF => {
                    stream.read();
                    self.terminate();
                    break;
                }
                _ if self.cursor < N - 1 => {
                    stream.read();
                    self.buf[self.cursor] = byte;
                    self.cursor += 1;
                }
                _ => {
                    // Full: leave the byte in the stream
                    self.truncated = true;
                    self.overflows = self.overflows.wrapping_add(1);
                    self.terminate();
                    break;
                }
            }
        }

        self.terminated
    }

    #[inline]
    fn terminate(&mut self) {
        self.buf[self.cursor] = TERMINATOR;
        self.terminated = true;
    }

    /// Take the completed command and rearm for the next one.
    ///
    /// Returns [`Command::EMPTY`] without touching any state if no command
    /// is complete.
    pub fn retrieve(&mut self) -> Command<'_> {
        if !self.terminated {
            return Command::EMPTY;
        }

        let len = self.cursor;
        let truncated = self.truncated;
        self.terminated = false;
        self.truncated = false;
        self.cursor = 0;

        Command {
            bytes: &self.buf[..len],
            truncated,
        }
    }

    /// Empty the receiver and zero the buffer.
    pub fn reset(&mut self) {
        self.buf = [TERMINATOR; N];
        self.cursor = 0;
        self.terminated = false;
        self.truncated = false;
    }

    /// Is a complete command waiting?
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Bytes currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Longest command that fits (buffer size minus terminator).
    #[inline]
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Bytes received so far for the current command.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    /// Whole buffer including the terminator slot.
    pub fn raw_buffer(&self) -> &[u8; N] {
        &self.buf
    }

    /// Number of force-terminated commands since construction.
    #[inline]
    pub fn overflow_count(&self) -> u32 {
        self.overflows
    }
}

impl<const N: usize> Default for LineCommandReceiver<N> {
    fn default() -> Self {
        Self::new()
    }
}
