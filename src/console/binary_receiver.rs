//! Binary command receiver
//!
//! Frames are delimited by a caller-supplied end-of-line sentinel instead
//! of a line feed, so payloads may contain any byte value (including 0).
//! The sentinel must not occur inside a payload.

use crate::stream::ByteStream;

/// Longest supported sentinel.
pub const MAX_EOL_LEN: usize = 256;

/// Result of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryPoll {
    /// No complete frame yet
    Pending,
    /// Frame complete, call `retrieve()`
    Complete,
    /// Buffer full before the sentinel; the incoming byte was dropped
    Overflow,
}

impl BinaryPoll {
    /// True for `Complete`.
    #[inline]
    pub fn is_complete(self) -> bool {
        self == BinaryPoll::Complete
    }
}

/// Receiver for sentinel-terminated binary frames.
pub struct BinaryCommandReceiver<'e, const N: usize> {
    buf: [u8; N],
    cursor: usize,
    eol: &'e [u8],
    found_eol: bool,
    overflows: u32,
}

impl<'e, const N: usize> BinaryCommandReceiver<'e, N> {
    /// Create a receiver for frames ending in `eol`.
    ///
    /// # Panics
    ///
    /// Panics if `eol` is empty, longer than [`MAX_EOL_LEN`] or longer than
    /// the buffer.
    pub fn new(eol: &'e [u8]) -> Self {
        const { assert!(N >= 1 && N <= 65536, "Command buffer must hold 1..=65536 bytes") };
        assert!(
            !eol.is_empty() && eol.len() <= MAX_EOL_LEN && eol.len() <= N,
            "EOL sentinel must be 1..=256 bytes and fit the buffer"
        );

        Self {
            buf: [0u8; N],
            cursor: 0,
            eol,
            found_eol: false,
            overflows: 0,
        }
    }

    /// Poll the stream for incoming bytes.
    ///
    /// Reading stops as soon as the sentinel matches so the caller can act
    /// on the frame before more bytes are pulled in.
    pub fn poll<S: ByteStream + ?Sized>(&mut self, stream: &mut S) -> BinaryPoll {
        if self.found_eol {
            return BinaryPoll::Complete;
        }

        while stream.available() > 0 {
            let Some(byte) = stream.read() else {
                break;
            };

            if self.cursor == N {
                self.overflows = self.overflows.wrapping_add(1);
                return BinaryPoll::Overflow;
            }

            self.buf[self.cursor] = byte;
            self.cursor += 1;

            if self.ends_with_eol() {
                self.found_eol = true;
                return BinaryPoll::Complete;
            }
        }

        BinaryPoll::Pending
    }

    #[inline]
    fn ends_with_eol(&self) -> bool {
        self.cursor >= self.eol.len() && self.buf[..self.cursor].ends_with(self.eol)
    }

    /// Take the completed frame payload (sentinel stripped) and rearm.
    ///
    /// The slice length is the payload size. Empty when no frame is
    /// complete; state is left untouched in that case.
    pub fn retrieve(&mut self) -> &[u8] {
        if !self.found_eol {
            return &[];
        }

        let len = self.cursor - self.eol.len();
        self.found_eol = false;
        self.cursor = 0;
        &self.buf[..len]
    }

    /// Empty the receiver and zero the buffer.
    pub fn reset(&mut self) {
        self.buf = [0u8; N];
        self.cursor = 0;
        self.found_eol = false;
    }

    /// Is a complete frame waiting?
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.found_eol
    }

    /// Bytes received so far, sentinel included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// The end-of-line sentinel.
    pub fn eol(&self) -> &[u8] {
        self.eol
    }

    /// Number of dropped bytes since construction.
    #[inline]
    pub fn overflow_count(&self) -> u32 {
        self.overflows
    }
}
