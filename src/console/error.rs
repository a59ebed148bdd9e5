//! Console error types

/// Dispatch error with code and message
///
/// Never sent back over the serial line: the control loop logs it and
/// carries on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Unknown command
    UnknownCommand,
    /// E02: Missing required argument
    MissingArg,
    /// E03: Value out of allowed range
    OutOfRange,
    /// E04: Reply could not be written to the stream
    WriteFailed,
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "E01",
            Self::MissingArg => "E02",
            Self::OutOfRange => "E03",
            Self::WriteFailed => "E04",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::UnknownCommand => "unknown command",
            Self::MissingArg => "missing argument",
            Self::OutOfRange => "out of range",
            Self::WriteFailed => "reply not sent",
        }
    }
}

impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl From<core::fmt::Error> for ConsoleError {
    fn from(_: core::fmt::Error) -> Self {
        ConsoleError::WriteFailed
    }
}
