//! Serial command console
//!
//! Polled from the control loop - no dedicated task.
//! Zero heap allocation - all fixed buffers.

pub mod binary_receiver;
pub mod commands;
pub mod error;
pub mod line_receiver;
pub mod parser;

pub use binary_receiver::{BinaryCommandReceiver, BinaryPoll};
pub use commands::{command_names, execute, find_command, match_line, COMMANDS};
pub use error::ConsoleError;
pub use line_receiver::{Command, LineCommandReceiver};
pub use parser::{parse_bool_at, parse_float_at, parse_int_at, parse_line, ParsedCommand};
