//! # RustWaveGenerator
//!
//! Waveform generator firmware commanded over a serial line.
//!
//! ## Architecture
//!
//! A single cooperative loop ([`ControlLoop`]) does everything:
//! - recomputes the waveform sample once per elapsed millisecond
//! - polls the [`LineCommandReceiver`] for a complete command
//! - dispatches the command through the [`console::COMMANDS`] table
//!
//! Nothing blocks and nothing allocates after construction. All state is
//! owned by the loop, no global mutable state.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod control;
pub mod logging;
pub mod stream;
pub mod uart_logger;
pub mod wave;

#[cfg(target_os = "espidf")]
pub mod hal;

pub use config::FirmwareConfig;
pub use console::{BinaryCommandReceiver, BinaryPoll, Command, ConsoleError, LineCommandReceiver};
pub use control::{ControlLoop, DeviceState};
pub use logging::{LogLevel, LogQueue};
pub use stream::{ByteStream, MemoryStream, StreamWriter};
pub use wave::{WaveGenerator, WaveKind};
