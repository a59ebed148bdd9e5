//! Hardware Abstraction Layer for RustWaveGenerator.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Business logic stays in core modules, HAL is just I/O.

pub mod uart;

pub use uart::UartStream;
