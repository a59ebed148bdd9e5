//! Waveform generation
//!
//! Architecture:
//! - `trig`: series sine in f64, no math library needed on no_std
//! - `sample()`: pure function of kind, frequency and elapsed time
//! - `WaveGenerator`: explicit context owned by the control loop,
//!   recomputed once per elapsed millisecond

pub mod generator;
pub mod trig;

pub use generator::{sample, WaveGenerator, WaveKind, DEFAULT_FREQ_HZ};
