//! Waveform sample generator
//!
//! Output is always in [-1.0, 1.0]. Phase is derived from the millisecond
//! clock, so the waveform survives missed updates without drifting.
//! Frequency, phase and sample are all f64.

use super::trig::sin_turns;

/// Default waveform frequency in Hz
pub const DEFAULT_FREQ_HZ: f64 = 0.3;

/// Waveform shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveKind {
    #[default]
    Sine,
    Square,
    Sawtooth,
}

impl WaveKind {
    /// Command token selecting this waveform.
    pub fn as_str(self) -> &'static str {
        match self {
            WaveKind::Sine => "sine",
            WaveKind::Square => "square",
            WaveKind::Sawtooth => "sawtooth",
        }
    }
}

/// Fractional part of `freq_hz * elapsed_ms / 1000`, in [0, 1).
#[inline]
fn phase(freq_hz: f64, elapsed_ms: u32) -> f64 {
    let cycles = freq_hz * f64::from(elapsed_ms) / 1e3;
    let mut frac = cycles - (cycles as i64) as f64;
    if frac < 0.0 {
        frac += 1.0;
    }
    // Rounding can land exactly on 1.0
    if frac >= 1.0 {
        frac = 0.0;
    }
    frac
}

/// Compute one waveform sample.
///
/// # Arguments
/// * `kind` - Waveform shape
/// * `freq_hz` - Frequency in Hz
/// * `elapsed_ms` - Time since boot in milliseconds
pub fn sample(kind: WaveKind, freq_hz: f64, elapsed_ms: u32) -> f64 {
    let p = phase(freq_hz, elapsed_ms);

    match kind {
        WaveKind::Sine => sin_turns(p).clamp(-1.0, 1.0),
        WaveKind::Square => {
            if p > 0.5 {
                1.0
            } else {
                -1.0
            }
        }
        WaveKind::Sawtooth => 2.0 * p - 1.0,
    }
}

/// Waveform generator state
///
/// Owned by the control loop; the dispatcher mutates it through command
/// handlers.
#[derive(Debug, Clone)]
pub struct WaveGenerator {
    kind: WaveKind,
    freq_hz: f64,
    /// Clock value seen by the last `update()`
    now_ms: u32,
    /// Clock value of the last recompute
    last_ms: u32,
    /// Current sample
    value: f64,
}

impl WaveGenerator {
    /// Create a generator. The sample reads 0.0 until the first recompute.
    pub fn new(kind: WaveKind, freq_hz: f64) -> Self {
        Self {
            kind,
            freq_hz,
            now_ms: 0,
            last_ms: 0,
            value: 0.0,
        }
    }

    /// Advance the clock, recomputing the sample once per elapsed millisecond.
    ///
    /// Returns true if the sample was recomputed.
    #[inline]
    pub fn update(&mut self, now_ms: u32) -> bool {
        self.now_ms = now_ms;

        if now_ms.wrapping_sub(self.last_ms) < 1 {
            return false;
        }

        self.value = sample(self.kind, self.freq_hz, now_ms);
        self.last_ms = now_ms;
        true
    }

    #[inline]
    pub fn kind(&self) -> WaveKind {
        self.kind
    }

    /// Select waveform. Takes effect at the next recompute.
    #[inline]
    pub fn set_kind(&mut self, kind: WaveKind) {
        self.kind = kind;
    }

    #[inline]
    pub fn freq_hz(&self) -> f64 {
        self.freq_hz
    }

    #[inline]
    pub fn set_frequency(&mut self, freq_hz: f64) {
        self.freq_hz = freq_hz;
    }

    /// Latest sample value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Clock value passed to the last `update()`.
    #[inline]
    pub fn now_ms(&self) -> u32 {
        self.now_ms
    }
}

impl Default for WaveGenerator {
    fn default() -> Self {
        Self::new(WaveKind::Sine, DEFAULT_FREQ_HZ)
    }
}
