//! Waveform generator tests

use rust_wave_generator::wave::{sample, WaveGenerator, WaveKind, DEFAULT_FREQ_HZ};

const TOL: f64 = 1e-6;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < TOL
}

#[test]
fn test_sine_key_points() {
    // 1 Hz: quarter period every 250 ms
    assert!(close(sample(WaveKind::Sine, 1.0, 0), 0.0));
    assert!(close(sample(WaveKind::Sine, 1.0, 250), 1.0));
    assert!(close(sample(WaveKind::Sine, 1.0, 500), 0.0));
    assert!(close(sample(WaveKind::Sine, 1.0, 750), -1.0));
    assert!(close(sample(WaveKind::Sine, 1.0, 1000), 0.0));
}

#[test]
fn test_sine_matches_reference() {
    for ms in (0..5000).step_by(37) {
        let expected = (2.0 * std::f64::consts::PI * 0.3 * ms as f64 / 1e3).sin();
        let got = sample(WaveKind::Sine, 0.3, ms);
        assert!(close(got, expected), "t={} got {} expected {}", ms, got, expected);
    }
}

/// Reference computed the direct way: sin(2π·f·t / 1000) in f64.
fn reference_sine(freq_hz: f64, ms: u32) -> f64 {
    (2.0 * std::f64::consts::PI * freq_hz * f64::from(ms) / 1e3).sin()
}

#[test]
fn test_sine_stays_accurate_over_long_uptime() {
    // 1 h, 10 h, 100 h, ~48 days (close to the u32 wrap)
    for base in [3_600_000u32, 36_000_000, 360_000_000, 4_000_000_000] {
        for offset in [0u32, 1, 250, 833, 1234] {
            let ms = base + offset;
            let got = sample(WaveKind::Sine, DEFAULT_FREQ_HZ, ms);
            let expected = reference_sine(DEFAULT_FREQ_HZ, ms);
            assert!(
                (got - expected).abs() < 1e-6,
                "t={} got {} expected {}",
                ms,
                got,
                expected
            );
        }
    }
}

#[test]
fn test_reported_value_after_one_hour() {
    // 0.3 Hz x 3600 s = 1080 whole cycles, back at the zero crossing
    let mut gen = WaveGenerator::default();
    gen.update(3_600_000);
    assert!(gen.value().abs() < 1e-6, "got {}", gen.value());

    // Quarter period of 0.3 Hz later the sine peaks
    let quarter_ms = 3_600_000 + (1000.0 / (4.0 * DEFAULT_FREQ_HZ)) as u32;
    gen.update(quarter_ms);
    assert!(close(gen.value(), reference_sine(DEFAULT_FREQ_HZ, quarter_ms)));
}

#[test]
fn test_square_levels() {
    // Low for the first half period, high for the second
    assert_eq!(sample(WaveKind::Square, 1.0, 0), -1.0);
    assert_eq!(sample(WaveKind::Square, 1.0, 400), -1.0);
    assert_eq!(sample(WaveKind::Square, 1.0, 500), -1.0);
    assert_eq!(sample(WaveKind::Square, 1.0, 501), 1.0);
    assert_eq!(sample(WaveKind::Square, 1.0, 999), 1.0);
    assert_eq!(sample(WaveKind::Square, 1.0, 1000), -1.0);
}

#[test]
fn test_sawtooth_ramp() {
    assert!(close(sample(WaveKind::Sawtooth, 1.0, 0), -1.0));
    assert!(close(sample(WaveKind::Sawtooth, 1.0, 500), 0.0));
    assert!(close(sample(WaveKind::Sawtooth, 1.0, 750), 0.5));
    assert!(close(sample(WaveKind::Sawtooth, 1.0, 1250), -0.5));
}

#[test]
fn test_output_range() {
    for kind in [WaveKind::Sine, WaveKind::Square, WaveKind::Sawtooth] {
        for ms in (0..20_000).step_by(13) {
            let v = sample(kind, 0.77, ms);
            assert!((-1.0..=1.0).contains(&v), "{:?} t={} -> {}", kind, ms, v);
        }
    }
}

#[test]
fn test_zero_frequency_is_constant() {
    for ms in [0, 1, 1000, u32::MAX] {
        assert!(close(sample(WaveKind::Sine, 0.0, ms), 0.0));
        assert_eq!(sample(WaveKind::Sawtooth, 0.0, ms), -1.0);
    }
}

#[test]
fn test_late_clock_values() {
    // Near the u32 wrap the phase is still in range
    let v = sample(WaveKind::Sawtooth, 1.0, u32::MAX);
    assert!(close(v, 2.0 * 0.295 - 1.0), "got {}", v);
}

#[test]
fn test_generator_defaults() {
    let gen = WaveGenerator::default();
    assert_eq!(gen.kind(), WaveKind::Sine);
    assert_eq!(gen.freq_hz(), DEFAULT_FREQ_HZ);
    assert_eq!(gen.value(), 0.0);
    assert_eq!(gen.now_ms(), 0);
}

#[test]
fn test_generator_recomputes_once_per_ms() {
    let mut gen = WaveGenerator::new(WaveKind::Sawtooth, 1.0);

    // Same millisecond as construction: nothing to do
    assert!(!gen.update(0));

    assert!(gen.update(100));
    assert!(close(gen.value(), -0.8));

    assert!(!gen.update(100));
    assert!(gen.update(101));
}

#[test]
fn test_generator_kind_change_applies_on_next_update() {
    let mut gen = WaveGenerator::new(WaveKind::Sawtooth, 1.0);
    gen.update(750);
    assert!(close(gen.value(), 0.5));

    gen.set_kind(WaveKind::Square);
    assert!(close(gen.value(), 0.5));

    gen.update(751);
    assert_eq!(gen.value(), 1.0);
}

#[test]
fn test_generator_clock_wraps() {
    let mut gen = WaveGenerator::new(WaveKind::Sine, 1.0);
    assert!(gen.update(u32::MAX));
    assert!(gen.update(0), "Wrapped clock still counts as elapsed");
    assert_eq!(gen.now_ms(), 0);
}

#[test]
fn test_kind_tokens() {
    assert_eq!(WaveKind::Sine.as_str(), "sine");
    assert_eq!(WaveKind::Square.as_str(), "square");
    assert_eq!(WaveKind::Sawtooth.as_str(), "sawtooth");
}
