//! Control loop tests: receive, dispatch and reply over an in-memory stream

use rust_wave_generator::config::{FirmwareConfig, IDENTITY};
use rust_wave_generator::console::ConsoleError;
use rust_wave_generator::logging::LogLevel;
use rust_wave_generator::stream::MemoryStream;
use rust_wave_generator::wave::WaveKind;
use rust_wave_generator::ControlLoop;

fn setup() -> (ControlLoop<16>, MemoryStream<256>) {
    (ControlLoop::new(&FirmwareConfig::default()), MemoryStream::new())
}

#[test]
fn test_no_input_dispatches_nothing() {
    let (mut ctl, mut stream) = setup();

    for now in 0..10 {
        assert_eq!(ctl.tick(now, &mut stream), None);
    }
    assert!(stream.output().is_empty());
}

#[test]
fn test_identity_reply() {
    let (mut ctl, mut stream) = setup();
    stream.feed(b"id?\n");

    assert_eq!(ctl.tick(1, &mut stream), Some(Ok(())));
    assert_eq!(stream.output_str(), format!("{}\n", IDENTITY));
}

#[test]
fn test_query_reports_current_sample() {
    let (mut ctl, mut stream) = setup();
    stream.feed(b"sawtooth\r\n");
    assert_eq!(ctl.tick(0, &mut stream), Some(Ok(())));
    assert_eq!(ctl.state().wave.kind(), WaveKind::Sawtooth);

    ctl.state_mut().wave.set_frequency(1.0);
    stream.feed(b"?\n");
    assert_eq!(ctl.tick(750, &mut stream), Some(Ok(())));
    assert_eq!(stream.output_str(), "750\t0.5000\n");
}

#[test]
fn test_waveform_switch_between_queries() {
    let (mut ctl, mut stream) = setup();
    ctl.state_mut().wave.set_frequency(1.0);

    stream.feed(b"square\n?\n");
    assert_eq!(ctl.tick(100, &mut stream), Some(Ok(())));
    // Square selected, sample recomputed on the next elapsed millisecond
    assert_eq!(ctl.tick(600, &mut stream), Some(Ok(())));
    assert_eq!(stream.output_str(), "600\t1.0000\n");
}

#[test]
fn test_one_command_per_tick() {
    let (mut ctl, mut stream) = setup();
    stream.feed(b"id?\nid?\n");

    assert_eq!(ctl.tick(1, &mut stream), Some(Ok(())));
    assert_eq!(stream.pending(), 4);
    assert_eq!(ctl.tick(2, &mut stream), Some(Ok(())));
    assert_eq!(ctl.tick(3, &mut stream), None);

    let expected = format!("{0}\n{0}\n", IDENTITY);
    assert_eq!(stream.output_str(), expected);
}

#[test]
fn test_unknown_command_is_silent() {
    let (mut ctl, mut stream) = setup();
    stream.feed(b"triangle\n");

    assert_eq!(ctl.tick(1, &mut stream), Some(Err(ConsoleError::UnknownCommand)));
    assert!(stream.output().is_empty());
    assert_eq!(ctl.state().wave.kind(), WaveKind::Sine);
}

#[test]
fn test_non_literal_lines_get_no_reply() {
    let (mut ctl, mut stream) = setup();
    ctl.state_mut().wave.set_kind(WaveKind::Square);
    stream.feed(b"sine x\n sine\nsawtooth now\n sawtooth\nid? x\n");

    for now in 1..=5 {
        assert_eq!(ctl.tick(now, &mut stream), Some(Err(ConsoleError::UnknownCommand)));
    }
    assert!(stream.output().is_empty());
    assert_eq!(ctl.state().wave.kind(), WaveKind::Square);

    // Exact line still works afterwards
    stream.feed(b"sine\n");
    assert_eq!(ctl.tick(6, &mut stream), Some(Ok(())));
    assert_eq!(ctl.state().wave.kind(), WaveKind::Sine);
}

#[test]
fn test_command_split_across_ticks() {
    let (mut ctl, mut stream) = setup();

    stream.feed(b"squ");
    assert_eq!(ctl.tick(1, &mut stream), None);
    stream.feed(b"are");
    assert_eq!(ctl.tick(2, &mut stream), None);
    stream.feed(b"\n");
    assert_eq!(ctl.tick(3, &mut stream), Some(Ok(())));

    assert_eq!(ctl.state().wave.kind(), WaveKind::Square);
}

#[test]
fn test_overflow_is_logged_and_remainder_dispatched() {
    let (mut ctl, mut stream) = setup();
    // 15 bytes fit a 16-byte buffer, the rest becomes the next command
    stream.feed(b"0123456789abcdefgh\n");

    assert_eq!(ctl.tick(1, &mut stream), Some(Err(ConsoleError::UnknownCommand)));
    assert_eq!(ctl.receiver().overflow_count(), 1);

    let entry = ctl.log_mut().drain().expect("truncation warning");
    assert_eq!(entry.level, LogLevel::Warn);
    assert_eq!(entry.timestamp_ms, 1);
    let msg = core::str::from_utf8(entry.message()).unwrap();
    assert!(msg.contains("15 bytes"), "got '{}'", msg);

    assert_eq!(stream.pending(), 4);
    assert_eq!(ctl.tick(2, &mut stream), Some(Err(ConsoleError::UnknownCommand)));
    assert_eq!(stream.pending(), 0);
}

#[test]
fn test_errors_logged_at_debug() {
    let mut config = FirmwareConfig::default();
    config.log_level = LogLevel::Trace;
    let mut ctl: ControlLoop<16> = ControlLoop::new(&config);
    let mut stream = MemoryStream::<64>::new();

    stream.feed(b"bogus\nsine\n");
    ctl.tick(5, &mut stream);
    ctl.tick(6, &mut stream);

    let first = ctl.log_mut().drain().unwrap();
    assert_eq!(first.level, LogLevel::Debug);
    assert!(core::str::from_utf8(first.message()).unwrap().contains("E01"));

    let second = ctl.log_mut().drain().unwrap();
    assert_eq!(second.level, LogLevel::Trace);
    assert!(!ctl.log().has_entries());
}

#[test]
fn test_default_level_keeps_log_quiet() {
    let (mut ctl, mut stream) = setup();
    stream.feed(b"bogus\nid?\n");
    ctl.tick(1, &mut stream);
    ctl.tick(2, &mut stream);

    assert!(!ctl.log().has_entries());
}

#[test]
fn test_boot_banner() {
    let (mut ctl, _) = setup();
    ctl.log_boot(0, "WaveGen test");

    let entry = ctl.log_mut().drain().unwrap();
    assert_eq!(entry.level, LogLevel::Info);
    let msg = core::str::from_utf8(entry.message()).unwrap();
    assert!(msg.starts_with("WaveGen test ready: sine"), "got '{}'", msg);
}

#[test]
fn test_reply_overflowing_stream_reports_write_failure() {
    let mut ctl: ControlLoop<16> = ControlLoop::new(&FirmwareConfig::default());
    let mut stream = MemoryStream::<8>::new();
    stream.feed(b"id?\n");

    assert_eq!(ctl.tick(1, &mut stream), Some(Err(ConsoleError::WriteFailed)));
    assert_eq!(stream.output(), &IDENTITY.as_bytes()[..8]);
}
