//! Command line parser
//!
//! Simple split on whitespace, max 3 arguments. The numeric helpers never
//! fail: malformed input yields 0 / 0.0 / false, since the only error
//! channel is the same serial line the command came in on.

/// Parsed command with up to 3 arguments
#[derive(Debug, Clone)]
pub struct ParsedCommand<'a> {
    /// The command token (first word)
    pub command: &'a str,
    /// Up to 3 arguments
    pub args: [Option<&'a str>; 3],
}

impl<'a> ParsedCommand<'a> {
    /// Create empty command
    pub const fn empty() -> Self {
        Self {
            command: "",
            args: [None, None, None],
        }
    }

    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }
}

/// Parse a command line into command and arguments
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_whitespace();

    let command = parts.next().unwrap_or("");

    let mut args = [None, None, None];
    for (slot, arg) in args.iter_mut().zip(parts) {
        *slot = Some(arg);
    }

    ParsedCommand { command, args }
}

/// Bytes of `s` from `pos` on, with leading whitespace skipped.
///
/// `None` when `pos` is at or past the end.
fn tail(s: &str, pos: usize) -> Option<&[u8]> {
    let bytes = s.as_bytes();
    if pos >= bytes.len() {
        return None;
    }
    let rest = &bytes[pos..];
    let start = rest
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(rest.len());
    Some(&rest[start..])
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Length of the longest prefix that reads as a decimal float
/// (`[+-]digits[.digits][e[+-]digits]`), 0 if there is none.
fn float_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_digits = count_digits(&bytes[i..]);
    i += int_digits;

    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = count_digits(&bytes[i + 1..]);
        i += 1 + frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = count_digits(&bytes[j..]);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }

    i
}

/// Parse a float from `s` starting at byte `pos`.
///
/// Returns 0.0 when `pos` is past the end or no number is found.
/// Trailing text after the number is ignored.
pub fn parse_float_at(s: &str, pos: usize) -> f32 {
    let Some(bytes) = tail(s, pos) else {
        return 0.0;
    };

    let len = float_prefix_len(bytes);
    if len == 0 {
        return 0.0;
    }

    // Prefix is pure ASCII so from_utf8 cannot fail
    core::str::from_utf8(&bytes[..len])
        .ok()
        .and_then(|num| num.parse::<f32>().ok())
        .unwrap_or(0.0)
}

/// Parse an integer from `s` starting at byte `pos`.
///
/// Returns 0 when `pos` is past the end or no digits are found.
/// Out-of-range values saturate.
pub fn parse_int_at(s: &str, pos: usize) -> i32 {
    let Some(bytes) = tail(s, pos) else {
        return 0;
    };

    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i64 = 0;
    for &d in digits.iter().take_while(|b| b.is_ascii_digit()) {
        value = (value * 10 + i64::from(d - b'0')).min(i64::from(i32::MAX) + 1);
    }

    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Parse a boolean from `s` starting at byte `pos`.
///
/// True when the text starts with `true`, `True` or `TRUE`, otherwise
/// when it reads as a non-zero integer. False past the end.
pub fn parse_bool_at(s: &str, pos: usize) -> bool {
    let Some(bytes) = s.as_bytes().get(pos..).filter(|b| !b.is_empty()) else {
        return false;
    };

    if bytes.starts_with(b"true") || bytes.starts_with(b"True") || bytes.starts_with(b"TRUE") {
        return true;
    }

    parse_int_at(s, pos) != 0
}
