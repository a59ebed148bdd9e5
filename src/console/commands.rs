//! Command handlers
//!
//! Lookup table from command line to handler. Commands match the whole
//! line literally; only entries flagged `takes_args` accept arguments,
//! separated from the name by a space. Setters reply nothing, queries
//! reply one line.

use core::fmt::Write;

use super::parser::{parse_float_at, parse_line, ParsedCommand};
use super::ConsoleError;
use crate::control::DeviceState;
use crate::wave::WaveKind;

/// Command handler signature
pub type CommandHandler =
    fn(&ParsedCommand<'_>, &mut DeviceState, &mut dyn Write) -> Result<(), ConsoleError>;

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    pub brief: &'static str,
    /// Accepts `name <args>`; otherwise the line must equal `name`
    pub takes_args: bool,
    pub handler: CommandHandler,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "id?",
        brief: "Identify device",
        takes_args: false,
        handler: cmd_id,
    },
    CommandDescriptor {
        name: "sine",
        brief: "Select sine wave",
        takes_args: false,
        handler: cmd_sine,
    },
    CommandDescriptor {
        name: "square",
        brief: "Select square wave",
        takes_args: false,
        handler: cmd_square,
    },
    CommandDescriptor {
        name: "sawtooth",
        brief: "Select sawtooth wave",
        takes_args: false,
        handler: cmd_sawtooth,
    },
    CommandDescriptor {
        name: "?",
        brief: "Query time and sample",
        takes_args: false,
        handler: cmd_query,
    },
    CommandDescriptor {
        name: "freq",
        brief: "Set frequency [Hz]",
        takes_args: true,
        handler: cmd_freq,
    },
];

/// Look up a command by name
pub fn find_command(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Find the command a received line selects.
///
/// No trimming: `" sine"` and `"sine x"` select nothing.
pub fn match_line(line: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| {
        if line == c.name {
            return true;
        }
        c.takes_args
            && line
                .strip_prefix(c.name)
                .is_some_and(|rest| rest.starts_with(' '))
    })
}

/// Execute a received command line
pub fn execute(
    line: &str,
    state: &mut DeviceState,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if line.is_empty() {
        return Ok(()); // Empty line, do nothing
    }

    let descriptor = match_line(line).ok_or(ConsoleError::UnknownCommand)?;

    (descriptor.handler)(&parse_line(line), state, out)
}

/// Get all command names
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

// --- Command Implementations ---

fn cmd_id(
    _cmd: &ParsedCommand<'_>,
    state: &mut DeviceState,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    writeln!(out, "{}", state.identity)?;
    Ok(())
}

fn select(state: &mut DeviceState, kind: WaveKind) -> Result<(), ConsoleError> {
    state.wave.set_kind(kind);
    Ok(())
}

fn cmd_sine(
    _cmd: &ParsedCommand<'_>,
    state: &mut DeviceState,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    select(state, WaveKind::Sine)
}

fn cmd_square(
    _cmd: &ParsedCommand<'_>,
    state: &mut DeviceState,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    select(state, WaveKind::Square)
}

fn cmd_sawtooth(
    _cmd: &ParsedCommand<'_>,
    state: &mut DeviceState,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    select(state, WaveKind::Sawtooth)
}

fn cmd_query(
    _cmd: &ParsedCommand<'_>,
    state: &mut DeviceState,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    writeln!(out, "{}\t{:.4}", state.wave.now_ms(), state.wave.value())?;
    Ok(())
}

fn cmd_freq(
    cmd: &ParsedCommand<'_>,
    state: &mut DeviceState,
    _out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let arg = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;
    let freq_hz = parse_float_at(arg, 0);

    if !freq_hz.is_finite() || freq_hz < 0.0 {
        return Err(ConsoleError::OutOfRange);
    }

    state.wave.set_frequency(f64::from(freq_hz));
    Ok(())
}
