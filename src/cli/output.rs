//! Handles all user-facing output for the CLI.
//!
//! Centralizing the printing here keeps coloring and error rendering
//! consistent across commands. Colors are applied only when the stream is a
//! terminal.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::value::Value;

fn choice(stream: atty::Stream) -> ColorChoice {
    if atty::is(stream) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Prints a parsed value to stdout.
pub fn print_value(value: &Value) {
    let mut stdout = StandardStream::stdout(choice(atty::Stream::Stdout));
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
    let _ = writeln!(stdout, "{}", value);
    let _ = stdout.reset();
}

/// Prints an error report to stderr with full miette diagnostics.
pub fn print_error(report: &miette::Report) {
    let mut stderr = StandardStream::stderr(choice(atty::Stream::Stderr));
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = writeln!(stderr, "error");
    let _ = stderr.reset();
    eprintln!("{:?}", report);
}
