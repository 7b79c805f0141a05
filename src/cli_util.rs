use std::io::{self, Write};

use nu_ansi_term::Color;

use crate::engine::ExecError;

/// Print a one-line error, prefixed with the program name when given.
pub fn print_error(program: Option<&str>, message: &str, color: bool) {
    eprintln!("{}", error_line(program, message, color));
    let _ = io::stderr().flush();
}

/// Print an execution error with its instruction index and a caret context
/// window pointing at the failing byte.
pub fn print_exec_error(program: Option<&str>, code: &[u8], err: &ExecError, color: bool) {
    let ip = err.ip();
    let msg = format!("{err} at instruction {ip}");
    eprintln!("{}", error_line(program, &msg, color));
    for line in context_lines(code, ip) {
        eprintln!("{line}");
    }
    let _ = io::stderr().flush();
}

fn error_line(program: Option<&str>, message: &str, color: bool) -> String {
    let tag = if color {
        Color::Red.bold().paint("error").to_string()
    } else {
        "error".to_string()
    };
    match program {
        Some(p) => format!("{p}: {tag}: {message}"),
        None => format!("{tag}: {message}"),
    }
}

/// Show a short window of source around `pos` and a caret under it.
///
/// The source is arbitrary bytes, so anything that is not printable ASCII is
/// drawn as a space to keep the caret aligned.
pub fn context_lines(code: &[u8], pos: usize) -> [String; 2] {
    const WINDOW: usize = 32;

    let start = pos.saturating_sub(WINDOW);
    let end = (pos + WINDOW + 1).min(code.len());
    let slice: String = code
        .get(start..end)
        .unwrap_or_default()
        .iter()
        .map(|&b| if b.is_ascii_graphic() { b as char } else { ' ' })
        .collect();

    let mut underline = " ".repeat(pos.saturating_sub(start));
    underline.push('^');

    [format!("  {}", slice.trim_end()), format!("  {underline}")]
}
