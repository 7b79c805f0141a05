//! Rendering for the `#` instruction.
//!
//! The tape is split into rows of [`ROW_WIDTH`] cells. A row is printed only
//! when it holds a non-zero cell or the data pointer. Each printed row looks
//! like
//!
//! ```text
//! 0000   (  1)  2   0   0   0   0   0   0      0   0   0   0   0   0   0   0
//! ```
//!
//! followed by an empty line: a four digit hex offset, then sixteen
//! three-wide decimal cells split into two halves. The cell under the pointer
//! is wrapped in parentheses, which take the place of the separators on
//! either side of it.

use std::io::{self, Write};

use crate::tape::Tape;

/// Cells per dump row.
pub const ROW_WIDTH: usize = 16;

/// Write every interesting row of `tape` to `out`.
pub fn write_dump<W: Write>(tape: &Tape, out: &mut W) -> io::Result<()> {
    let pointer = tape.pointer();
    for (row, cells) in tape.cells().chunks(ROW_WIDTH).enumerate() {
        let base = row * ROW_WIDTH;
        let holds_pointer = (base..base + cells.len()).contains(&pointer);
        if holds_pointer || cells.iter().any(|&c| c != 0) {
            writeln!(out, "{}", format_row(base, cells, pointer))?;
            writeln!(out)?;
        }
    }
    out.flush()
}

/// Format one row. `pointer` is absolute; it only affects the output when it
/// falls inside `base..base + cells.len()`.
pub fn format_row(base: usize, cells: &[u8], pointer: usize) -> String {
    let mut line = format!("{base:04x}   ");
    for (i, value) in cells.iter().enumerate() {
        let index = base + i;
        if i == 0 {
            line.push(opening(index, pointer));
        } else if i == ROW_WIDTH / 2 {
            line.push(closing(index - 1, pointer));
            line.push_str("  ");
            line.push(opening(index, pointer));
        } else {
            line.push(separator(index, pointer));
        }
        line.push_str(&format!("{value:3}"));
    }
    if let Some(last) = (base + cells.len()).checked_sub(1) {
        line.push(closing(last, pointer));
    }
    line
}

/// The character between cell `index - 1` and cell `index`.
fn separator(index: usize, pointer: usize) -> char {
    if index == pointer {
        '('
    } else if index - 1 == pointer {
        ')'
    } else {
        ' '
    }
}

fn opening(index: usize, pointer: usize) -> char {
    if index == pointer { '(' } else { ' ' }
}

fn closing(index: usize, pointer: usize) -> char {
    if index == pointer { ')' } else { ' ' }
}
