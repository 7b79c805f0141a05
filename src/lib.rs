//! A direct Brainfuck interpreter with a fixed-size tape.
//!
//! Programs are executed straight from their source bytes: there is no
//! compilation step and no bracket table. The interpreter works on a tape of
//! 65,536 cells with a single data pointer.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0.
//! - Strict pointer bounds: moving left from cell 0 or right past the last
//!   cell is an error.
//! - Cell arithmetic wraps (`255 + 1 == 0`).
//! - Input `,` reads a single byte; on EOF the current cell is set to 0.
//! - Output `.` writes the current cell as a raw byte.
//! - Loops `[]` are matched by scanning the source when a jump is taken, so an
//!   unmatched bracket is only an error if execution needs its partner.
//! - `#` dumps the non-empty rows of the tape to the diagnostic stream.
//! - Every other byte is ignored.
//! - Sources longer than 65,536 bytes are truncated, or rejected with
//!   [`SizePolicy::Reject`].
//!
//! Quick start:
//!
//! ```no_run
//! use tape_bf::{Engine, Program, SizePolicy};
//!
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let program = Program::from_bytes(code, SizePolicy::Truncate).expect("program fits");
//! let mut engine = Engine::new(&program);
//! engine.run_stdio().expect("program should run");
//! ```

pub mod cli_util;
pub mod commands;
pub mod config;
pub mod dump;
pub mod engine;
pub mod instruction;
pub mod logging;
pub mod program;
pub mod tape;

pub use engine::{BracketKind, Engine, ExecError, Streams};
pub use instruction::Instruction;
pub use program::{Program, ProgramError, SizePolicy, PROGRAM_CAPACITY};
pub use tape::{Direction, Tape, TAPE_CAPACITY};
