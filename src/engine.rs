//! The fetch-dispatch loop.
//!
//! An [`Engine`] borrows a loaded [`Program`] and owns the [`Tape`]. It walks
//! the program one byte at a time until the instruction pointer reaches the
//! end of the program, or until an instruction fails.
//!
//! Loops are resolved by re-scanning the program every time a `[` is skipped
//! or a `]` jumps back. Nothing is precomputed, so an unbalanced bracket is
//! only reported when execution actually has to look for its partner: `]` on
//! its own is a valid program as long as the current cell is zero when it is
//! reached.

use std::fmt;
use std::io::{self, BufWriter, ErrorKind, Read, Write};

use tracing::{debug, trace};

use crate::dump;
use crate::instruction::Instruction;
use crate::program::Program;
use crate::tape::{Direction, Tape};

/// Errors that can occur while executing a program.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    /// The data pointer attempted to move left of cell 0 or beyond the last cell.
    #[error("Went {direction} beyond end of tape")]
    PointerOutOfBounds { ip: usize, ptr: usize, direction: Direction },

    /// A bracket scan ran off the end of the program without finding a partner.
    #[error("Unmatched {kind} brace")]
    UnmatchedBracket { ip: usize, kind: BracketKind },

    /// More instructions were dispatched than the configured limit allows.
    #[error("Ran for too many steps (limit {limit})")]
    StepLimitExceeded { ip: usize, limit: u64 },

    /// Reading input or writing output failed.
    #[error("I/O error: {source}")]
    Io {
        ip: usize,
        #[source]
        source: io::Error,
    },
}

impl ExecError {
    /// Instruction pointer at which the error was raised.
    pub fn ip(&self) -> usize {
        match self {
            ExecError::PointerOutOfBounds { ip, .. }
            | ExecError::UnmatchedBracket { ip, .. }
            | ExecError::StepLimitExceeded { ip, .. }
            | ExecError::Io { ip, .. } => *ip,
        }
    }
}

/// Which side of the loop was unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketKind::Open => write!(f, "left"),
            BracketKind::Close => write!(f, "right"),
        }
    }
}

/// The three streams a run talks to.
pub struct Streams<R, W, D> {
    pub input: R,
    pub output: W,
    /// Receives `#` dumps.
    pub diagnostics: D,
}

/// Interpreter state for a single pass over a program.
pub struct Engine<'p> {
    program: &'p Program,
    tape: Tape,
    ip: usize,
    steps: u64,
    max_steps: Option<u64>,
}

impl<'p> Engine<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            tape: Tape::new(),
            ip: 0,
            steps: 0,
            max_steps: None,
        }
    }

    /// Abort with [`ExecError::StepLimitExceeded`] once more than `limit`
    /// instructions have been dispatched. `None` means no limit.
    pub fn with_max_steps(mut self, limit: Option<u64>) -> Self {
        self.max_steps = limit;
        self
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Number of instructions dispatched so far. Inert bytes are not counted.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Run against stdin, stdout and stderr.
    ///
    /// Program output is buffered and flushed before every read, every dump
    /// and at the end of the run, whether it succeeded or not.
    pub fn run_stdio(&mut self) -> Result<(), ExecError> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let stderr = io::stderr();
        let mut streams = Streams {
            input: stdin.lock(),
            output: BufWriter::new(stdout.lock()),
            diagnostics: stderr.lock(),
        };

        let result = self.run(&mut streams);
        let flushed = streams.output.flush();
        match result {
            Ok(()) => flushed.map_err(|source| ExecError::Io { ip: self.ip, source }),
            Err(err) => Err(err),
        }
    }

    /// Execute until the instruction pointer reaches the end of the program.
    pub fn run<R: Read, W: Write, D: Write>(
        &mut self,
        streams: &mut Streams<R, W, D>,
    ) -> Result<(), ExecError> {
        let program = self.program;
        let code = program.as_bytes();

        while self.ip < code.len() {
            if let Some(op) = Instruction::decode(code[self.ip]) {
                if let Some(limit) = self.max_steps {
                    if self.steps >= limit {
                        return Err(ExecError::StepLimitExceeded { ip: self.ip, limit });
                    }
                }
                self.steps += 1;
                trace!(ip = self.ip, op = %op.symbol(), ptr = self.tape.pointer(), "dispatch");
                self.execute(op, streams)?;
            }
            self.ip += 1;
        }

        debug!(steps = self.steps, pointer = self.tape.pointer(), "program finished");
        Ok(())
    }

    /// Apply one instruction. Jumps leave `ip` on the matching bracket; the
    /// loop's regular advance then steps past it.
    fn execute<R: Read, W: Write, D: Write>(
        &mut self,
        op: Instruction,
        streams: &mut Streams<R, W, D>,
    ) -> Result<(), ExecError> {
        match op {
            Instruction::Left => self.shift(Direction::Left)?,
            Instruction::Right => self.shift(Direction::Right)?,
            Instruction::Increment => self.tape.increment(),
            Instruction::Decrement => self.tape.decrement(),
            Instruction::Input => {
                streams.output.flush().map_err(|source| ExecError::Io { ip: self.ip, source })?;
                let byte = read_byte(&mut streams.input)
                    .map_err(|source| ExecError::Io { ip: self.ip, source })?;
                // EOF stores 0
                self.tape.set_current(byte.unwrap_or(0));
            }
            Instruction::Output => {
                streams
                    .output
                    .write_all(&[self.tape.current()])
                    .map_err(|source| ExecError::Io { ip: self.ip, source })?;
            }
            Instruction::LoopStart => {
                if self.tape.current() == 0 {
                    let open = self.ip;
                    self.ip = find_matching_close(self.program.as_bytes(), open)
                        .ok_or(ExecError::UnmatchedBracket { ip: open, kind: BracketKind::Open })?;
                }
            }
            Instruction::LoopEnd => {
                if self.tape.current() != 0 {
                    let close = self.ip;
                    self.ip = find_matching_open(self.program.as_bytes(), close)
                        .ok_or(ExecError::UnmatchedBracket {
                            ip: close,
                            kind: BracketKind::Close,
                        })?;
                }
            }
            Instruction::Dump => {
                // A dump never fails the run.
                let _ = streams.output.flush();
                let _ = dump::write_dump(&self.tape, &mut streams.diagnostics);
            }
        }
        Ok(())
    }

    fn shift(&mut self, direction: Direction) -> Result<(), ExecError> {
        self.tape.shift(direction).map_err(|direction| ExecError::PointerOutOfBounds {
            ip: self.ip,
            ptr: self.tape.pointer(),
            direction,
        })
    }
}

/// Index of the `]` that closes the `[` at `open`, or `None` if the program
/// ends first.
pub fn find_matching_close(code: &[u8], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = open;
    while depth > 0 {
        i += 1;
        match code.get(i)? {
            b'[' => depth += 1,
            b']' => depth -= 1,
            _ => {}
        }
    }
    Some(i)
}

/// Index of the `[` that opens the `]` at `close`, or `None` if the start of
/// the program is reached first.
pub fn find_matching_open(code: &[u8], close: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = close;
    while depth > 0 {
        i = i.checked_sub(1)?;
        match code[i] {
            b']' => depth += 1,
            b'[' => depth -= 1,
            _ => {}
        }
    }
    Some(i)
}

/// Read a single byte, retrying on interruption. `Ok(None)` is end of input.
fn read_byte<R: Read>(input: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
