use std::fmt;

/// Number of cells on the tape.
pub const TAPE_CAPACITY: usize = 65536;

/// Which end of the tape a pointer move ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Fixed-size byte memory plus the data pointer.
///
/// The pointer never leaves `0..TAPE_CAPACITY`: a move past either end is
/// refused and reported back to the caller instead of wrapping or clamping.
pub struct Tape {
    cells: Box<[u8]>,
    pointer: usize,
}

impl Tape {
    pub fn new() -> Self {
        Self {
            cells: vec![0; TAPE_CAPACITY].into_boxed_slice(),
            pointer: 0,
        }
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn current(&self) -> u8 {
        self.cells[self.pointer]
    }

    pub fn set_current(&mut self, value: u8) {
        self.cells[self.pointer] = value;
    }

    pub fn increment(&mut self) {
        self.cells[self.pointer] = self.cells[self.pointer].wrapping_add(1);
    }

    pub fn decrement(&mut self) {
        self.cells[self.pointer] = self.cells[self.pointer].wrapping_sub(1);
    }

    /// Move the pointer one cell. On failure the pointer is left untouched and
    /// the offending direction is returned.
    pub fn shift(&mut self, direction: Direction) -> Result<(), Direction> {
        match direction {
            Direction::Left => {
                if self.pointer == 0 {
                    return Err(direction);
                }
                self.pointer -= 1;
            }
            Direction::Right => {
                if self.pointer >= self.cells.len() - 1 {
                    return Err(direction);
                }
                self.pointer += 1;
            }
        }
        Ok(())
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}
