/// The nine instructions understood by the interpreter.
///
/// Every other byte in a program is inert filler and decodes to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `<`
    Left,
    /// `>`
    Right,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `,`
    Input,
    /// `.`
    Output,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
    /// `#` prints the non-empty rows of the tape to the diagnostic stream.
    Dump,
}

impl Instruction {
    pub fn decode(byte: u8) -> Option<Self> {
        match byte {
            b'<' => Some(Instruction::Left),
            b'>' => Some(Instruction::Right),
            b'+' => Some(Instruction::Increment),
            b'-' => Some(Instruction::Decrement),
            b',' => Some(Instruction::Input),
            b'.' => Some(Instruction::Output),
            b'[' => Some(Instruction::LoopStart),
            b']' => Some(Instruction::LoopEnd),
            b'#' => Some(Instruction::Dump),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Instruction::Left => '<',
            Instruction::Right => '>',
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::Input => ',',
            Instruction::Output => '.',
            Instruction::LoopStart => '[',
            Instruction::LoopEnd => ']',
            Instruction::Dump => '#',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_every_instruction_symbol() {
        for ch in "<>+-,.[]#".chars() {
            let op = Instruction::decode(ch as u8).expect("instruction byte");
            assert_eq!(op.symbol(), ch);
        }
    }

    #[test]
    fn other_bytes_are_inert() {
        for byte in [b' ', b'\n', b'a', b'!', 0u8, 0xff] {
            assert_eq!(Instruction::decode(byte), None);
        }
    }
}
