use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

/// Maximum number of source bytes a program may hold.
pub const PROGRAM_CAPACITY: usize = 65536;

/// What to do with a source that is longer than [`PROGRAM_CAPACITY`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SizePolicy {
    /// Keep the first `PROGRAM_CAPACITY` bytes and drop the rest silently.
    #[default]
    Truncate,
    /// Refuse to load the program.
    Reject,
}

/// Errors that can occur while loading a program.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// The source file could not be opened or read.
    #[error("Unable to open program '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The source exceeded the buffer and the policy was [`SizePolicy::Reject`].
    #[error("Program is larger than {capacity} bytes")]
    TooLarge { capacity: usize },
}

/// Immutable instruction buffer.
#[derive(Debug, Clone)]
pub struct Program {
    code: Vec<u8>,
}

impl Program {
    /// Build a program from an in-memory buffer.
    pub fn from_bytes(
        bytes: impl Into<Vec<u8>>,
        policy: SizePolicy,
    ) -> Result<Self, ProgramError> {
        let mut code = bytes.into();
        if code.len() > PROGRAM_CAPACITY {
            if policy == SizePolicy::Reject {
                return Err(ProgramError::TooLarge { capacity: PROGRAM_CAPACITY });
            }
            debug!(original = code.len(), kept = PROGRAM_CAPACITY, "truncating program");
            code.truncate(PROGRAM_CAPACITY);
        }
        Ok(Self { code })
    }

    /// Read a program from `path`.
    ///
    /// At most one byte past the capacity is read, which is enough to tell
    /// whether the file was oversized without pulling all of it into memory.
    pub fn load(path: impl AsRef<Path>, policy: SizePolicy) -> Result<Self, ProgramError> {
        let path = path.as_ref();
        let open_err = |source| ProgramError::Open { path: path.to_path_buf(), source };

        let file = File::open(path).map_err(open_err)?;
        let mut code = Vec::new();
        file.take(PROGRAM_CAPACITY as u64 + 1)
            .read_to_end(&mut code)
            .map_err(open_err)?;

        debug!(path = %path.display(), bytes = code.len().min(PROGRAM_CAPACITY), "loaded program");
        Self::from_bytes(code, policy)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}
