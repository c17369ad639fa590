use super::state::PROGRAM_SPACE;

/// Rejected ROM images. The machine is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },
}

impl LoadError {
    pub(crate) fn too_large(size: usize) -> Self {
        LoadError::RomTooLarge {
            size,
            max: PROGRAM_SPACE,
        }
    }
}

/// Execution faults. Any of these halts the machine until the next reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    #[error("stack overflow: more than 16 nested calls")]
    StackOverflow,

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("unknown opcode: {0:#06X}")]
    UnknownOpcode(u16),

    #[error("program counter out of bounds: {0:#06X}")]
    PcOutOfBounds(u16),
}
