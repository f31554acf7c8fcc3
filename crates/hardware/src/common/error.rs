//! Trap and error definitions.
//!
//! This module defines the error handling for the simulator. It provides:
//! 1. **Trap Representation:** Faults detected inside the pipeline and carried in stage records
//!    until the instruction reaches the commit stage.
//! 2. **Simulator Errors:** Load, configuration, I/O and fatal execution errors returned to callers.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Faults carried through the pipeline alongside an instruction.
///
/// A trap is recorded where it is detected (Dec0) but only acted on when the
/// instruction reaches Exec1, so wrong-path instructions that are squashed
/// before commit never stop the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Trap {
    /// The opcode field holds a value outside the SP opcode set.
    IllegalOpcode {
        /// Program counter of the offending instruction.
        pc: u16,
        /// The 5-bit opcode value.
        opcode: u8,
        /// The raw instruction word.
        inst: u32,
    },
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalOpcode { pc, opcode, inst } => write!(
                f,
                "IllegalOpcode({opcode}) at pc {pc:#06x} (inst {inst:#010x})"
            ),
        }
    }
}

impl std::error::Error for Trap {}

/// Errors reported by the simulator.
///
/// Load and configuration errors are raised before the first cycle; an
/// illegal opcode stops the run without committing the faulting cycle.
#[derive(Debug, Error)]
pub enum SimError {
    /// The program image could not be opened or read.
    #[error("couldn't open file {}: {source}", path.display())]
    ImageOpen {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A line of the program image is not a hexadecimal word.
    #[error("malformed image line {line}: {text:?}")]
    ImageFormat {
        /// One-based line number.
        line: usize,
        /// Offending line contents.
        text: String,
    },

    /// An instruction with an unknown opcode reached the commit stage.
    #[error("illegal opcode {opcode} at pc {pc:#06x} (inst {inst:#010x})")]
    IllegalOpcode {
        /// Program counter of the offending instruction.
        pc: u16,
        /// The 5-bit opcode value.
        opcode: u8,
        /// The raw instruction word.
        inst: u32,
    },

    /// The configured cycle limit elapsed before the program halted.
    #[error("cycle limit of {0} reached before halt")]
    CycleLimit(u64),

    /// The configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Writing a trace or dump file failed.
    #[error("trace output error: {0}")]
    Io(#[from] io::Error),
}

impl From<Trap> for SimError {
    fn from(trap: Trap) -> Self {
        match trap {
            Trap::IllegalOpcode { pc, opcode, inst } => Self::IllegalOpcode { pc, opcode, inst },
        }
    }
}
