//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the SP opcode set, the instruction word layout, decoding into a
//! structured form, and disassembly for traces.
//!
//! # Instruction word
//!
//! ```text
//!  31 30 | 29..25 | 24..22 | 21..19 | 18..16 | 15..0
//!   --   | opcode |  dst   |  src0  |  src1  | immediate
//! ```

/// Instruction decoding into the structured [`instruction::Instruction`] form.
pub mod decode;

/// Instruction disassembler used by the instruction trace.
pub mod disasm;

/// Field extraction, register indices, and the decoded instruction type.
pub mod instruction;

/// The closed SP opcode enumeration.
pub mod opcodes;

pub use self::decode::decode;
pub use self::instruction::{Instruction, InstructionBits, Reg};
pub use self::opcodes::Opcode;
