//! Instruction Disassembler for SP.
//!
//! Converts a 32-bit instruction word into assembler-like text for trace
//! files, log messages and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use sp_core::isa::disasm::disassemble;
//! // ADD r2, r0, r1, 5
//! assert_eq!(disassemble(0x0081_0005), "ADD r2, r0, r1, 5");
//! ```

use crate::isa::decode::decode;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::Opcode;

/// Disassembles a 32-bit SP instruction into a human-readable string.
///
/// Returns `"ILLEGAL(<opcode>)"` for words whose opcode is outside the SP set.
pub fn disassemble(inst: u32) -> String {
    let Ok(d) = decode(inst) else {
        return format!("ILLEGAL({})", inst.opcode_bits());
    };

    match d.opcode {
        Opcode::Hlt => "HLT".to_owned(),
        Opcode::Lhi => format!("LHI {}, {}", d.dst, d.imm & 0xffff),
        Opcode::Jin => format!("JIN {}, {}", d.src0, d.imm),
        Opcode::Jlt | Opcode::Jle | Opcode::Jeq | Opcode::Jne => format!(
            "{} {}, {}, {}",
            d.opcode,
            d.src0,
            d.src1,
            d.imm & 0xffff
        ),
        Opcode::Dmp => format!("DMP {}", d.dst),
        _ => format!("{} {}, {}, {}, {}", d.opcode, d.dst, d.src0, d.src1, d.imm),
    }
}
