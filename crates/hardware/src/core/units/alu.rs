//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Exec0 stage. All
//! arithmetic is on signed 32-bit values and wraps on overflow.

use crate::common::constants::ADDR_MASK;
use crate::isa::opcodes::Opcode;

/// Bit mask for the shift amount (5 bits: 0-31).
const SHAMT_MASK: u32 = 0x1f;

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes the ALU part of an operation.
    ///
    /// # Arguments
    ///
    /// * `op`  - The operation.
    /// * `a`   - First operand (after immediate substitution and bypassing).
    /// * `b`   - Second operand.
    /// * `imm` - The sign-extended immediate of the instruction.
    ///
    /// # Returns
    ///
    /// * ALU and `LHI` ops: the value written to `dst`.
    /// * `LD`/`ST`: the data address `b & 0xffff`.
    /// * Conditional branches and `JIN`: 1 if taken, else 0.
    /// * `DMA`: the destination pointer (the immediate).
    /// * `DMP`, `HLT`: 0; `DMP` is resolved against the DMA engine by the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use sp_core::core::units::alu::Alu;
    /// use sp_core::isa::Opcode;
    ///
    /// assert_eq!(Alu::execute(Opcode::Add, i32::MAX, 1, 0), i32::MIN);
    /// assert_eq!(Alu::execute(Opcode::Rsf, -1, 28, 0), 0xf);
    /// assert_eq!(Alu::execute(Opcode::Lhi, 0x1234, 0x5678, 0x1234), 0x5678_1234);
    /// assert_eq!(Alu::execute(Opcode::Jle, 3, 3, 0), 1);
    /// ```
    pub fn execute(op: Opcode, a: i32, b: i32, imm: i32) -> i32 {
        let shamt = b as u32 & SHAMT_MASK;
        match op {
            Opcode::Add => a.wrapping_add(b),
            Opcode::Sub => a.wrapping_sub(b),
            Opcode::Lsf => a.wrapping_shl(shamt),
            Opcode::Rsf => (a as u32).wrapping_shr(shamt) as i32,
            Opcode::And => a & b,
            Opcode::Or => a | b,
            Opcode::Xor => a ^ b,
            Opcode::Lhi => ((b as u32) << 16 | (a as u32 & 0xffff)) as i32,
            Opcode::Ld | Opcode::St => (b as u32 & ADDR_MASK) as i32,
            Opcode::Jlt => (a < b) as i32,
            Opcode::Jle => (a <= b) as i32,
            Opcode::Jeq => (a == b) as i32,
            Opcode::Jne => (a != b) as i32,
            Opcode::Jin => 1,
            Opcode::Dma => imm,
            Opcode::Dmp | Opcode::Hlt => 0,
        }
    }
}
