//! Stage record constructors for driving the hazard unit directly.

use sp_core::core::pipeline::latches::{Exec0Entry, Exec1Entry};
use sp_core::core::units::alu::Alu;
use sp_core::core::units::bru::Prediction;
use sp_core::isa::instruction::Instruction;
use sp_core::isa::opcodes::Opcode;

use super::program::r;

pub fn inst(op: Opcode, dst: u8, src0: u8, src1: u8, imm: i32) -> Instruction {
    Instruction::new(op, r(dst), r(src0), r(src1), imm)
}

/// An Exec0 record with the given latched operands.
pub fn exec0(decoded: Instruction, a: i32, b: i32) -> Exec0Entry {
    Exec0Entry {
        pc: 0,
        inst: decoded.encode(),
        decoded,
        pred: Prediction::default(),
        trap: None,
        a,
        b,
    }
}

/// An Exec1 record whose ALU result is computed from `a` and `b`.
pub fn exec1(decoded: Instruction, pc: u16, a: i32, b: i32) -> Exec1Entry {
    Exec1Entry {
        pc,
        inst: decoded.encode(),
        decoded,
        pred: Prediction::default(),
        trap: None,
        a,
        b,
        alu_out: Alu::execute(decoded.opcode, a, b, decoded.imm),
    }
}
