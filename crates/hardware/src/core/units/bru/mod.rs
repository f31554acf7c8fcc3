//! Branch Resolution Unit (BRU).
//!
//! Resolves conditional branches and indirect jumps in Exec1 and decides
//! whether the fetch-time prediction was wrong. The direct-mapped Branch
//! Target Buffer supplies those predictions.

/// Branch Target Buffer for storing predicted branch outcomes.
pub mod btb;

pub use self::btb::{Btb, Prediction};

use crate::common::constants::ADDR_MASK;
use crate::isa::instruction::Instruction;
use crate::isa::opcodes::Opcode;

/// Actual outcome of a branch or jump.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BranchOutcome {
    /// Whether control transfers to `target`.
    pub taken: bool,
    /// Resolved target address.
    pub target: u16,
}

impl BranchOutcome {
    /// Resolves a branch from its ALU result (1 = taken) and first operand.
    ///
    /// Conditional branches target the low 16 bits of the immediate; `JIN`
    /// targets the low 16 bits of its first operand.
    pub fn resolve(inst: &Instruction, alu_out: i32, a: i32) -> Self {
        let target = match inst.opcode {
            Opcode::Jin => a as u32 & ADDR_MASK,
            _ => inst.imm as u32 & ADDR_MASK,
        };
        Self {
            taken: alu_out != 0,
            target: target as u16,
        }
    }

    /// Returns true if the pipeline fetched down the wrong path.
    ///
    /// That is the case when the direction differs or both are taken with
    /// different targets.
    pub fn mispredicted(&self, pred: Prediction) -> bool {
        self.taken != pred.taken || (self.taken && self.target != pred.target)
    }

    /// Address fetch resumes at after a flush.
    pub const fn next_pc(&self, pc: u16) -> u16 {
        if self.taken {
            self.target
        } else {
            pc.wrapping_add(1)
        }
    }
}
