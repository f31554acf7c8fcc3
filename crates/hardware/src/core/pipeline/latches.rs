//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the record held by each stage of the 6-stage pipeline:
//! Fetch0 → Fetch1 → Dec0 → Dec1 → Exec0 → Exec1.
//!
//! 1. **Instruction Flow:** One record type per stage; `None` marks an inactive stage.
//! 2. **Prediction Tracking:** Every record carries the BTB prediction made at fetch.
//! 3. **Trap Propagation:** Illegal opcodes travel as a [`Trap`] until Exec1.

use crate::common::error::Trap;
use crate::core::units::bru::Prediction;
use crate::isa::instruction::{Instruction, Reg};
use crate::isa::opcodes::Opcode;

/// Record in the Fetch1 stage: a read of `pc` is in flight in the instruction SRAM.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fetch1Entry {
    /// Program counter of the instruction being fetched.
    pub pc: u16,
    /// Prediction made by Fetch0 for this PC.
    pub pred: Prediction,
}

/// Record in the Dec0 stage: a raw instruction word awaiting decode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dec0Entry {
    /// Program counter of the instruction.
    pub pc: u16,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Prediction made by Fetch0 for this PC.
    pub pred: Prediction,
}

/// Record in the Dec1 stage: a decoded instruction awaiting operand read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dec1Entry {
    /// Program counter of the instruction.
    pub pc: u16,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Decoded fields (a no-op stand-in if `trap` is set).
    pub decoded: Instruction,
    /// Prediction made by Fetch0 for this PC.
    pub pred: Prediction,
    /// Fault detected at decode, raised when the record reaches Exec1.
    pub trap: Option<Trap>,
}

/// Record in the Exec0 stage: operands have been read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exec0Entry {
    /// Program counter of the instruction.
    pub pc: u16,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Decoded fields.
    pub decoded: Instruction,
    /// Prediction made by Fetch0 for this PC.
    pub pred: Prediction,
    /// Fault detected at decode.
    pub trap: Option<Trap>,
    /// First ALU operand as read in Dec1.
    pub a: i32,
    /// Second ALU operand as read in Dec1.
    pub b: i32,
}

/// Record in the Exec1 stage: the instruction commits this cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exec1Entry {
    /// Program counter of the instruction.
    pub pc: u16,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Decoded fields.
    pub decoded: Instruction,
    /// Prediction made by Fetch0 for this PC.
    pub pred: Prediction,
    /// Fault detected at decode.
    pub trap: Option<Trap>,
    /// First ALU operand after bypassing.
    pub a: i32,
    /// Second ALU operand after bypassing.
    pub b: i32,
    /// ALU result (see [`Alu::execute`](crate::core::units::alu::Alu::execute)).
    pub alu_out: i32,
}

impl Exec1Entry {
    /// Returns true if this record is a legal instruction with opcode `op`.
    #[inline]
    pub fn is(&self, op: Opcode) -> bool {
        self.trap.is_none() && self.decoded.opcode == op
    }

    /// Register and value this instruction makes available to the ALU bypasses.
    ///
    /// ALU ops, `LHI` and `DMP` forward their result to `dst`; a taken branch
    /// forwards its PC to `r7`. Loads are excluded: their word comes out of
    /// memory at commit and reaches younger instructions through
    /// [`MemForward`] a cycle later.
    pub fn forward(&self) -> Option<(Reg, i32)> {
        if self.trap.is_some() {
            return None;
        }
        let op = self.decoded.opcode;
        if op.is_alu() {
            let dst = self.decoded.dst;
            dst.is_writable().then_some((dst, self.alu_out))
        } else if op.is_branch() && self.alu_out != 0 {
            Some((Reg::LINK, i32::from(self.pc)))
        } else {
            None
        }
    }

    /// Destination of a load that writes an architectural register.
    pub fn load_dst(&self) -> Option<Reg> {
        (self.is(Opcode::Ld) && self.decoded.dst.is_writable()).then_some(self.decoded.dst)
    }
}

impl Exec0Entry {
    /// Returns true if this record is a legal instruction with opcode `op`.
    #[inline]
    pub fn is(&self, op: Opcode) -> bool {
        self.trap.is_none() && self.decoded.opcode == op
    }
}

/// One-cycle marker left by a load commit: the loaded word and its register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemForward {
    /// Register the load wrote.
    pub dst: Reg,
    /// Word read from the data SRAM.
    pub word: i32,
}

/// All stage records of the pipeline.
///
/// Fetch0 is always active; its state is just the fetch PC.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Latches {
    /// Address Fetch0 reads next.
    pub fetch_pc: u16,
    /// Fetch1 record.
    pub fetch1: Option<Fetch1Entry>,
    /// Word captured by Fetch1 during a stall, consumed when it next advances.
    pub fetch1_saved: Option<u32>,
    /// Dec0 record.
    pub dec0: Option<Dec0Entry>,
    /// Dec1 record.
    pub dec1: Option<Dec1Entry>,
    /// Exec0 record.
    pub exec0: Option<Exec0Entry>,
    /// Exec1 record.
    pub exec1: Option<Exec1Entry>,
    /// Load result forwarded to Exec0 in the cycle after the load commits.
    pub mem_forward: Option<MemForward>,
}

impl Latches {
    /// Deactivates Fetch1 through Exec1 and drops the saved word.
    ///
    /// Applied to the next snapshot on a branch misprediction; the caller
    /// redirects `fetch_pc`.
    pub fn flush_younger(&mut self) {
        self.fetch1 = None;
        self.fetch1_saved = None;
        self.dec0 = None;
        self.dec1 = None;
        self.exec0 = None;
        self.exec1 = None;
    }
}
