//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction for the SP instruction word, the [`Reg`] index
//! type, and the decoded [`Instruction`] with its operand-resolution rules.

use std::fmt;

use crate::common::constants::{
    DST_SHIFT, IMMEDIATE_MASK, IMMEDIATE_SIGN_BIT, OPCODE_MASK, OPCODE_SHIFT, REG_MASK,
    SRC0_SHIFT, SRC1_SHIFT,
};
use crate::isa::opcodes::Opcode;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the 5-bit opcode field (bits 29..25).
    fn opcode_bits(&self) -> u8;

    /// Extracts the destination register field (bits 24..22).
    fn dst(&self) -> Reg;

    /// Extracts the first source register field (bits 21..19).
    fn src0(&self) -> Reg;

    /// Extracts the second source register field (bits 18..16).
    fn src1(&self) -> Reg;

    /// Extracts the 16-bit immediate (bits 15..0), sign-extended to 32 bits.
    fn imm(&self) -> i32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode_bits(&self) -> u8 {
        ((self >> OPCODE_SHIFT) & OPCODE_MASK) as u8
    }

    #[inline(always)]
    fn dst(&self) -> Reg {
        Reg::from_field(self >> DST_SHIFT)
    }

    #[inline(always)]
    fn src0(&self) -> Reg {
        Reg::from_field(self >> SRC0_SHIFT)
    }

    #[inline(always)]
    fn src1(&self) -> Reg {
        Reg::from_field(self >> SRC1_SHIFT)
    }

    #[inline(always)]
    fn imm(&self) -> i32 {
        let raw = self & IMMEDIATE_MASK;
        if raw & IMMEDIATE_SIGN_BIT != 0 {
            (raw | !IMMEDIATE_MASK) as i32
        } else {
            raw as i32
        }
    }
}

/// Index of one of the eight general registers.
///
/// Only constructible from a 3-bit field, so indexing the register file with
/// a `Reg` can never go out of bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reg(u8);

impl Reg {
    /// `r0`, always reads zero.
    pub const ZERO: Self = Self(0);
    /// `r1`, the immediate alias: reading it yields the sign-extended immediate.
    pub const IMM: Self = Self(1);
    /// `r7`, receives the PC of every taken branch.
    pub const LINK: Self = Self(7);

    /// Builds a register index from the low three bits of `bits`.
    #[inline(always)]
    pub const fn from_field(bits: u32) -> Self {
        Self((bits & REG_MASK) as u8)
    }

    /// Builds a register index, rejecting values above 7.
    pub const fn new(idx: u8) -> Option<Self> {
        if idx as u32 <= REG_MASK {
            Some(Self(idx))
        } else {
            None
        }
    }

    /// Numeric index in `0..=7`.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true if a commit to this register is architecturally visible
    /// (r2..r7).
    #[inline(always)]
    pub const fn is_writable(self) -> bool {
        self.0 > 1
    }

    /// Returns true for `r1`, the immediate alias.
    #[inline(always)]
    pub const fn is_imm(self) -> bool {
        self.0 == 1
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Structured form of a legal SP instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Destination register (also the second operand of `LHI`).
    pub dst: Reg,
    /// First source register.
    pub src0: Reg,
    /// Second source register.
    pub src1: Reg,
    /// Sign-extended immediate.
    pub imm: i32,
}

impl Instruction {
    /// Creates an instruction from its fields.
    pub const fn new(opcode: Opcode, dst: Reg, src0: Reg, src1: Reg, imm: i32) -> Self {
        Self {
            opcode,
            dst,
            src0,
            src1,
            imm,
        }
    }

    /// `ADD r0, r0, r0, 0`: no architectural effect.
    ///
    /// Stands in for the decoded form of an illegal word while its trap travels
    /// down the pipeline.
    pub const fn nop() -> Self {
        Self::new(Opcode::Add, Reg::ZERO, Reg::ZERO, Reg::ZERO, 0)
    }

    /// Register feeding the second ALU operand: `dst` for `LHI`, `src1` otherwise.
    #[inline]
    pub fn effective_src1(&self) -> Reg {
        if self.opcode == Opcode::Lhi {
            self.dst
        } else {
            self.src1
        }
    }

    /// Register feeding the first ALU operand, or `None` when the immediate is used.
    #[inline]
    pub fn operand_a_reg(&self) -> Option<Reg> {
        if self.opcode == Opcode::Lhi || self.src0.is_imm() {
            None
        } else {
            Some(self.src0)
        }
    }

    /// Register feeding the second ALU operand, or `None` when the immediate is used.
    #[inline]
    pub fn operand_b_reg(&self) -> Option<Reg> {
        let b = self.effective_src1();
        if b.is_imm() { None } else { Some(b) }
    }

    /// Returns true if either operand reads `reg` from the register file.
    pub fn reads(&self, reg: Reg) -> bool {
        self.operand_a_reg() == Some(reg) || self.operand_b_reg() == Some(reg)
    }

    /// Packs the fields back into a 32-bit instruction word.
    pub fn encode(&self) -> u32 {
        encode_fields(
            self.opcode as u8,
            self.dst,
            self.src0,
            self.src1,
            self.imm,
        )
    }
}

/// Packs raw fields into an instruction word; the opcode need not be legal.
pub fn encode_fields(opcode: u8, dst: Reg, src0: Reg, src1: Reg, imm: i32) -> u32 {
    ((u32::from(opcode) & OPCODE_MASK) << OPCODE_SHIFT)
        | ((dst.0 as u32) << DST_SHIFT)
        | ((src0.0 as u32) << SRC0_SHIFT)
        | ((src1.0 as u32) << SRC1_SHIFT)
        | (imm as u32 & IMMEDIATE_MASK)
}
