//! SP Opcodes.
//!
//! Defines the 5-bit major opcodes of the SP instruction set. Any value not
//! listed here is illegal and raises [`Trap::IllegalOpcode`](crate::common::Trap)
//! when it reaches the commit stage.

use std::fmt;

/// SP operation selected by bits 29..25 of the instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// `d = a + b`
    Add = 0,
    /// `d = a - b`
    Sub = 1,
    /// `d = a << b`
    Lsf = 2,
    /// `d = a >> b` (logical)
    Rsf = 3,
    /// `d = a & b`
    And = 4,
    /// `d = a | b`
    Or = 5,
    /// `d = a ^ b`
    Xor = 6,
    /// Load high immediate: `d = (d << 16) | imm[15:0]`.
    Lhi = 7,
    /// `d = DMEM[b]`
    Ld = 8,
    /// `DMEM[b] = a`
    St = 9,
    /// Start a block copy of `b` words from `a` to the immediate.
    Dma = 10,
    /// `d = 1` if the DMA engine is idle, else 0.
    Dmp = 11,
    /// Jump if `a < b`.
    Jlt = 16,
    /// Jump if `a <= b`.
    Jle = 17,
    /// Jump if `a == b`.
    Jeq = 18,
    /// Jump if `a != b`.
    Jne = 19,
    /// Indirect jump to `a`.
    Jin = 20,
    /// Stop the machine.
    Hlt = 24,
}

impl Opcode {
    /// Every legal opcode, in encoding order.
    pub const ALL: [Self; 18] = [
        Self::Add,
        Self::Sub,
        Self::Lsf,
        Self::Rsf,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Lhi,
        Self::Ld,
        Self::St,
        Self::Dma,
        Self::Dmp,
        Self::Jlt,
        Self::Jle,
        Self::Jeq,
        Self::Jne,
        Self::Jin,
        Self::Hlt,
    ];

    /// Upper-case mnemonic used in traces.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Lsf => "LSF",
            Self::Rsf => "RSF",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Lhi => "LHI",
            Self::Ld => "LD",
            Self::St => "ST",
            Self::Dma => "DMA",
            Self::Dmp => "DMP",
            Self::Jlt => "JLT",
            Self::Jle => "JLE",
            Self::Jeq => "JEQ",
            Self::Jne => "JNE",
            Self::Jin => "JIN",
            Self::Hlt => "HLT",
        }
    }

    /// Returns true for the conditional branches and `JIN`.
    ///
    /// These are the only instructions that resolve against (and update) the BTB.
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Self::Jlt | Self::Jle | Self::Jeq | Self::Jne | Self::Jin
        )
    }

    /// Returns true for opcodes whose commit writes `dst` with the ALU result.
    pub const fn is_alu(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Sub
                | Self::Lsf
                | Self::Rsf
                | Self::And
                | Self::Or
                | Self::Xor
                | Self::Lhi
                | Self::Dmp
        )
    }
}

impl TryFrom<u8> for Opcode {
    /// The rejected 5-bit value.
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Add,
            1 => Self::Sub,
            2 => Self::Lsf,
            3 => Self::Rsf,
            4 => Self::And,
            5 => Self::Or,
            6 => Self::Xor,
            7 => Self::Lhi,
            8 => Self::Ld,
            9 => Self::St,
            10 => Self::Dma,
            11 => Self::Dmp,
            16 => Self::Jlt,
            17 => Self::Jle,
            18 => Self::Jeq,
            19 => Self::Jne,
            20 => Self::Jin,
            24 => Self::Hlt,
            other => return Err(other),
        })
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
