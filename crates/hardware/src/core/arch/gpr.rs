//! SP General-Purpose Register File.
//!
//! This module implements the General-Purpose Register (GPR) file for the SP architecture.
//! It performs the following:
//! 1. **Storage:** Maintains 8 signed 32-bit registers (`r0`-`r7`).
//! 2. **Invariant Enforcement:** `r0` reads zero and writes to `r0`/`r1` are discarded.
//! 3. **Debugging:** Provides a formatted dump of the register state.

use std::fmt;

use crate::common::constants::NUM_REGS;
use crate::isa::instruction::Reg;

/// General-Purpose Register file.
///
/// `r1` is never read through the file: operand resolution substitutes the
/// immediate whenever an operand names `r1`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [i32; NUM_REGS],
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register. `r0` always returns 0.
    #[inline]
    pub fn read(&self, reg: Reg) -> i32 {
        if reg == Reg::ZERO {
            0
        } else {
            self.regs[reg.index()]
        }
    }

    /// Writes a register; writes to `r0` and `r1` are ignored.
    #[inline]
    pub fn write(&mut self, reg: Reg, val: i32) {
        if reg.is_writable() {
            self.regs[reg.index()] = val;
        }
    }

    /// Snapshot of all eight registers.
    pub const fn as_array(&self) -> &[i32; NUM_REGS] {
        &self.regs
    }
}

impl fmt::Display for Gpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.regs.chunks(2).enumerate() {
            writeln!(
                f,
                "r{:<2}={:#010x} r{:<2}={:#010x}",
                i * 2,
                pair[0],
                i * 2 + 1,
                pair[1]
            )?;
        }
        Ok(())
    }
}
