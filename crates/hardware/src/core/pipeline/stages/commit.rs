//! Commit Stage (Exec1).
//!
//! The only stage with architecturally visible effects. It performs the
//! following:
//! 1. **Write-back:** ALU, `LHI`, `DMP` and load results go to the register file.
//! 2. **Memory:** Stores write the data SRAM; loads extract the word read in Exec0.
//! 3. **DMA:** `DMA` latches a transfer request into an idle engine.
//! 4. **Control:** Branches update the BTB, link `r7`, and flush on a misprediction.
//! 5. **Faults:** A carried trap is returned before anything is written.

use tracing::debug;

use crate::common::error::Trap;
use crate::core::cpu::CoreState;
use crate::core::pipeline::latches::MemForward;
use crate::core::units::bru::BranchOutcome;
use crate::isa::instruction::{Instruction, Reg};
use crate::isa::opcodes::Opcode;
use crate::soc::memory::sram::Sram;

/// Architectural effect of a committed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitEffect {
    /// ALU, `LHI` or `DMP` result written to `dst` (dropped for `r0`/`r1`).
    RegWrite {
        /// Destination register.
        dst: Reg,
        /// Value written.
        value: i32,
    },
    /// Load of `word` from `addr` into `dst`.
    Load {
        /// Destination register.
        dst: Reg,
        /// Data address.
        addr: u16,
        /// Word read.
        word: i32,
    },
    /// Store of `word` to `addr`.
    Store {
        /// Data address.
        addr: u16,
        /// Word written.
        word: i32,
    },
    /// DMA request; `launched` is false when the engine was busy.
    Dma {
        /// The request was accepted.
        launched: bool,
    },
    /// Branch or jump resolution.
    Branch {
        /// Actual direction and target.
        outcome: BranchOutcome,
        /// The front end was flushed.
        flushed: bool,
    },
    /// `HLT`: the run ends after this cycle commits.
    Halt,
}

/// An instruction that left the pipeline this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Retired {
    /// Program counter.
    pub pc: u16,
    /// Raw encoding.
    pub inst: u32,
    /// Decoded fields.
    pub decoded: Instruction,
    /// First ALU operand.
    pub a: i32,
    /// Second ALU operand.
    pub b: i32,
    /// ALU result.
    pub alu_out: i32,
    /// What the commit did.
    pub effect: CommitEffect,
}

/// Executes the Exec1 stage.
///
/// # Returns
///
/// * `Ok(None)` if Exec1 held a bubble.
/// * `Ok(Some(retired))` describing the committed instruction.
/// * `Err(trap)` if the record carried an illegal opcode. The caller must
///   discard the whole cycle.
pub fn exec1_stage(
    cur: &CoreState,
    next: &mut CoreState,
    dmem: &mut Sram,
) -> Result<Option<Retired>, Trap> {
    next.latches.mem_forward = None;

    let Some(e1) = &cur.latches.exec1 else {
        return Ok(None);
    };
    if let Some(trap) = &e1.trap {
        return Err(trap.clone());
    }

    let inst = e1.decoded;
    let effect = match inst.opcode {
        Opcode::Add
        | Opcode::Sub
        | Opcode::Lsf
        | Opcode::Rsf
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Lhi
        | Opcode::Dmp => {
            next.regs.write(inst.dst, e1.alu_out);
            CommitEffect::RegWrite {
                dst: inst.dst,
                value: e1.alu_out,
            }
        }

        Opcode::Ld => {
            let word = dmem.extract_result() as i32;
            next.regs.write(inst.dst, word);
            if inst.dst.is_writable() {
                next.latches.mem_forward = Some(MemForward {
                    dst: inst.dst,
                    word,
                });
            }
            CommitEffect::Load {
                dst: inst.dst,
                addr: e1.alu_out as u16,
                word,
            }
        }

        Opcode::St => {
            let addr = e1.alu_out as u16;
            dmem.write(addr, e1.a as u32);
            CommitEffect::Store { addr, word: e1.a }
        }

        Opcode::Dma => {
            let launched = cur.dma.launch(&mut next.dma, e1.a, e1.alu_out, e1.b);
            if launched {
                debug!(src = e1.a, dst = e1.alu_out, len = e1.b, "DMA launched");
            } else {
                debug!(pc = e1.pc, "DMA request dropped, engine busy");
            }
            CommitEffect::Dma { launched }
        }

        Opcode::Jlt | Opcode::Jle | Opcode::Jeq | Opcode::Jne | Opcode::Jin => {
            let outcome = BranchOutcome::resolve(&inst, e1.alu_out, e1.a);
            if outcome.taken {
                next.regs.write(Reg::LINK, i32::from(e1.pc));
            }
            next.btb.update(e1.pc, outcome.taken, outcome.target);

            let flushed = outcome.mispredicted(e1.pred);
            if flushed {
                debug!(
                    pc = e1.pc,
                    taken = outcome.taken,
                    target = outcome.target,
                    "branch mispredicted, flushing"
                );
                next.latches.flush_younger();
                next.latches.fetch_pc = outcome.next_pc(e1.pc);
            }
            CommitEffect::Branch { outcome, flushed }
        }

        Opcode::Hlt => CommitEffect::Halt,
    };

    Ok(Some(Retired {
        pc: e1.pc,
        inst: e1.inst,
        decoded: inst,
        a: e1.a,
        b: e1.b,
        alu_out: e1.alu_out,
        effect,
    }))
}
