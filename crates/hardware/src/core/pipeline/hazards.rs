//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when data
//! dependencies exist between instructions. It provides:
//! 1. **Hazard Detection:** Structural (load behind store) and load-use stalls.
//! 2. **Operand Forwarding:** Exec1 results bypass the register file into Dec1 and
//!    Exec0; a load's word reaches Exec0 through the memory-forward marker.
//! 3. **Port Arbitration:** Whether the pipeline owns the data SRAM this cycle.
//!
//! Everything here is a pure function of the current snapshot.

use std::fmt;

use tracing::trace;

use crate::core::cpu::CoreState;
use crate::core::pipeline::latches::{Exec1Entry, MemForward};
use crate::isa::instruction::{Instruction, Reg};
use crate::isa::opcodes::Opcode;

/// Where an ALU operand came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OperandSource {
    /// Value latched in the stage record (Exec0 only).
    #[default]
    Latched,
    /// The sign-extended immediate (operand names `r1`, or `LHI`'s first operand).
    Immediate,
    /// The register file.
    RegFile,
    /// Result of the instruction in Exec1.
    Exec1Bypass,
    /// Word of the load that committed last cycle.
    MemBypass,
}

impl OperandSource {
    /// Returns true for the two bypass paths.
    pub const fn is_bypass(self) -> bool {
        matches!(self, Self::Exec1Bypass | Self::MemBypass)
    }
}

impl fmt::Display for OperandSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Latched => "Latched",
            Self::Immediate => "Immediate",
            Self::RegFile => "RegFile",
            Self::Exec1Bypass => "Exec1",
            Self::MemBypass => "Mem",
        })
    }
}

/// A resolved operand pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    /// First ALU operand.
    pub a: i32,
    /// Second ALU operand.
    pub b: i32,
    /// Source of `a`.
    pub a_src: OperandSource,
    /// Source of `b`.
    pub b_src: OperandSource,
}

/// Control signals computed once per cycle from the current snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HazardSignals {
    /// Stages up to Exec0 hold and Exec1 receives a bubble.
    pub stall: bool,
    /// The stall is a load in Exec0 behind a store in Exec1.
    pub structural: bool,
    /// The stall is an Exec0 read of a register loaded by Exec1.
    pub load_use: bool,
    /// Operands for the instruction in Dec1 (if active).
    pub dec1: Option<Operands>,
    /// Operands for the instruction in Exec0 (if active).
    pub exec0: Option<Operands>,
    /// The pipeline uses the data SRAM this cycle; the DMA engine must yield.
    pub dma_conflict: bool,
}

/// Hazard detection and bypass unit.
#[derive(Debug)]
pub struct HazardUnit;

impl HazardUnit {
    /// Evaluates stall, bypass and port-conflict signals for one cycle.
    ///
    /// # Arguments
    ///
    /// * `state` - The current (pre-cycle) snapshot.
    pub fn evaluate(state: &CoreState) -> HazardSignals {
        let l = &state.latches;
        let exec1 = l.exec1.as_ref();
        let exec0 = l.exec0.as_ref();

        let structural = matches!((exec0, exec1), (Some(e0), Some(e1))
            if e0.is(Opcode::Ld) && e1.is(Opcode::St));
        let load_use = need_stall_load_use(exec1, exec0.map(|e| &e.decoded));
        let stall = structural || load_use;

        let forward = exec1.and_then(Exec1Entry::forward);

        let dec1 = l.dec1.as_ref().map(|d| {
            let ops = resolve_dec1(&d.decoded, state, forward);
            trace!(
                pc = d.pc,
                a = ops.a,
                a_src = %ops.a_src,
                b = ops.b,
                b_src = %ops.b_src,
                "Dec1 operands"
            );
            ops
        });

        let exec0_ops = exec0.map(|e| {
            let ops = forward_exec0(&e.decoded, e.a, e.b, forward, l.mem_forward);
            if ops.a_src.is_bypass() || ops.b_src.is_bypass() {
                trace!(
                    pc = e.pc,
                    a = ops.a,
                    a_src = %ops.a_src,
                    b = ops.b,
                    b_src = %ops.b_src,
                    "Exec0 bypass"
                );
            }
            ops
        });

        let dma_conflict = (!stall && exec0.is_some_and(|e| e.is(Opcode::Ld)))
            || exec1.is_some_and(|e| e.is(Opcode::St));

        HazardSignals {
            stall,
            structural,
            load_use,
            dec1,
            exec0: exec0_ops,
            dma_conflict,
        }
    }
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the instruction in Exec0 reads a register
/// that the load in Exec1 is writing this cycle: the loaded word only leaves
/// the SRAM at commit, too late for Exec0's ALU.
///
/// # Examples
///
/// ```text
/// Exec1: LD  r2, r0, r1, 100   <- word for r2 arrives at commit
/// Exec0: ADD r3, r2, r1, 0     <- needs r2 now: stall one cycle
/// ```
pub fn need_stall_load_use(exec1: Option<&Exec1Entry>, exec0: Option<&Instruction>) -> bool {
    match (exec1.and_then(Exec1Entry::load_dst), exec0) {
        (Some(dst), Some(inst)) => inst.reads(dst),
        _ => false,
    }
}

fn resolve_dec1(inst: &Instruction, state: &CoreState, forward: Option<(Reg, i32)>) -> Operands {
    let read = |reg: Option<Reg>| match reg {
        None => (inst.imm, OperandSource::Immediate),
        Some(r) => match forward {
            Some((fwd, val)) if fwd == r => (val, OperandSource::Exec1Bypass),
            _ => (state.regs.read(r), OperandSource::RegFile),
        },
    };
    let (a, a_src) = read(inst.operand_a_reg());
    let (b, b_src) = read(inst.operand_b_reg());
    Operands { a, b, a_src, b_src }
}

/// Applies the Exec0 bypasses to operands latched in Dec1.
///
/// The Exec1 result takes priority over the memory marker because it is the
/// younger write.
pub fn forward_exec0(
    inst: &Instruction,
    a: i32,
    b: i32,
    forward: Option<(Reg, i32)>,
    mem: Option<MemForward>,
) -> Operands {
    let pick = |reg: Option<Reg>, latched: i32| {
        let Some(r) = reg else {
            return (latched, OperandSource::Latched);
        };
        match (forward, mem) {
            (Some((fwd, val)), _) if fwd == r => (val, OperandSource::Exec1Bypass),
            (_, Some(m)) if m.dst == r => (m.word, OperandSource::MemBypass),
            _ => (latched, OperandSource::Latched),
        }
    };
    let (a, a_src) = pick(inst.operand_a_reg(), a);
    let (b, b_src) = pick(inst.operand_b_reg(), b);
    Operands { a, b, a_src, b_src }
}
