//! Instruction Decode Stages (Dec0, Dec1).
//!
//! Dec0 turns the raw word into an [`Instruction`] and catches predictions
//! made for non-branches. Dec1 reads the operands through the hazard unit.

use tracing::debug;

use crate::common::error::Trap;
use crate::core::cpu::CoreState;
use crate::core::pipeline::hazards::HazardSignals;
use crate::core::pipeline::latches::{Dec1Entry, Exec0Entry};
use crate::isa::decode::decode;
use crate::isa::instruction::Instruction;

/// Executes the Dec0 stage.
///
/// An illegal opcode is not raised here: the word may be on a wrong path, so
/// the record carries the trap and a no-op body down to Exec1.
///
/// If the BTB predicted taken for something that is not a branch, the
/// instructions fetched behind it are squashed and fetch restarts at `pc + 1`.
///
/// # Returns
///
/// `true` if this cycle squashed the front end.
pub fn dec0_stage(cur: &CoreState, next: &mut CoreState, sig: &HazardSignals) -> bool {
    if sig.stall {
        return false;
    }
    let Some(d0) = &cur.latches.dec0 else {
        next.latches.dec1 = None;
        return false;
    };

    let (decoded, trap) = match decode(d0.inst) {
        Ok(inst) => (inst, None),
        Err(opcode) => (
            Instruction::nop(),
            Some(Trap::IllegalOpcode {
                pc: d0.pc,
                opcode,
                inst: d0.inst,
            }),
        ),
    };
    let is_branch = trap.is_none() && decoded.opcode.is_branch();

    next.latches.dec1 = Some(Dec1Entry {
        pc: d0.pc,
        inst: d0.inst,
        decoded,
        pred: d0.pred,
        trap,
    });

    if d0.pred.taken && !is_branch {
        debug!(pc = d0.pc, "BTB predicted taken for a non-branch, squashing fetch");
        next.latches.fetch1 = None;
        next.latches.fetch1_saved = None;
        next.latches.dec0 = None;
        next.latches.fetch_pc = d0.pc.wrapping_add(1);
        return true;
    }
    false
}

/// Executes the Dec1 stage.
///
/// Latches the operands the hazard unit resolved (immediate, register file,
/// or the Exec1 result) into the Exec0 record.
pub fn dec1_stage(cur: &CoreState, next: &mut CoreState, sig: &HazardSignals) {
    if sig.stall {
        return;
    }
    let (Some(d1), Some(ops)) = (&cur.latches.dec1, sig.dec1) else {
        next.latches.exec0 = None;
        return;
    };

    next.latches.exec0 = Some(Exec0Entry {
        pc: d1.pc,
        inst: d1.inst,
        decoded: d1.decoded,
        pred: d1.pred,
        trap: d1.trap.clone(),
        a: ops.a,
        b: ops.b,
    });
}
