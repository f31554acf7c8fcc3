//! Instruction Fetch Stages (Fetch0, Fetch1).
//!
//! Fetch0 issues a read of the fetch PC on the instruction SRAM and picks the
//! next fetch PC from the BTB. The word arrives one cycle later, when the
//! record is in Fetch1.

use crate::core::cpu::CoreState;
use crate::core::pipeline::hazards::HazardSignals;
use crate::core::pipeline::latches::{Dec0Entry, Fetch1Entry};
use crate::soc::memory::sram::Sram;

/// Executes the Fetch0 stage.
///
/// Holds while the pipeline is stalled. Otherwise reads `fetch_pc`, records
/// the BTB prediction for it, and moves fetch to the predicted successor.
pub fn fetch0_stage(cur: &CoreState, next: &mut CoreState, imem: &mut Sram, sig: &HazardSignals) {
    if sig.stall {
        return;
    }
    let pc = cur.latches.fetch_pc;
    let pred = cur.btb.lookup(pc);
    imem.read(pc);
    next.latches.fetch_pc = pred.next_pc(pc);
    next.latches.fetch1 = Some(Fetch1Entry { pc, pred });
}

/// Executes the Fetch1 stage.
///
/// While stalled the word is parked in the saved slot (an already-saved word
/// wins) so it is handed to Dec0 exactly once when the stall clears.
pub fn fetch1_stage(cur: &CoreState, next: &mut CoreState, imem: &Sram, sig: &HazardSignals) {
    let Some(f1) = &cur.latches.fetch1 else {
        if !sig.stall {
            next.latches.dec0 = None;
        }
        return;
    };

    let word = imem.extract_result();
    if sig.stall {
        next.latches.fetch1_saved = cur.latches.fetch1_saved.or(Some(word));
    } else {
        next.latches.fetch1_saved = None;
        next.latches.dec0 = Some(Dec0Entry {
            pc: f1.pc,
            inst: cur.latches.fetch1_saved.unwrap_or(word),
            pred: f1.pred,
        });
    }
}
