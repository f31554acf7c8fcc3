//! Pipeline cycle engine.
//!
//! Evaluates the hazard unit once from the current snapshot, then runs the
//! stages in pipeline order followed by the DMA engine. Nothing here touches
//! the current snapshot; the caller commits `next` (and clocks the SRAMs)
//! only if the cycle succeeds.

use crate::common::error::Trap;
use crate::core::cpu::CoreState;
use crate::core::pipeline::hazards::{HazardSignals, HazardUnit};
use crate::core::pipeline::stages::{
    Retired, dec0_stage, dec1_stage, exec0_stage, exec1_stage, fetch0_stage, fetch1_stage,
};
use crate::core::units::dma::DmaActivity;
use crate::soc::memory::sram::Sram;

/// Everything observable about one cycle, for traces and statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Hazard unit outputs.
    pub signals: HazardSignals,
    /// Fetch0 followed a taken BTB prediction.
    pub btb_taken: bool,
    /// Dec0 squashed the front end after a bad prediction for a non-branch.
    pub squashed: bool,
    /// Instruction committed by Exec1.
    pub retired: Option<Retired>,
    /// DMA engine activity.
    pub dma: DmaActivity,
}

/// Runs one clock cycle.
///
/// # Arguments
///
/// * `cur` - Current snapshot (read only).
/// * `next` - Next snapshot; must be a copy of `cur` on entry.
/// * `imem` - Instruction SRAM.
/// * `dmem` - Data SRAM shared with the DMA engine.
///
/// # Errors
///
/// Returns the trap carried by an illegal instruction reaching Exec1. `next`
/// and the scheduled SRAM accesses are then partially written and must be
/// discarded.
pub fn cycle(
    cur: &CoreState,
    next: &mut CoreState,
    imem: &mut Sram,
    dmem: &mut Sram,
) -> Result<CycleReport, Trap> {
    let signals = HazardUnit::evaluate(cur);
    let btb_taken = !signals.stall && cur.btb.lookup(cur.latches.fetch_pc).taken;
    next.cycle_counter = cur.cycle_counter + 1;

    fetch0_stage(cur, next, imem, &signals);
    fetch1_stage(cur, next, imem, &signals);
    let squashed = dec0_stage(cur, next, &signals);
    dec1_stage(cur, next, &signals);
    exec0_stage(cur, next, dmem, &signals);
    let retired = exec1_stage(cur, next, dmem)?;

    let dma = cur.dma.step(&mut next.dma, dmem, signals.dma_conflict);

    Ok(CycleReport {
        signals,
        btb_taken,
        squashed,
        retired,
        dma,
    })
}
