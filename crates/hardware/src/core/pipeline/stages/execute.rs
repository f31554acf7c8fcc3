//! Instruction Execute Stage (Exec0).
//!
//! Applies the Exec0 bypasses, runs the ALU, samples the DMA engine for `DMP`
//! and issues the data-SRAM read of a load.

use crate::core::cpu::CoreState;
use crate::core::pipeline::hazards::HazardSignals;
use crate::core::pipeline::latches::Exec1Entry;
use crate::core::units::alu::Alu;
use crate::isa::opcodes::Opcode;
use crate::soc::memory::sram::Sram;

/// Executes the Exec0 stage.
///
/// While stalled the record holds and Exec1 receives a bubble. The held
/// record keeps the operands as bypassed this cycle, because the memory
/// marker they may have come from lasts a single cycle.
pub fn exec0_stage(cur: &CoreState, next: &mut CoreState, dmem: &mut Sram, sig: &HazardSignals) {
    let (Some(e0), Some(ops)) = (&cur.latches.exec0, sig.exec0) else {
        next.latches.exec1 = None;
        return;
    };

    if sig.stall {
        if let Some(held) = next.latches.exec0.as_mut() {
            held.a = ops.a;
            held.b = ops.b;
        }
        next.latches.exec1 = None;
        return;
    }

    let inst = e0.decoded;
    let alu_out = if e0.trap.is_some() {
        0
    } else if inst.opcode == Opcode::Dmp {
        let issuing = cur
            .latches
            .exec1
            .as_ref()
            .is_some_and(|e1| e1.is(Opcode::Dma));
        i32::from(!(cur.dma.busy || issuing))
    } else {
        Alu::execute(inst.opcode, ops.a, ops.b, inst.imm)
    };

    if e0.is(Opcode::Ld) {
        dmem.read(alu_out as u16);
    }

    next.latches.exec1 = Some(Exec1Entry {
        pc: e0.pc,
        inst: e0.inst,
        decoded: inst,
        pred: e0.pred,
        trap: e0.trap.clone(),
        a: ops.a,
        b: ops.b,
        alu_out,
    });
}
