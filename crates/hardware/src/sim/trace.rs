//! Trace file output.
//!
//! `TraceContext` owns the three trace writers and the retired-instruction
//! counter for one run. Every writer is optional; a disabled trace costs a
//! branch per call. The formats are line-oriented `key value` text meant for
//! diffing runs, not for parsing.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};

use crate::common::error::SimError;
use crate::config::TraceConfig;
use crate::core::cpu::CoreState;
use crate::core::pipeline::engine::CycleReport;
use crate::core::pipeline::hazards::OperandSource;
use crate::core::pipeline::stages::{CommitEffect, Retired};
use crate::core::units::dma::DmaActivity;
use crate::isa::disasm::disassemble;
use crate::isa::opcodes::Opcode;

type Sink = Box<dyn Write>;

/// Trace writers and counters for one simulation run.
#[derive(Default)]
pub struct TraceContext {
    inst: Option<Sink>,
    cycle: Option<Sink>,
    dma: Option<Sink>,
    /// Instructions written to the instruction trace so far.
    instructions: u64,
}

impl fmt::Debug for TraceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceContext")
            .field("inst", &self.inst.is_some())
            .field("cycle", &self.cycle.is_some())
            .field("dma", &self.dma.is_some())
            .field("instructions", &self.instructions)
            .finish()
    }
}

fn create(path: &std::path::Path) -> io::Result<Sink> {
    Ok(Box::new(BufWriter::new(File::create(path)?)))
}

impl TraceContext {
    /// A context that writes nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Opens the trace files selected by `cfg`.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the output directory or a file cannot be created.
    pub fn open(cfg: &TraceConfig) -> Result<Self, SimError> {
        if !cfg.enabled {
            return Ok(Self::disabled());
        }
        fs::create_dir_all(&cfg.output_dir)?;
        Ok(Self {
            inst: cfg.instructions.then(|| create(&cfg.inst_trace_path())).transpose()?,
            cycle: cfg.cycles.then(|| create(&cfg.cycle_trace_path())).transpose()?,
            dma: cfg.dma.then(|| create(&cfg.dma_trace_path())).transpose()?,
            instructions: 0,
        })
    }

    /// Builds a context over arbitrary writers (used by tests and embedders).
    pub fn from_writers(inst: Option<Sink>, cycle: Option<Sink>, dma: Option<Sink>) -> Self {
        Self {
            inst,
            cycle,
            dma,
            instructions: 0,
        }
    }

    /// Writes the pre-cycle snapshot and this cycle's hazard signals.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn cycle(&mut self, cur: &CoreState, report: &CycleReport) -> io::Result<()> {
        let Some(out) = self.cycle.as_mut() else {
            return Ok(());
        };
        let l = &cur.latches;
        writeln!(out, "nr_simulated_instructions {}", self.instructions)?;
        writeln!(out, "cycle {}", cur.cycle_counter)?;
        for (i, r) in cur.regs.as_array().iter().enumerate().skip(2) {
            writeln!(out, "r{i} {r:08x}")?;
        }
        writeln!(out, "fetch0_pc {:04x}", l.fetch_pc)?;

        writeln!(out, "fetch1_active {}", u8::from(l.fetch1.is_some()))?;
        if let Some(e) = &l.fetch1 {
            writeln!(out, "fetch1_pc {:04x}", e.pc)?;
            writeln!(out, "fetch1_btb {} {:04x}", u8::from(e.pred.taken), e.pred.target)?;
        }
        if let Some(w) = l.fetch1_saved {
            writeln!(out, "fetch1_saved_inst {w:08x}")?;
        }

        writeln!(out, "dec0_active {}", u8::from(l.dec0.is_some()))?;
        if let Some(e) = &l.dec0 {
            writeln!(out, "dec0_pc {:04x}", e.pc)?;
            writeln!(out, "dec0_inst {:08x}", e.inst)?;
        }

        writeln!(out, "dec1_active {}", u8::from(l.dec1.is_some()))?;
        if let Some(e) = &l.dec1 {
            writeln!(out, "dec1_pc {:04x}", e.pc)?;
            writeln!(out, "dec1_inst {:08x}", e.inst)?;
        }

        writeln!(out, "exec0_active {}", u8::from(l.exec0.is_some()))?;
        if let Some(e) = &l.exec0 {
            writeln!(out, "exec0_pc {:04x}", e.pc)?;
            writeln!(out, "exec0_inst {:08x}", e.inst)?;
            writeln!(out, "exec0_alu0 {:08x}", e.a)?;
            writeln!(out, "exec0_alu1 {:08x}", e.b)?;
        }

        writeln!(out, "exec1_active {}", u8::from(l.exec1.is_some()))?;
        if let Some(e) = &l.exec1 {
            writeln!(out, "exec1_pc {:04x}", e.pc)?;
            writeln!(out, "exec1_inst {:08x}", e.inst)?;
            writeln!(out, "exec1_alu0 {:08x}", e.a)?;
            writeln!(out, "exec1_alu1 {:08x}", e.b)?;
            writeln!(out, "exec1_aluout {:08x}", e.alu_out)?;
        }

        let sig = &report.signals;
        writeln!(out, "is_pipe_stalled {}", u8::from(sig.stall))?;
        let src = |s: Option<OperandSource>| s.map_or_else(|| "-".to_owned(), |s| s.to_string());
        writeln!(
            out,
            "exec0_alu0_src {} exec0_alu1_src {}",
            src(sig.exec0.map(|o| o.a_src)),
            src(sig.exec0.map(|o| o.b_src))
        )?;
        writeln!(out, "dma_conflict {}", u8::from(sig.dma_conflict))?;
        writeln!(out)
    }

    /// Writes the DMA control block and what the engine did this cycle.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn dma(&mut self, cur: &CoreState, act: &DmaActivity) -> io::Result<()> {
        let Some(out) = self.dma.as_mut() else {
            return Ok(());
        };
        let d = &cur.dma;
        writeln!(out, "cycle {}", cur.cycle_counter)?;
        writeln!(out, "dma_busy {}", u8::from(d.busy))?;
        writeln!(out, "dma_src {:04x}", d.src)?;
        writeln!(out, "dma_dst {:04x}", d.dst)?;
        writeln!(out, "dma_len {:08x}", d.remaining)?;
        writeln!(out, "dma_reg {:08x}", d.reg)?;
        writeln!(out, "dma_reg2 {:08x}", d.shadow)?;
        writeln!(out, "dma_pending_read {}", u8::from(d.pending_read))?;
        writeln!(out, "dma_state {}", d.state)?;
        if act.stalled {
            writeln!(out, "Stalled in DMA_STATE_{}", d.state)?;
        }
        if let Some((addr, word)) = act.write {
            writeln!(out, "MEM[{addr}] = {word:08x}")?;
        }
        writeln!(out)
    }

    /// Writes the record of a committed instruction.
    ///
    /// `cur` is the snapshot the instruction committed from; registers are
    /// shown as the instruction saw them, with `r[1]` showing its immediate.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn instruction(&mut self, cur: &CoreState, r: &Retired) -> io::Result<()> {
        let n = self.instructions;
        let Some(out) = self.inst.as_mut() else {
            self.instructions += 1;
            return Ok(());
        };
        let d = &r.decoded;
        let regs = cur.regs.as_array();

        writeln!(
            out,
            "--- instruction {n} ({n:04x}) @ PC {} ({:04x}) -----------------------------------------------------------",
            r.pc, r.pc
        )?;
        writeln!(
            out,
            "pc = {:04x}, inst = {:08x}, opcode = {} ({}), dst = {}, src0 = {}, src1 = {}, immediate = {:08x}",
            r.pc,
            r.inst,
            d.opcode as u8,
            d.opcode,
            d.dst.index(),
            d.src0.index(),
            d.src1.index(),
            d.imm
        )?;
        writeln!(out, "disasm = {}", disassemble(r.inst))?;
        writeln!(
            out,
            "r[0] = 00000000 r[1] = {:08x} r[2] = {:08x} r[3] = {:08x} ",
            d.imm, regs[2], regs[3]
        )?;
        writeln!(
            out,
            "r[4] = {:08x} r[5] = {:08x} r[6] = {:08x} r[7] = {:08x} \n",
            regs[4], regs[5], regs[6], regs[7]
        )?;

        let exec = match r.effect {
            CommitEffect::RegWrite { dst, value } => match d.opcode {
                Opcode::Dmp => writeln!(out, ">>>> EXEC: R[{}] = DMP = {value} <<<<\n", dst.index()),
                _ => writeln!(
                    out,
                    ">>>> EXEC: R[{}] = {} {} {} <<<<\n",
                    dst.index(),
                    r.a,
                    d.opcode,
                    r.b
                ),
            },
            CommitEffect::Load { dst, addr, word } => writeln!(
                out,
                ">>>> EXEC: R[{}] = MEM[{addr}] = {word:08x} <<<<\n",
                dst.index()
            ),
            CommitEffect::Store { addr, word } => writeln!(
                out,
                ">>>> EXEC: MEM[{addr}] = R[{}] = {word:08x} <<<<\n",
                d.src0.index()
            ),
            CommitEffect::Dma { launched } => writeln!(
                out,
                ">>>> EXEC: DMA {} -> {} len {}{} <<<<\n",
                r.a,
                r.alu_out,
                r.b,
                if launched { "" } else { " (dropped, busy)" }
            ),
            CommitEffect::Branch { outcome, .. } => {
                if d.opcode == Opcode::Jin {
                    writeln!(
                        out,
                        ">>>> EXEC: JIN R[{}] = {:08x} <<<<\n",
                        d.src0.index(),
                        r.a
                    )
                } else {
                    writeln!(
                        out,
                        ">>>> EXEC: {} {}, {}, {} <<<<\n",
                        d.opcode,
                        r.a,
                        r.b,
                        outcome.next_pc(r.pc)
                    )
                }
            }
            CommitEffect::Halt => {
                writeln!(out, ">>>> EXEC: HALT at PC {:04x}<<<<", r.pc)?;
                writeln!(
                    out,
                    "sim finished at pc {}, {} instructions",
                    r.pc,
                    n + 1
                )
            }
        };
        exec?;
        self.instructions += 1;
        Ok(())
    }

    /// Flushes every open writer.
    ///
    /// # Errors
    ///
    /// Propagates the first flush failure.
    pub fn flush(&mut self) -> io::Result<()> {
        for out in [&mut self.inst, &mut self.cycle, &mut self.dma]
            .into_iter()
            .flatten()
        {
            out.flush()?;
        }
        Ok(())
    }
}
