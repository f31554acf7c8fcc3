//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the SP simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived metrics (CPI).
//! 2. **Instruction mix:** Counts by category (ALU, load, store, branch, DMA, halt).
//! 3. **Branch prediction:** Resolutions, mispredictions, squashes, and accuracy.
//! 4. **Stalls:** Structural and load-use stall cycles.
//! 5. **DMA:** Transfers launched, requests dropped, words written, and port stalls.

use std::time::Instant;

use crate::core::pipeline::engine::CycleReport;
use crate::core::pipeline::stages::CommitEffect;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Count of ALU, `LHI` and `DMP` instructions retired.
    pub inst_alu: u64,
    /// Count of load instructions retired.
    pub inst_load: u64,
    /// Count of store instructions retired.
    pub inst_store: u64,
    /// Count of branch/jump instructions retired.
    pub inst_branch: u64,
    /// Count of `DMA` instructions retired.
    pub inst_dma: u64,
    /// Count of `HLT` instructions retired.
    pub inst_halt: u64,

    /// Number of branch resolutions that matched the prediction.
    pub branch_predictions: u64,
    /// Number of branch resolutions that flushed the pipeline.
    pub branch_mispredictions: u64,
    /// Fetches the BTB predicted taken.
    pub btb_taken_predictions: u64,
    /// Dec0 squashes of a taken prediction for a non-branch.
    pub squashes: u64,

    /// Stall cycles caused by a load in Exec0 behind a store in Exec1.
    pub stalls_structural: u64,
    /// Stall cycles caused by a load-use dependency.
    pub stalls_load_use: u64,

    /// DMA transfers accepted.
    pub dma_transfers: u64,
    /// DMA requests dropped because the engine was busy.
    pub dma_dropped: u64,
    /// Words written by the DMA engine.
    pub dma_words: u64,
    /// Cycles the DMA engine yielded the data port to the pipeline.
    pub dma_stall_cycles: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_dma: 0,
            inst_halt: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            btb_taken_predictions: 0,
            squashes: 0,
            stalls_structural: 0,
            stalls_load_use: 0,
            dma_transfers: 0,
            dma_dropped: 0,
            dma_words: 0,
            dma_stall_cycles: 0,
        }
    }
}

impl SimStats {
    /// Accumulates the events of one committed cycle.
    pub fn record(&mut self, report: &CycleReport) {
        self.cycles += 1;

        let sig = &report.signals;
        if sig.structural {
            self.stalls_structural += 1;
        } else if sig.load_use {
            self.stalls_load_use += 1;
        }
        if report.btb_taken {
            self.btb_taken_predictions += 1;
        }
        if report.squashed {
            self.squashes += 1;
        }

        if report.dma.stalled {
            self.dma_stall_cycles += 1;
        }
        if report.dma.write.is_some() {
            self.dma_words += 1;
        }

        let Some(retired) = &report.retired else {
            return;
        };
        self.instructions_retired += 1;
        match retired.effect {
            CommitEffect::RegWrite { .. } => self.inst_alu += 1,
            CommitEffect::Load { .. } => self.inst_load += 1,
            CommitEffect::Store { .. } => self.inst_store += 1,
            CommitEffect::Dma { launched } => {
                self.inst_dma += 1;
                if launched {
                    self.dma_transfers += 1;
                } else {
                    self.dma_dropped += 1;
                }
            }
            CommitEffect::Branch { flushed, .. } => {
                self.inst_branch += 1;
                if flushed {
                    self.branch_mispredictions += 1;
                } else {
                    self.branch_predictions += 1;
                }
            }
            CommitEffect::Halt => self.inst_halt += 1,
        }
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1);
        let instr = self.instructions_retired.max(1);
        let pct = |n: u64| (n as f64 / cyc as f64) * 100.0;

        println!("\n==========================================================");
        println!("SP PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!(
            "sim_ipc                  {:.4}",
            self.instructions_retired as f64 / cyc as f64
        );
        println!("sim_cpi                  {:.4}", cyc as f64 / instr as f64);
        println!("----------------------------------------------------------");
        println!("STALLS");
        println!(
            "  stalls.structural      {} ({:.2}%)",
            self.stalls_structural,
            pct(self.stalls_structural)
        );
        println!(
            "  stalls.load_use        {} ({:.2}%)",
            self.stalls_load_use,
            pct(self.stalls_load_use)
        );
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        for (name, n) in [
            ("alu", self.inst_alu),
            ("load", self.inst_load),
            ("store", self.inst_store),
            ("branch", self.inst_branch),
            ("dma", self.inst_dma),
            ("halt", self.inst_halt),
        ] {
            println!(
                "  op_type.{name:<14} {n} ({:.2}%)",
                (n as f64 / instr as f64) * 100.0
            );
        }
        println!("----------------------------------------------------------");
        println!("BRANCH PREDICTION");
        let resolved = self.branch_predictions + self.branch_mispredictions;
        let accuracy = if resolved == 0 {
            0.0
        } else {
            self.branch_predictions as f64 / resolved as f64 * 100.0
        };
        println!("  bp.lookups_taken       {}", self.btb_taken_predictions);
        println!("  bp.resolved            {resolved}");
        println!("  bp.mispredicts         {}", self.branch_mispredictions);
        println!("  bp.accuracy            {accuracy:.2}%");
        println!("  bp.squashes            {}", self.squashes);
        println!("----------------------------------------------------------");
        println!("DMA");
        println!("  dma.transfers          {}", self.dma_transfers);
        println!("  dma.dropped            {}", self.dma_dropped);
        println!("  dma.words              {}", self.dma_words);
        println!(
            "  dma.port_stalls        {} ({:.2}%)",
            self.dma_stall_cycles,
            pct(self.dma_stall_cycles)
        );
        println!("==========================================================");
    }
}
