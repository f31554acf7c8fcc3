//! Simulator: owns both state snapshots and the two SRAMs side by side.
//!
//! Each tick copies the current snapshot into the next one, runs the cycle
//! engine against both, and then either commits (swap snapshots, clock the
//! SRAMs) or, if Exec1 raised a trap, throws the whole cycle away.

use std::fs::File;
use std::io::{self, BufWriter};
use std::mem;
use std::path::Path;

use tracing::{error, info};

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::cpu::CoreState;
use crate::core::pipeline::engine::{CycleReport, cycle};
use crate::core::pipeline::stages::CommitEffect;
use crate::isa::instruction::Reg;
use crate::sim::loader;
use crate::sim::trace::TraceContext;
use crate::soc::memory::sram::Sram;
use crate::stats::SimStats;

/// Top-level simulator: core snapshots, memories, traces and statistics.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    state: CoreState,
    next_state: CoreState,
    imem: Sram,
    dmem: Sram,
    trace: TraceContext,
    stats: SimStats,
    halted: bool,
}

impl Simulator {
    /// Builds a simulator with `image` loaded at address 0 of both SRAMs.
    ///
    /// Opens the trace files selected by `config.trace`.
    ///
    /// # Errors
    ///
    /// [`SimError::Config`] for an invalid configuration, [`SimError::Io`] if
    /// a trace file cannot be created.
    pub fn new(config: Config, image: &[u32]) -> Result<Self, SimError> {
        config.validate()?;
        let trace = TraceContext::open(&config.trace)?;
        Ok(Self::with_trace(config, image, trace))
    }

    /// Like [`Simulator::new`] but with caller-supplied trace writers.
    pub fn with_trace(config: Config, image: &[u32], trace: TraceContext) -> Self {
        let height = config.memory.sram_height;
        let mut imem = Sram::new(height);
        let mut dmem = Sram::new(height);
        loader::install(&mut imem, image);
        loader::install(&mut dmem, image);

        let state = CoreState::new(&config);
        Self {
            next_state: state.clone(),
            state,
            imem,
            dmem,
            trace,
            stats: SimStats::default(),
            halted: false,
            config,
        }
    }

    /// Loads the image at `path` and builds a simulator for it.
    ///
    /// # Errors
    ///
    /// Any loader error, plus the errors of [`Simulator::new`].
    pub fn from_file(config: Config, path: &Path) -> Result<Self, SimError> {
        let image = loader::load_image(path, config.memory.sram_height)?;
        Self::new(config, &image)
    }

    /// Advances the machine by one clock cycle.
    ///
    /// Once halted this is a no-op returning an empty report.
    ///
    /// # Errors
    ///
    /// [`SimError::IllegalOpcode`] if an illegal instruction reached Exec1;
    /// nothing of that cycle is committed. [`SimError::Io`] on trace output
    /// failure; the cycle is discarded the same way and may be retried.
    pub fn tick(&mut self) -> Result<CycleReport, SimError> {
        if self.halted {
            return Ok(CycleReport::default());
        }

        self.next_state.clone_from(&self.state);
        let report = match cycle(
            &self.state,
            &mut self.next_state,
            &mut self.imem,
            &mut self.dmem,
        ) {
            Ok(report) => report,
            Err(trap) => {
                self.imem.discard();
                self.dmem.discard();
                error!(cycle = self.state.cycle_counter, %trap, "simulation stopped");
                self.trace.flush()?;
                return Err(trap.into());
            }
        };

        if let Err(e) = self.write_traces(&report) {
            self.imem.discard();
            self.dmem.discard();
            error!(cycle = self.state.cycle_counter, %e, "trace output failed");
            return Err(e.into());
        }

        self.commit();
        self.stats.record(&report);

        if let Some(retired) = &report.retired
            && retired.effect == CommitEffect::Halt
        {
            self.halt(retired.pc)?;
        }
        Ok(report)
    }

    /// Runs until `HLT` commits.
    ///
    /// # Errors
    ///
    /// Any error from [`Simulator::tick`], or [`SimError::CycleLimit`] if
    /// `general.max_cycles` elapses first.
    pub fn run(&mut self) -> Result<&SimStats, SimError> {
        while !self.halted {
            if let Some(limit) = self.config.general.max_cycles
                && self.state.cycle_counter >= limit
            {
                self.trace.flush()?;
                return Err(SimError::CycleLimit(limit));
            }
            let _ = self.tick()?;
        }
        Ok(&self.stats)
    }

    /// Writes this cycle's trace records from the pre-cycle snapshot.
    fn write_traces(&mut self, report: &CycleReport) -> io::Result<()> {
        self.trace.cycle(&self.state, report)?;
        self.trace.dma(&self.state, &report.dma)?;
        if let Some(retired) = &report.retired {
            self.trace.instruction(&self.state, retired)?;
        }
        Ok(())
    }

    /// Makes the next snapshot current and clocks both SRAMs.
    fn commit(&mut self) {
        mem::swap(&mut self.state, &mut self.next_state);
        self.imem.commit();
        self.dmem.commit();
    }

    fn halt(&mut self, pc: u16) -> Result<(), SimError> {
        self.halted = true;
        info!(
            pc,
            cycles = self.state.cycle_counter,
            instructions = self.stats.instructions_retired,
            "halted"
        );
        self.trace.flush()?;

        let tc = &self.config.trace;
        if tc.enabled && tc.dump_memory {
            self.imem.dump(&mut BufWriter::new(File::create(tc.srami_dump_path())?))?;
            self.dmem.dump(&mut BufWriter::new(File::create(tc.sramd_dump_path())?))?;
        }
        Ok(())
    }

    /// Current (committed) snapshot.
    pub const fn state(&self) -> &CoreState {
        &self.state
    }

    /// Committed value of `reg` (`r0` and `r1` read as 0 outside an instruction).
    pub fn read_reg(&self, reg: Reg) -> i32 {
        self.state.regs.read(reg)
    }

    /// Instruction SRAM.
    pub const fn imem(&self) -> &Sram {
        &self.imem
    }

    /// Data SRAM.
    pub const fn dmem(&self) -> &Sram {
        &self.dmem
    }

    /// Mutable data SRAM, for seeding data before a run.
    pub fn dmem_mut(&mut self) -> &mut Sram {
        &mut self.dmem
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Cycles committed since reset.
    pub const fn cycle(&self) -> u64 {
        self.state.cycle_counter
    }

    /// `HLT` has committed.
    pub const fn halted(&self) -> bool {
        self.halted
    }

    /// Configuration the simulator was built with.
    pub const fn config(&self) -> &Config {
        &self.config
    }
}
