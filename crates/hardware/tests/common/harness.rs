use sp_core::config::{Config, GeneralConfig, TraceConfig};
use sp_core::core::CoreState;
use sp_core::core::pipeline::engine::CycleReport;
use sp_core::{SimError, Simulator};

use crate::common::builder::program::r;

/// Cycle guard for test programs; every test program halts long before this.
pub const TEST_CYCLE_LIMIT: u64 = 20_000;

/// Configuration used by the harness: no trace files, bounded run.
pub fn test_config() -> Config {
    Config {
        general: GeneralConfig {
            max_cycles: Some(TEST_CYCLE_LIMIT),
        },
        trace: TraceConfig::disabled(),
        ..Config::default()
    }
}

pub struct TestContext {
    pub sim: Simulator,
}

impl TestContext {
    pub fn new(program: &[u32]) -> Self {
        Self::with_config(test_config(), program)
    }

    pub fn with_config(config: Config, program: &[u32]) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("sp_core=debug")
            .try_init();

        let sim = Simulator::new(config, program).expect("test config is valid");
        Self { sim }
    }

    /// Seeds data memory before the run.
    pub fn with_data(mut self, addr: u16, words: &[u32]) -> Self {
        for (i, &w) in words.iter().enumerate() {
            self.sim.dmem_mut().poke(addr + i as u16, w);
        }
        self
    }

    /// Runs until `HLT` commits, panicking on any error.
    pub fn run_to_halt(&mut self) -> &mut Self {
        if let Err(e) = self.sim.run() {
            panic!("program did not halt cleanly: {e}");
        }
        self
    }

    /// Runs until `HLT` commits and returns the error if one stops it first.
    pub fn try_run(&mut self) -> Result<(), SimError> {
        self.sim.run().map(|_| ())
    }

    /// Runs to halt, collecting every cycle's report.
    pub fn run_collect(&mut self) -> Vec<(CoreState, CycleReport)> {
        let mut out = Vec::new();
        while !self.sim.halted() {
            assert!(self.sim.cycle() < TEST_CYCLE_LIMIT, "program did not halt");
            let before = self.sim.state().clone();
            let report = self.sim.tick().expect("tick");
            out.push((before, report));
        }
        out
    }

    pub fn reg(&self, idx: u8) -> i32 {
        self.sim.read_reg(r(idx))
    }

    pub fn mem(&self, addr: u16) -> u32 {
        self.sim.dmem().peek(addr)
    }

    pub fn cycles(&self) -> u64 {
        self.sim.cycle()
    }
}
