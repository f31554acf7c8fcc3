//! Statistics Tests.

use pretty_assertions::assert_eq;

use sp_core::stats::SimStats;

use crate::common::builder::program::ProgramBuilder;
use crate::common::harness::TestContext;

#[test]
fn counts_mix_stalls_and_branches() {
    let program = ProgramBuilder::new()
        .li(2, 7)
        .st(2, 100)
        .ld(3, 100)
        .add(4, 3, 1, 1)
        .jeq(0, 0, 6)
        .hlt()
        .hlt()
        .build();
    let mut ctx = TestContext::new(&program);
    let _ = ctx.run_to_halt();
    let s = ctx.sim.stats();

    assert_eq!(ctx.reg(4), 8);
    assert_eq!(s.instructions_retired, 6);
    assert_eq!(s.inst_alu, 2);
    assert_eq!(s.inst_store, 1);
    assert_eq!(s.inst_load, 1);
    assert_eq!(s.inst_branch, 1);
    assert_eq!(s.inst_halt, 1);
    assert_eq!(s.inst_dma, 0);
    assert_eq!(s.stalls_structural, 1);
    assert_eq!(s.stalls_load_use, 1);
    assert_eq!(s.branch_mispredictions, 1);
    assert_eq!(s.branch_predictions, 0);
    assert_eq!(s.cycles, ctx.cycles());
}

#[test]
fn hazard_free_program_counts_one_cycle_per_instruction() {
    let program = ProgramBuilder::new().li(2, 1).li(3, 2).li(4, 3).hlt().build();
    let mut ctx = TestContext::new(&program);
    let _ = ctx.run_to_halt();
    assert_eq!(ctx.sim.stats().cycles, 5 + 4);
    assert_eq!(ctx.sim.stats().stalls_structural + ctx.sim.stats().stalls_load_use, 0);
}

#[test]
fn dma_counters() {
    let program = ProgramBuilder::new()
        .li(2, 200)
        .li(3, 3)
        .dma(2, 3, 300)
        .dmp(5)
        .jeq(5, 0, 3)
        .hlt()
        .build();
    let mut ctx = TestContext::new(&program);
    let _ = ctx.run_to_halt();
    let s = ctx.sim.stats();
    assert_eq!(s.inst_dma, 1);
    assert_eq!(s.dma_transfers, 1);
    assert_eq!(s.dma_dropped, 0);
    assert_eq!(s.dma_words, 3);
}

#[test]
fn fresh_stats_are_zero() {
    let s = SimStats::default();
    assert_eq!(s.cycles, 0);
    assert_eq!(s.instructions_retired, 0);
    assert_eq!(s.dma_words, 0);
    s.print();
}
