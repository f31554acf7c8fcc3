//! Whole-Program Tests.
//!
//! Arithmetic sequences, loops, and DMA transfers running alongside
//! pipeline loads and stores.

use pretty_assertions::assert_eq;
use rstest::rstest;

use sp_core::core::pipeline::stages::CommitEffect;
use sp_core::isa::opcodes::Opcode;

use crate::common::builder::program::{ProgramBuilder, r};
use crate::common::harness::TestContext;

const DMA_SRC: u16 = 200;
const DMA_DST: u16 = 300;
const SCRATCH: i32 = 400;

fn source_data(len: usize) -> Vec<u32> {
    (0..len as u32).map(|i| 0xa5a5_0000 | (i * 3 + 1)).collect()
}

/// Appends `DMP r5` followed by a branch back to it while the engine is busy.
fn poll_until_idle(b: ProgramBuilder) -> ProgramBuilder {
    let poll = b.here();
    b.dmp(5).jeq(5, 0, poll)
}

// ══════════════════════════════════════════════════════════
// 1. Arithmetic
// ══════════════════════════════════════════════════════════

#[rstest]
fn unrolled_sum(#[values(1, 2, 10, 64)] n: i32) {
    let mut b = ProgramBuilder::new();
    for k in 0..n {
        b = b.add(2, 2, 1, k);
    }
    let mut ctx = TestContext::new(&b.hlt().build());
    let _ = ctx.run_to_halt();
    assert_eq!(ctx.reg(2), n * (n - 1) / 2);
    assert_eq!(ctx.sim.stats().instructions_retired, n as u64 + 1);
}

#[test]
fn looped_sum() {
    // r2 = sum of 0..10 with a counted loop.
    let program = ProgramBuilder::new()
        .li(4, 10)
        .add(2, 2, 3, 0)
        .add(3, 3, 1, 1)
        .jlt(3, 4, 1)
        .hlt()
        .build();
    let mut ctx = TestContext::new(&program);
    let _ = ctx.run_to_halt();
    assert_eq!(ctx.reg(2), 45);
    assert_eq!(ctx.reg(3), 10);
}

#[test]
fn memory_round_trip_and_shifts() {
    let program = ProgramBuilder::new()
        .li(2, -8)
        .st(2, 100)
        .ld(3, 100)
        .op(Opcode::Rsf, 4, 3, 1, 28)
        .op(Opcode::Lsf, 5, 4, 1, 4)
        .op(Opcode::Xor, 6, 5, 1, 0xf0)
        .hlt()
        .build();
    let mut ctx = TestContext::new(&program);
    let _ = ctx.run_to_halt();
    assert_eq!(ctx.mem(100), 0xffff_fff8);
    assert_eq!(ctx.reg(3), -8);
    assert_eq!(ctx.reg(4), 0xf);
    assert_eq!(ctx.reg(5), 0xf0);
    assert_eq!(ctx.reg(6), 0);
}

#[test]
fn registers_read_through_typed_index() {
    let program = ProgramBuilder::new()
        .li(0, 11)
        .li(1, 12)
        .li(2, 13)
        .li(7, 14)
        .hlt()
        .build();
    let mut ctx = TestContext::new(&program);
    let _ = ctx.run_to_halt();
    let regs: Vec<i32> = (0..8).map(|i| ctx.sim.read_reg(r(i))).collect();
    assert_eq!(regs, vec![0, 0, 13, 0, 0, 0, 0, 14]);
}

// ══════════════════════════════════════════════════════════
// 2. DMA
// ══════════════════════════════════════════════════════════

#[rstest]
fn dma_copy_with_interleaved_traffic(#[values(1, 2, 3, 8)] len: usize) {
    let data = source_data(len);
    let b = ProgramBuilder::new()
        .li(2, i32::from(DMA_SRC))
        .li(3, len as i32)
        .dma(2, 3, i32::from(DMA_DST))
        .ld(4, i32::from(DMA_SRC))
        .st(4, SCRATCH)
        .ld(6, i32::from(DMA_SRC) + 1)
        .st(6, SCRATCH + 1)
        .ld(4, 0)
        .st(4, SCRATCH + 2);
    let program = poll_until_idle(b).hlt().build();

    let mut ctx = TestContext::new(&program).with_data(DMA_SRC, &data);
    let _ = ctx.run_to_halt();

    for (i, &word) in data.iter().enumerate() {
        assert_eq!(ctx.mem(DMA_DST + i as u16), word, "word {i}");
    }
    assert_eq!(ctx.mem(DMA_DST + len as u16), 0, "wrote past the end");
    assert_eq!(ctx.mem(SCRATCH as u16), data[0]);
    assert_eq!(ctx.mem(SCRATCH as u16 + 1), ctx.mem(DMA_SRC + 1));
    assert_eq!(ctx.mem(SCRATCH as u16 + 2), program[0]);
    assert!(!ctx.sim.state().dma.busy);
    assert_eq!(ctx.reg(5), 1);
    assert_eq!(ctx.sim.stats().dma_words, len as u64);
}

#[rstest]
fn dma_busy_until_last_write_commits(#[values(1, 2, 5)] len: usize) {
    let data = source_data(len);
    let b = ProgramBuilder::new()
        .li(2, i32::from(DMA_SRC))
        .li(3, len as i32)
        .dma(2, 3, i32::from(DMA_DST))
        .st(3, SCRATCH);
    let program = poll_until_idle(b).hlt().build();

    let mut ctx = TestContext::new(&program).with_data(DMA_SRC, &data);
    let history = ctx.run_collect();

    let launch = history
        .iter()
        .position(|(_, r)| {
            matches!(
                r.retired.map(|ret| ret.effect),
                Some(CommitEffect::Dma { launched: true })
            )
        })
        .expect("DMA committed");
    let last_write = history
        .iter()
        .rposition(|(_, r)| r.dma.write.is_some())
        .expect("DMA wrote");

    assert!(last_write > launch);
    for (before, _) in &history[launch + 1..=last_write] {
        assert!(before.dma.busy, "busy dropped early at cycle {}", before.cycle_counter);
    }
    assert!(history[last_write].1.dma.finished);
    for (before, _) in &history[last_write + 1..] {
        assert!(!before.dma.busy);
    }
    assert_eq!(
        history.iter().filter(|(_, r)| r.dma.write.is_some()).count(),
        len
    );
}

#[test]
fn dmp_reads_busy_right_after_issue() {
    let data = source_data(4);
    let b = ProgramBuilder::new()
        .li(2, i32::from(DMA_SRC))
        .li(3, 4)
        .dma(2, 3, i32::from(DMA_DST))
        .dmp(6);
    let program = poll_until_idle(b).hlt().build();

    let mut ctx = TestContext::new(&program).with_data(DMA_SRC, &data);
    let _ = ctx.run_to_halt();
    assert_eq!(ctx.reg(6), 0, "DMA in Exec1 counts as busy");
    assert_eq!(ctx.reg(5), 1);
}

#[test]
fn second_dma_while_busy_is_dropped() {
    let data = source_data(6);
    let b = ProgramBuilder::new()
        .li(2, i32::from(DMA_SRC))
        .li(3, 6)
        .li(4, 1)
        .dma(2, 3, i32::from(DMA_DST))
        .dma(2, 4, 500);
    let program = poll_until_idle(b).hlt().build();

    let mut ctx = TestContext::new(&program).with_data(DMA_SRC, &data);
    let _ = ctx.run_to_halt();

    assert_eq!(ctx.sim.stats().dma_transfers, 1);
    assert_eq!(ctx.sim.stats().dma_dropped, 1);
    assert_eq!(ctx.mem(500), 0, "dropped request wrote nothing");
    for (i, &word) in data.iter().enumerate() {
        assert_eq!(ctx.mem(DMA_DST + i as u16), word);
    }
}

#[test]
fn back_to_back_stores_delay_dma() {
    let data = source_data(3);
    let mut b = ProgramBuilder::new()
        .li(2, i32::from(DMA_SRC))
        .li(3, 3)
        .dma(2, 3, i32::from(DMA_DST));
    for k in 0..8 {
        b = b.st(3, SCRATCH + k);
    }
    let program = poll_until_idle(b).hlt().build();

    let mut ctx = TestContext::new(&program).with_data(DMA_SRC, &data);
    let _ = ctx.run_to_halt();
    assert!(ctx.sim.stats().dma_stall_cycles > 0);
    for (i, &word) in data.iter().enumerate() {
        assert_eq!(ctx.mem(DMA_DST + i as u16), word);
    }
}
