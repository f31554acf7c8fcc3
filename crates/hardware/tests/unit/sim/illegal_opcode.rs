//! Illegal Opcode Tests.
//!
//! An illegal word stops the run when it reaches Exec1, and nothing of that
//! cycle is committed. On a wrong path it is harmless.

use pretty_assertions::assert_eq;

use sp_core::SimError;

use crate::common::builder::program::ProgramBuilder;
use crate::common::harness::TestContext;

const ILLEGAL: u32 = 13 << 25;

#[test]
fn run_reports_pc_and_opcode() {
    let program = ProgramBuilder::new()
        .li(2, 7)
        .word(ILLEGAL)
        .li(3, 9)
        .hlt()
        .build();
    let mut ctx = TestContext::new(&program);
    let err = ctx.try_run().unwrap_err();

    match err {
        SimError::IllegalOpcode { pc, opcode, inst } => {
            assert_eq!(pc, 1);
            assert_eq!(opcode, 13);
            assert_eq!(inst, ILLEGAL);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(ctx.reg(2), 7, "older instruction committed");
    assert_eq!(ctx.reg(3), 0, "younger instruction did not");
    assert!(!ctx.sim.halted());
}

#[test]
fn faulting_cycle_commits_nothing() {
    // A DMA transfer and a store are in flight when the fault arrives.
    let mut b = ProgramBuilder::new()
        .li(2, 0)
        .li(3, 12)
        .dma(2, 3, 300)
        .li(4, 5)
        .st(4, 100);
    for _ in 0..6 {
        b = b.nop();
    }
    let program = b.word(ILLEGAL).hlt().build();

    let mut ctx = TestContext::new(&program);
    loop {
        assert!(!ctx.sim.halted(), "halted before the fault");
        let state = ctx.sim.state().clone();
        let memory = ctx.sim.dmem().words().to_vec();
        match ctx.sim.tick() {
            Ok(_) => continue,
            Err(SimError::IllegalOpcode { .. }) => {
                assert_eq!(ctx.sim.state(), &state);
                assert_eq!(ctx.sim.dmem().words(), memory.as_slice());
                assert!(state.dma.busy, "DMA still running when the fault hits");
                break;
            }
            Err(e) => panic!("unexpected error {e}"),
        }
    }
}

#[test]
fn wrong_path_illegal_word_is_ignored() {
    let program = ProgramBuilder::new()
        .jeq(0, 0, 3)
        .word(ILLEGAL)
        .word(ILLEGAL)
        .li(2, 1)
        .hlt()
        .build();
    let mut ctx = TestContext::new(&program);
    let _ = ctx.run_to_halt();
    assert_eq!(ctx.reg(2), 1);
}

#[test]
fn error_message_names_the_opcode() {
    let mut ctx = TestContext::new(&ProgramBuilder::new().word(31 << 25).build());
    let err = ctx.try_run().unwrap_err();
    assert!(err.to_string().contains("illegal opcode 31"), "{err}");
}
