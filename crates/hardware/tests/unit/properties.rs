//! Single-Opcode Isolation Property.
//!
//! Seeds `r2..r7`, executes one arbitrary legal instruction, halts, and
//! checks the architectural result against the operand rules: `r0` reads
//! zero, `r1` reads the immediate, `LHI` takes its second operand from `dst`.

use proptest::prelude::*;

use sp_core::core::units::alu::Alu;
use sp_core::isa::opcodes::Opcode;

use crate::common::builder::program::{ProgramBuilder, encode};
use crate::common::harness::{TestContext, test_config};

const HEIGHT: usize = 64;
const UNDER_TEST_PC: i32 = 6;

#[derive(Clone, Debug)]
struct Case {
    op: Opcode,
    dst: u8,
    src0: u8,
    src1: u8,
    imm: i32,
    seeds: [i32; 6],
}

impl Case {
    fn read(&self, regs: &[i32; 8], idx: u8) -> i32 {
        match idx {
            0 => 0,
            1 => self.imm,
            i => regs[usize::from(i)],
        }
    }

    fn image(&self) -> Vec<u32> {
        let mut b = ProgramBuilder::new();
        for (i, &v) in self.seeds.iter().enumerate() {
            b = b.li(i as u8 + 2, v);
        }
        let mut b = b.op(self.op, self.dst, self.src0, self.src1, self.imm);
        while b.here() < HEIGHT as i32 {
            b = b.hlt();
        }
        b.build()
    }
}

fn case() -> impl Strategy<Value = Case> {
    (
        prop::sample::select(Opcode::ALL.to_vec()),
        0u8..8,
        0u8..8,
        0u8..8,
        any::<i16>(),
        8i32..HEIGHT as i32,
        prop::array::uniform6(8i32..HEIGHT as i32),
    )
        .prop_map(|(op, dst, src0, src1, imm, target, seeds)| {
            let src0 = if op == Opcode::Jin && src0 == 0 { 2 } else { src0 };
            let imm = if op.is_branch() { target } else { i32::from(imm) };
            Case {
                op,
                dst,
                src0,
                src1,
                imm,
                seeds,
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn single_instruction_matches_operand_rules(c in case()) {
        let image = c.image();
        prop_assert_eq!(image[UNDER_TEST_PC as usize], encode(c.op, c.dst, c.src0, c.src1, c.imm));

        let mut config = test_config();
        config.memory.sram_height = HEIGHT;
        let mut ctx = TestContext::with_config(config, &image);
        let _ = ctx.run_to_halt();

        let mut regs = [0i32; 8];
        regs[2..].copy_from_slice(&c.seeds);
        let mut mem = image.clone();

        let a = if c.op == Opcode::Lhi { c.imm } else { c.read(&regs, c.src0) };
        let b_reg = if c.op == Opcode::Lhi { c.dst } else { c.src1 };
        let b = c.read(&regs, b_reg);
        let mut expected = regs;
        let writable = c.dst >= 2;

        match c.op {
            Opcode::Ld => {
                if writable {
                    expected[usize::from(c.dst)] = image[b as usize & (HEIGHT - 1)] as i32;
                }
            }
            Opcode::St => mem[b as usize & (HEIGHT - 1)] = a as u32,
            Opcode::Dmp => {
                if writable {
                    expected[usize::from(c.dst)] = 1;
                }
            }
            Opcode::Dma | Opcode::Hlt => {}
            op if op.is_branch() => {
                if Alu::execute(op, a, b, c.imm) != 0 {
                    expected[7] = UNDER_TEST_PC;
                }
            }
            op => {
                if writable {
                    expected[usize::from(c.dst)] = Alu::execute(op, a, b, c.imm);
                }
            }
        }

        for i in 0..8u8 {
            prop_assert_eq!(ctx.reg(i), expected[usize::from(i)], "r{}", i);
        }
        if c.op == Opcode::Dma {
            prop_assert_eq!(ctx.sim.stats().dma_transfers, 1);
        } else {
            prop_assert_eq!(ctx.sim.dmem().words(), mem.as_slice());
        }
    }
}
