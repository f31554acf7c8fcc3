//! ALU Tests.
//!
//! Arithmetic wraps, shifts use the low five bits with a logical right shift,
//! memory ops produce 16-bit addresses, and branches produce a 0/1 condition.

use rstest::rstest;

use sp_core::core::units::alu::Alu;
use sp_core::isa::opcodes::Opcode;

// ══════════════════════════════════════════════════════════
// 1. Arithmetic and logic
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(Opcode::Add, 2, 3, 5)]
#[case(Opcode::Add, i32::MAX, 1, i32::MIN)]
#[case(Opcode::Sub, 2, 3, -1)]
#[case(Opcode::Sub, i32::MIN, 1, i32::MAX)]
#[case(Opcode::And, 0b1100, 0b1010, 0b1000)]
#[case(Opcode::Or, 0b1100, 0b1010, 0b1110)]
#[case(Opcode::Xor, 0b1100, 0b1010, 0b0110)]
fn arithmetic_and_logic(#[case] op: Opcode, #[case] a: i32, #[case] b: i32, #[case] out: i32) {
    assert_eq!(Alu::execute(op, a, b, 0), out);
}

#[rstest]
#[case(Opcode::Lsf, 1, 4, 16)]
#[case(Opcode::Lsf, 1, 33, 2)]
#[case(Opcode::Rsf, -1, 28, 0xf)]
#[case(Opcode::Rsf, 0x100, 4, 0x10)]
#[case(Opcode::Rsf, i32::MIN, 31, 1)]
fn shifts(#[case] op: Opcode, #[case] a: i32, #[case] b: i32, #[case] out: i32) {
    assert_eq!(Alu::execute(op, a, b, 0), out);
}

#[test]
fn lhi_places_b_high_and_a_low() {
    assert_eq!(Alu::execute(Opcode::Lhi, 0x1234, 0x5678, 0x1234), 0x5678_1234);
    assert_eq!(Alu::execute(Opcode::Lhi, -1, 0, -1), 0xffff);
}

// ══════════════════════════════════════════════════════════
// 2. Memory and DMA
// ══════════════════════════════════════════════════════════

#[test]
fn memory_address_is_low_16_bits_of_b() {
    assert_eq!(Alu::execute(Opcode::Ld, 0, 0x1_0042, 0), 0x42);
    assert_eq!(Alu::execute(Opcode::St, 7, -1, 0), 0xffff);
}

#[test]
fn dma_result_is_destination_immediate() {
    assert_eq!(Alu::execute(Opcode::Dma, 10, 4, 300), 300);
}

// ══════════════════════════════════════════════════════════
// 3. Branch conditions
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(Opcode::Jlt, 1, 2, 1)]
#[case(Opcode::Jlt, 2, 2, 0)]
#[case(Opcode::Jlt, -5, 2, 1)]
#[case(Opcode::Jle, 2, 2, 1)]
#[case(Opcode::Jle, 3, 2, 0)]
#[case(Opcode::Jeq, 4, 4, 1)]
#[case(Opcode::Jeq, 4, 5, 0)]
#[case(Opcode::Jne, 4, 5, 1)]
#[case(Opcode::Jne, 4, 4, 0)]
#[case(Opcode::Jin, 0, 0, 1)]
fn branch_conditions(#[case] op: Opcode, #[case] a: i32, #[case] b: i32, #[case] out: i32) {
    assert_eq!(Alu::execute(op, a, b, 0), out);
}
