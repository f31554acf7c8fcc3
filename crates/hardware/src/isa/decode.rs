//! SP Instruction Decoder.
//!
//! Turns a 32-bit instruction word into an [`Instruction`]. The only failure
//! mode is an opcode outside the SP set; register fields are three bits wide
//! and every value is a valid index.

use crate::isa::instruction::{Instruction, InstructionBits};
use crate::isa::opcodes::Opcode;

/// Decodes an SP instruction word.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding to decode.
///
/// # Returns
///
/// The decoded instruction, or the rejected 5-bit opcode value if it is illegal.
///
/// # Examples
///
/// ```
/// use sp_core::isa::{decode, Opcode, Reg};
///
/// // ADD r2, r0, r1, 5
/// let inst = decode(0x0080_0005 | (1 << 16)).unwrap();
/// assert_eq!(inst.opcode, Opcode::Add);
/// assert_eq!(inst.dst, Reg::new(2).unwrap());
/// assert_eq!(inst.imm, 5);
/// ```
pub fn decode(inst: u32) -> Result<Instruction, u8> {
    let opcode = Opcode::try_from(inst.opcode_bits())?;
    Ok(Instruction {
        opcode,
        dst: inst.dst(),
        src0: inst.src0(),
        src1: inst.src1(),
        imm: inst.imm(),
    })
}
