//! System-wide constants.
//!
//! Bit layout of the SP instruction word, memory geometry, and the
//! architectural roles of special registers.

/// Bit position of the 5-bit opcode field.
pub const OPCODE_SHIFT: u32 = 25;
/// Mask of the opcode field after shifting.
pub const OPCODE_MASK: u32 = 0x1f;

/// Bit position of the destination register field.
pub const DST_SHIFT: u32 = 22;
/// Bit position of the first source register field.
pub const SRC0_SHIFT: u32 = 19;
/// Bit position of the second source register field.
pub const SRC1_SHIFT: u32 = 16;
/// Mask of a register field after shifting.
pub const REG_MASK: u32 = 0x7;

/// Mask of the 16-bit immediate field.
pub const IMMEDIATE_MASK: u32 = 0xffff;
/// Sign bit of the 16-bit immediate.
pub const IMMEDIATE_SIGN_BIT: u32 = 0x8000;

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 8;

/// Mask applied to every instruction and data address (16-bit address space).
pub const ADDR_MASK: u32 = 0xffff;

/// Words in each SRAM (64 Ki words).
pub const SRAM_HEIGHT: usize = 64 * 1024;
