//! System-on-Chip (SoC) Components.
//!
//! The SP system has no bus or devices: the core and the DMA engine share a
//! data SRAM, and the front end reads from a separate instruction SRAM.

/// Single-ported SRAM model used for both memories.
pub mod memory;

pub use memory::sram::Sram;
