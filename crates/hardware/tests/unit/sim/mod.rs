//! # Simulation Driver Tests

/// Illegal opcode handling.
pub mod illegal_opcode;


/// Whole-program behaviour (arithmetic, DMA, polling).
pub mod programs;
