//! Core processor implementation.
//!
//! This module contains the SP core: the architectural register file, the
//! double-buffered state snapshot, the six-stage pipeline and the functional
//! units it drives.

/// Architecture-specific components (register file).
pub mod arch;

/// Core state snapshot shared by the pipeline and the DMA engine.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards).
pub mod pipeline;

/// Execution units (ALU, branch resolution and BTB, DMA engine).
pub mod units;

pub use self::cpu::CoreState;
