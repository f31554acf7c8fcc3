//! Execution units and functional components.
//!
//! This module contains the processor's functional units: the integer ALU,
//! the branch resolution unit with its target buffer, and the DMA engine that
//! shares the data SRAM with the pipeline.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit and Branch Target Buffer.
pub mod bru;

/// Block-copy DMA engine.
pub mod dma;
