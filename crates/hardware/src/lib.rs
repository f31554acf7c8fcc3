//! SP pipelined processor simulator library.
//!
//! This crate implements a cycle-accurate model of the SP processor with the following:
//! 1. **Core:** Six-stage in-order pipeline (Fetch0, Fetch1, Dec0, Dec1, Exec0, Exec1),
//!    register file, hazard detection and operand forwarding.
//! 2. **Units:** ALU, direct-mapped Branch Target Buffer, and a block-copy DMA engine.
//! 3. **ISA:** Decoding and naming of the 32-bit SP instruction word.
//! 4. **SoC:** Single-ported instruction and data SRAMs with one-cycle read latency.
//! 5. **Simulation:** Image loader, double-buffered scheduler, trace files, and statistics.

/// Common types and constants (errors, traps, field layout).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Processor core (state snapshot, pipeline, architectural registers, units).
pub mod core;
/// Instruction set (opcodes, instruction decode, disassembly).
pub mod isa;
/// Image loading, scheduling, and trace output.
pub mod sim;
/// Memory primitives shared by the core and the DMA engine.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Error type returned by every fallible simulator operation.
pub use crate::common::error::SimError;
/// Top-level simulator; owns both state snapshots and the memories.
pub use crate::sim::simulator::Simulator;
