//! Simulation driver.
//!
//! Loads program images, schedules cycles over the double-buffered core
//! state, and writes trace and dump files.

/// Memory image parsing and installation.
pub mod loader;
/// Double-buffered cycle scheduler.
pub mod simulator;
/// Instruction, cycle and DMA trace writers.
pub mod trace;
