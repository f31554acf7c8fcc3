//! Core State Snapshot.
//!
//! This module defines `CoreState`, everything the SP core holds in clocked
//! registers. The simulator keeps two copies: the current snapshot that every
//! unit reads during a cycle and the next snapshot that every unit writes. It
//! covers:
//! 1. **Architectural State:** The general-purpose register file.
//! 2. **Pipeline State:** One record per stage plus the load-forward marker.
//! 3. **Predictor State:** The Branch Target Buffer.
//! 4. **DMA State:** The DMA control block.

use crate::config::Config;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::Latches;
use crate::core::units::bru::Btb;
use crate::core::units::dma::DmaEngine;

/// Clocked state of the SP core.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreState {
    /// General Purpose Registers.
    pub regs: Gpr,
    /// Cycles elapsed since reset.
    pub cycle_counter: u64,
    /// Pipeline stage records.
    pub latches: Latches,
    /// Branch Target Buffer.
    pub btb: Btb,
    /// DMA control block.
    pub dma: DmaEngine,
}

impl CoreState {
    /// Reset state: registers, BTB and DMA zeroed, fetch starting at PC 0.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            cycle_counter: 0,
            latches: Latches::default(),
            btb: Btb::new(config.pipeline.btb_size),
            dma: DmaEngine::default(),
        }
    }
}
