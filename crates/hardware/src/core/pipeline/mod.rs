//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the six-stage SP pipeline.
//! It includes the following components:
//! 1. **Engine:** Runs one clock cycle of every stage and the DMA engine.
//! 2. **Hazards:** Stall detection, operand forwarding and data-port arbitration.
//! 3. **Latches:** Stage records carried between cycles.
//! 4. **Stages:** Fetch0, Fetch1, Dec0, Dec1, Exec0 and Exec1.

/// Single-cycle driver for the pipeline and the DMA engine.
pub mod engine;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Stage records (Fetch1 through Exec1) and the load-forward marker.
pub mod latches;

/// Pipeline stage implementations.
pub mod stages;

pub use engine::{CycleReport, cycle};
pub use hazards::{HazardSignals, HazardUnit};
