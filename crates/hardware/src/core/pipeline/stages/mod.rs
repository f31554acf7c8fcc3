//! Pipeline stage implementations.
//!
//! Each stage reads the current snapshot and writes the next one. They run in
//! pipeline order (oldest logic last) so that a redirect from a later stage
//! overrides what an earlier stage wrote this cycle:
//! 1. **Fetch:** Fetch0 issues the instruction read and consults the BTB; Fetch1 captures the word.
//! 2. **Decode:** Dec0 decodes and squashes bad predictions; Dec1 reads operands.
//! 3. **Execute:** Exec0 runs the ALU and issues loads.
//! 4. **Commit:** Exec1 writes back, stores, launches DMA, resolves branches and halts.

/// Commit stage implementation (Exec1).
pub mod commit;

/// Decode stage implementations (Dec0, Dec1).
pub mod decode;

/// Execute stage implementation (Exec0).
pub mod execute;

/// Fetch stage implementations (Fetch0, Fetch1).
pub mod fetch;

/// Commit stage entry point and what it retired.
pub use commit::{CommitEffect, Retired, exec1_stage};
/// Decode stage entry points.
pub use decode::{dec0_stage, dec1_stage};
/// Execute stage entry point.
pub use execute::exec0_stage;
/// Fetch stage entry points.
pub use fetch::{fetch0_stage, fetch1_stage};
