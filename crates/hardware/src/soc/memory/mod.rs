//! On-chip memories.
//!
//! This module provides the SRAM primitive that backs both the instruction and
//! data memories. It models:
//! 1. **Latency:** A read issued in one cycle is extracted in the next.
//! 2. **Ports:** One read and one write per cycle, applied at the clock edge.
//! 3. **Dumps:** Text dumps of the full contents at the end of a run.

/// Clocked single-ported SRAM.
pub mod sram;
