//! Common utilities and types used throughout the SP simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Instruction field layout, memory geometry, and register roles.
//! 2. **Error Handling:** The simulator error type and pipeline-carried traps.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types and trap definitions.
pub mod error;

pub use error::{SimError, Trap};
