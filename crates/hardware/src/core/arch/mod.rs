//! SP architecture-specific components.
//!
//! The only architectural storage besides memory is the general-purpose
//! register file.

/// General-Purpose Register file implementation.
pub mod gpr;
