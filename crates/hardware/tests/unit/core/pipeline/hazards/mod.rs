//! # Hazard Tests
//!
//! Each bypass and stall rule gets a dedicated test: leaving one out produces
//! silently wrong arithmetic, never a crash.
