//! Simulation harness: object loading and diagnostic dumps.

/// Diagnostic dumps of registers, latches, and memory.
pub mod dump;

/// `.yo` object listing loader.
pub mod loader;
