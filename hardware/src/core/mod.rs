//! Y86 processor core.
//!
//! This module ties together the architectural state, main memory, the
//! functional units, and the five-stage pipeline behind the [`Cpu`] driver.

/// Architectural state: registers and condition codes.
pub mod arch;

/// The CPU driver that clocks the pipeline.
pub mod cpu;

/// Main memory array.
pub mod memory;

/// Pipeline latches, buses, hazard logic, and stages.
pub mod pipeline;

/// Functional units (ALU, LSU).
pub mod units;

pub use cpu::Cpu;
