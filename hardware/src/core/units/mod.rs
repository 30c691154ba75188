//! Functional units used by the pipeline stages.

/// Integer ALU and condition-code generation.
pub mod alu;

/// Load/Store Unit: data-memory access planning and execution.
pub mod lsu;
